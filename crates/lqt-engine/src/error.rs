//! Error types for tag handlers and the preprocessing engine.

/// Error returned by a tag handler.
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    /// The argument string does not match the tag's grammar.
    #[error("Error processing input. Expected syntax: {syntax}")]
    Syntax {
        /// Expected syntax of the tag, e.g. `{% youtube id [width height] %}`.
        syntax: String,
    },
    /// A resource referenced by the tag could not be read.
    #[error("Error fetching {src}: {message}")]
    Resource {
        /// Path or URL of the resource.
        src: String,
        /// Underlying failure.
        message: String,
    },
    /// The tag refers to configuration that does not exist or is unusable.
    #[error("{0}")]
    Config(String),
}

impl TagError {
    /// Create a syntax error naming the expected syntax.
    pub fn syntax(syntax: impl Into<String>) -> Self {
        Self::Syntax {
            syntax: syntax.into(),
        }
    }

    /// Create a resource error.
    pub fn resource(src: impl Into<String>, message: impl ToString) -> Self {
        Self::Resource {
            src: src.into(),
            message: message.to_string(),
        }
    }
}

/// Handler failure during a document pass.
///
/// Carries the failing tag's name and the line its marker starts on.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {{% {tag} %}}: {source}")]
pub struct PreprocessError {
    /// Name of the tag whose handler failed.
    pub tag: String,
    /// Line of the marker (1-indexed).
    pub line: usize,
    /// The handler's error.
    pub source: TagError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_message() {
        let err = TagError::syntax("{% youtube id [width height] %}");
        assert_eq!(
            err.to_string(),
            "Error processing input. Expected syntax: {% youtube id [width height] %}"
        );
    }

    #[test]
    fn test_resource_message() {
        let err = TagError::resource("/images/missing.png", "No such file or directory");
        assert_eq!(
            err.to_string(),
            "Error fetching /images/missing.png: No such file or directory"
        );
    }

    #[test]
    fn test_preprocess_error_message() {
        let err = PreprocessError {
            tag: "img".to_owned(),
            line: 3,
            source: TagError::syntax("{% img src %}"),
        };
        assert_eq!(
            err.to_string(),
            "line 3: {% img %}: Error processing input. Expected syntax: {% img src %}"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
