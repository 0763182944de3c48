//! Preprocessing engine for liquid-style tags.
//!
//! Runs before the Markdown pipeline: every `{% name args %}` marker whose name
//! is registered is replaced by its handler's output. Everything else in the
//! document, unknown markers included, is copied through byte for byte.

use std::sync::PoisonError;

use crate::marker::find_markers;
use crate::{EngineContext, PreprocessError, TagRegistry};

/// Preprocessor bound to a tag registry.
///
/// # Example
///
/// ```
/// use lqt_engine::{EngineContext, Preprocessor, TagError, TagRegistry};
///
/// fn kbd(_ctx: &mut EngineContext, _tag: &str, markup: &str) -> Result<String, TagError> {
///     Ok(format!("<kbd>{markup}</kbd>"))
/// }
///
/// let mut registry = TagRegistry::new();
/// registry.register("kbd", kbd);
///
/// let mut ctx = EngineContext::default();
/// let output = Preprocessor::new(&registry)
///     .run("Press {% kbd Ctrl+C %} to copy {% other %}.", &mut ctx)
///     .unwrap();
/// assert_eq!(output, "Press <kbd>Ctrl+C</kbd> to copy {% other %}.");
/// ```
#[derive(Debug)]
pub struct Preprocessor<'r> {
    registry: &'r TagRegistry,
    protect_html: bool,
}

impl<'r> Preprocessor<'r> {
    /// Create a preprocessor dispatching to `registry`.
    #[must_use]
    pub fn new(registry: &'r TagRegistry) -> Self {
        Self {
            registry,
            protect_html: false,
        }
    }

    /// Park handler output in the context's stash instead of splicing it in.
    ///
    /// The output then holds placeholders until the host calls
    /// [`EngineContext::restore`]. Placeholders never collide with text
    /// already present in the input.
    #[must_use]
    pub fn protect_html(mut self, protect: bool) -> Self {
        self.protect_html = protect;
        self
    }

    /// Preprocess one document.
    ///
    /// Handlers are invoked in source order. The first handler error aborts
    /// the pass.
    ///
    /// # Errors
    ///
    /// Returns [`PreprocessError`] naming the failing tag and its line.
    pub fn run(&self, input: &str, ctx: &mut EngineContext) -> Result<String, PreprocessError> {
        let markers = find_markers(input);
        if markers.is_empty() {
            return Ok(input.to_owned());
        }

        if self.protect_html {
            ctx.stash_mut().prepare(input);
        }

        let mut output = String::with_capacity(input.len());
        let mut last_end = 0;
        let mut replaced = 0;

        for marker in &markers {
            output.push_str(&input[last_end..marker.start]);
            last_end = marker.end;

            let Some(invocation) = marker.invocation() else {
                tracing::debug!(line = marker.line, "Empty tag marker, passing through");
                output.push_str(marker.text);
                continue;
            };

            let Some(handler) = self.registry.lookup(invocation.name) else {
                tracing::trace!(tag = invocation.name, line = marker.line, "Unknown tag, passing through");
                output.push_str(marker.text);
                continue;
            };

            let html = handler
                .render(ctx, invocation.name, invocation.markup)
                .map_err(|source| PreprocessError {
                    tag: invocation.name.to_owned(),
                    line: marker.line,
                    source,
                })?;

            if self.protect_html {
                let placeholder = ctx.stash_mut().store(html);
                output.push_str(&placeholder);
            } else {
                output.push_str(&html);
            }
            replaced += 1;
        }

        output.push_str(&input[last_end..]);

        tracing::debug!(markers = markers.len(), replaced, "Preprocessed document");
        Ok(output)
    }
}

/// Preprocess one document with the process-wide registry.
///
/// # Errors
///
/// Returns [`PreprocessError`] naming the failing tag and its line.
pub fn run(input: &str, ctx: &mut EngineContext) -> Result<String, PreprocessError> {
    let registry = crate::registry::global()
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    Preprocessor::new(&registry).run(input, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TagError;
    use lqt_config::TagConfig;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    type TagResult = Result<String, TagError>;

    fn kbd(_ctx: &mut EngineContext, _tag: &str, markup: &str) -> Result<String, TagError> {
        Ok(format!("<kbd>{markup}</kbd>"))
    }

    fn echo_tag(_ctx: &mut EngineContext, tag: &str, markup: &str) -> Result<String, TagError> {
        Ok(format!("[{tag}|{markup}]"))
    }

    fn fail(_ctx: &mut EngineContext, _tag: &str, _markup: &str) -> Result<String, TagError> {
        Err(TagError::syntax("{% fail never %}"))
    }

    fn loading(ctx: &mut EngineContext, _tag: &str, _markup: &str) -> Result<String, TagError> {
        Ok(ctx.config().get_string("IMG_DEFAULT_LOADING"))
    }

    fn registry_with(tags: &[(&str, fn(&mut EngineContext, &str, &str) -> Result<String, TagError>)]) -> TagRegistry {
        let mut registry = TagRegistry::new();
        for &(name, handler) in tags {
            registry.register(name, handler);
        }
        registry
    }

    #[test]
    fn test_text_without_markers_unchanged() {
        let registry = registry_with(&[("kbd", kbd)]);
        let mut ctx = EngineContext::default();
        let input = "# Title\n\n  indented *text*\r\n\ttabs and trailing spaces   \n";

        let output = Preprocessor::new(&registry).run(input, &mut ctx).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_single_tag() {
        let registry = registry_with(&[("kbd", kbd)]);
        let mut ctx = EngineContext::default();

        let output = Preprocessor::new(&registry)
            .run("Press {% kbd Ctrl+C %} to copy.", &mut ctx)
            .unwrap();
        assert_eq!(output, "Press <kbd>Ctrl+C</kbd> to copy.");
    }

    #[test]
    fn test_handler_receives_name_and_trimmed_markup() {
        let registry = registry_with(&[("echo", echo_tag)]);
        let mut ctx = EngineContext::default();

        let output = Preprocessor::new(&registry)
            .run("{%   echo   a  b   %}", &mut ctx)
            .unwrap();
        assert_eq!(output, "[echo|a  b]");
    }

    #[test]
    fn test_unknown_tag_passes_through() {
        let registry = registry_with(&[("kbd", kbd)]);
        let mut ctx = EngineContext::default();
        let input = "{% include_code foo.py %} then {% kbd X %} then {%raw%}";

        let output = Preprocessor::new(&registry).run(input, &mut ctx).unwrap();
        assert_eq!(output, "{% include_code foo.py %} then <kbd>X</kbd> then {%raw%}");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = registry_with(&[("kbd", kbd)]);
        let mut ctx = EngineContext::default();

        let output = Preprocessor::new(&registry).run("{% KBD X %}", &mut ctx).unwrap();
        assert_eq!(output, "{% KBD X %}");
    }

    #[test]
    fn test_empty_marker_passes_through() {
        let registry = registry_with(&[("kbd", kbd)]);
        let mut ctx = EngineContext::default();

        let output = Preprocessor::new(&registry)
            .run("a {% %} b {%%} c", &mut ctx)
            .unwrap();
        assert_eq!(output, "a {% %} b {%%} c");
    }

    #[test]
    fn test_multiline_marker() {
        let registry = registry_with(&[("echo", echo_tag)]);
        let mut ctx = EngineContext::default();

        let output = Preprocessor::new(&registry)
            .run("line one\n{% echo first\nsecond %}\nline three\n", &mut ctx)
            .unwrap();
        assert_eq!(output, "line one\n[echo|first\nsecond]\nline three\n");
    }

    #[test]
    fn test_adjacent_markers() {
        let registry = registry_with(&[("kbd", kbd)]);
        let mut ctx = EngineContext::default();

        let output = Preprocessor::new(&registry)
            .run("{% kbd A %}{% kbd B %}", &mut ctx)
            .unwrap();
        assert_eq!(output, "<kbd>A</kbd><kbd>B</kbd>");
    }

    #[test]
    fn test_handlers_invoked_in_source_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = TagRegistry::new();
        {
            let seen = Arc::clone(&seen);
            registry.register("step", move |_: &mut EngineContext, _: &str, markup: &str| -> TagResult {
                let mut seen = seen.lock().unwrap();
                seen.push(markup.to_owned());
                Ok(seen.len().to_string())
            });
        }
        let mut ctx = EngineContext::default();

        let output = Preprocessor::new(&registry)
            .run("{% step c %} {% step a %}\n{% step b %}", &mut ctx)
            .unwrap();

        assert_eq!(output, "1 2\n3");
        assert_eq!(*seen.lock().unwrap(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_handler_error_aborts_pass() {
        let calls = Arc::new(Mutex::new(0));
        let mut registry = registry_with(&[("fail", fail)]);
        {
            let calls = Arc::clone(&calls);
            registry.register("count", move |_: &mut EngineContext, _: &str, _: &str| -> TagResult {
                *calls.lock().unwrap() += 1;
                Ok(String::new())
            });
        }
        let mut ctx = EngineContext::default();

        let err = Preprocessor::new(&registry)
            .run("{% count %}\n\n{% fail now %}\n{% count %}", &mut ctx)
            .unwrap_err();

        assert_eq!(err.tag, "fail");
        assert_eq!(err.line, 3);
        assert!(matches!(err.source, TagError::Syntax { .. }));
        assert!(err.to_string().contains("{% fail never %}"));
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_handler_reads_config() {
        let registry = registry_with(&[("loading", loading)]);
        let mut ctx = EngineContext::new(TagConfig::default().with("IMG_DEFAULT_LOADING", "lazy"));

        let output = Preprocessor::new(&registry).run("{% loading %}", &mut ctx).unwrap();
        assert_eq!(output, "lazy");
    }

    #[test]
    fn test_protect_html_and_restore() {
        let registry = registry_with(&[("kbd", kbd)]);
        let input = "Press {% kbd A %} or {% kbd B %}, not {% other %}.";

        let mut plain_ctx = EngineContext::default();
        let plain = Preprocessor::new(&registry).run(input, &mut plain_ctx).unwrap();

        let mut ctx = EngineContext::default();
        let mut protected = Preprocessor::new(&registry)
            .protect_html(true)
            .run(input, &mut ctx)
            .unwrap();

        assert!(!protected.contains("<kbd>"));
        assert!(protected.contains("{% other %}"));
        assert_eq!(ctx.stash().len(), 2);

        ctx.restore(&mut protected);
        assert_eq!(protected, plain);
    }

    #[test]
    fn test_protect_html_keeps_placeholder_lookalikes() {
        let registry = registry_with(&[("kbd", kbd)]);
        let input = "keep <!--lqt-stash-0:0--> then {% kbd A %}";

        let mut ctx = EngineContext::default();
        let mut protected = Preprocessor::new(&registry)
            .protect_html(true)
            .run(input, &mut ctx)
            .unwrap();
        ctx.restore(&mut protected);

        assert_eq!(protected, "keep <!--lqt-stash-0:0--> then <kbd>A</kbd>");
    }

    #[test]
    fn test_global_run() {
        crate::registry::global()
            .write()
            .unwrap()
            .register("preprocessor-test-kbd", kbd);
        let mut ctx = EngineContext::default();

        let output = run("{% preprocessor-test-kbd Esc %}", &mut ctx).unwrap();
        assert_eq!(output, "<kbd>Esc</kbd>");
    }
}
