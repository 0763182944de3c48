//! `generic` tag: expose a configuration value in the document.
//!
//! ```text
//! {% generic config SITENAME %}
//! ```

use lqt_engine::{EngineContext, TagError};

/// Expected syntax of the `generic` tag.
pub const SYNTAX: &str = "{% generic config <config file variable> %}";

/// Render a `generic` tag.
///
/// The option name is upper-cased before lookup, so `{% generic config sitename %}`
/// reads `SITENAME`.
///
/// # Errors
///
/// Returns [`TagError::Syntax`] if the markup is not `config <name>` and
/// [`TagError::Config`] if no option of that name is known.
pub fn generic(ctx: &mut EngineContext, _tag: &str, markup: &str) -> Result<String, TagError> {
    let mut words = markup.split_whitespace();
    let (Some(kind), Some(name)) = (words.next(), words.next()) else {
        return Err(TagError::syntax(SYNTAX));
    };
    if !kind.eq_ignore_ascii_case("config") {
        return Err(TagError::syntax(SYNTAX));
    }

    let name = name.to_uppercase();
    ctx.config()
        .get(&name)
        .map(lqt_config::ConfigValue::as_text)
        .ok_or_else(|| TagError::Config(format!("{name} is not a valid configuration parameter")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lqt_config::TagConfig;
    use pretty_assertions::assert_eq;

    fn ctx() -> EngineContext {
        EngineContext::new(
            TagConfig::default()
                .with("SITENAME", "Testing site")
                .with("AUTHOR", "The Tester")
                .with("YOUTUBE_THUMB_ONLY", false),
        )
    }

    #[test]
    fn test_config_value() {
        let mut ctx = ctx();
        assert_eq!(generic(&mut ctx, "generic", "config SITENAME").unwrap(), "Testing site");
        assert_eq!(generic(&mut ctx, "generic", "config AUTHOR").unwrap(), "The Tester");
    }

    #[test]
    fn test_name_is_upper_cased() {
        let mut ctx = ctx();
        assert_eq!(generic(&mut ctx, "generic", "Config author").unwrap(), "The Tester");
    }

    #[test]
    fn test_non_string_value() {
        let mut ctx = ctx();
        assert_eq!(generic(&mut ctx, "generic", "config YOUTUBE_THUMB_ONLY").unwrap(), "false");
    }

    #[test]
    fn test_unknown_option() {
        let mut ctx = ctx();
        let err = generic(&mut ctx, "generic", "config THEME").unwrap_err();
        assert!(matches!(err, TagError::Config(_)));
        assert_eq!(err.to_string(), "THEME is not a valid configuration parameter");
    }

    #[test]
    fn test_bad_syntax() {
        let mut ctx = ctx();
        for markup in ["", "config", "setting SITENAME"] {
            let err = generic(&mut ctx, "generic", markup).unwrap_err();
            assert!(matches!(err, TagError::Syntax { .. }), "markup: {markup:?}");
        }
    }
}
