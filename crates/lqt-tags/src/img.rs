//! `img` tag.
//!
//! ```text
//! {% img [class name(s)] [http[s]:/]/path/to/image [lazy | eager] [width [height]] [title text | "title text" ["alt text"]] %}
//! ```
//!
//! `IMG_DEFAULT_LOADING` set to `lazy` adds `loading="lazy"` to every image
//! that does not name a loading mode itself.

use std::sync::LazyLock;

use lqt_engine::{EngineContext, TagError};
use regex::Regex;

use crate::image::ImageAttrs;

/// Expected syntax of the `img` tag.
pub const SYNTAX: &str = r#"{% img [class name(s)] [http[s]:/]/path/to/image [lazy | eager] [width [height]] [title text | "title text" ["alt text"]] %}"#;

static IMG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<class>\S.*\s+)?(?P<src>(?:https?://|/|\S+/)\S+)(?:\s+(?P<loading>lazy|eager))?(?:\s+(?P<width>\d+))?(?:\s+(?P<height>\d+))?(?P<title>\s+.+)?",
    )
    .unwrap()
});

/// Render an `img` tag.
///
/// # Errors
///
/// Returns [`TagError::Syntax`] if the markup has no image path.
pub fn img(ctx: &mut EngineContext, _tag: &str, markup: &str) -> Result<String, TagError> {
    let caps = IMG_PATTERN
        .captures(markup)
        .ok_or_else(|| TagError::syntax(SYNTAX))?;
    let mut attrs = ImageAttrs::from_captures(&caps);

    let default_loading = ctx.config().get_string("IMG_DEFAULT_LOADING");
    if attrs.loading.is_none() && !default_loading.is_empty() && default_loading != "eager" {
        attrs.loading = Some(default_loading);
    }

    Ok(attrs.to_html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lqt_config::TagConfig;
    use pretty_assertions::assert_eq;

    fn render(markup: &str, loading: &str) -> Result<String, TagError> {
        let mut ctx = EngineContext::new(TagConfig::default().with("IMG_DEFAULT_LOADING", loading));
        img(&mut ctx, "img", markup)
    }

    #[test]
    fn test_normal_relative_path() {
        assert_eq!(
            render("/images/ninja.png", "eager").unwrap(),
            r#"<img src="/images/ninja.png">"#
        );
    }

    #[test]
    fn test_classnames_title_noalt() {
        assert_eq!(
            render("left half http://site.com/images/ninja.png Ninja Attack!", "eager").unwrap(),
            r#"<img class="left half" src="http://site.com/images/ninja.png" title="Ninja Attack!" alt="Ninja Attack!">"#
        );
    }

    #[test]
    fn test_classnames_sizes_title_alt() {
        let markup = r#"left half http://site.com/images/ninja.png 150 150 "Ninja Attack!" "Ninja in attack posture""#;
        assert_eq!(
            render(markup, "eager").unwrap(),
            r#"<img class="left half" src="http://site.com/images/ninja.png" width="150" height="150" title="Ninja Attack!" alt="Ninja in attack posture">"#
        );
    }

    #[test]
    fn test_explicit_loading() {
        let markup = r#"left half http://site.com/images/ninja.png eager 150 150 "Ninja Attack!" "Ninja in attack posture""#;
        let expected = r#"<img class="left half" src="http://site.com/images/ninja.png" loading="eager" width="150" height="150" title="Ninja Attack!" alt="Ninja in attack posture">"#;

        assert_eq!(render(markup, "eager").unwrap(), expected);
        assert_eq!(render(markup, "lazy").unwrap(), expected);
    }

    #[test]
    fn test_default_loading_lazy() {
        let markup = r#"left half http://site.com/images/ninja.png 150 150 "Ninja Attack!" "Ninja in attack posture""#;
        assert_eq!(
            render(markup, "lazy").unwrap(),
            r#"<img class="left half" src="http://site.com/images/ninja.png" loading="lazy" width="150" height="150" title="Ninja Attack!" alt="Ninja in attack posture">"#
        );
    }

    #[test]
    fn test_width_only() {
        assert_eq!(
            render("images/ninja.png 300", "eager").unwrap(),
            r#"<img src="images/ninja.png" width="300">"#
        );
    }

    #[test]
    fn test_unset_loading_config() {
        let mut ctx = EngineContext::default();
        assert_eq!(
            img(&mut ctx, "img", "/a.png").unwrap(),
            r#"<img src="/a.png">"#
        );
    }

    #[test]
    fn test_missing_path_is_syntax_error() {
        let err = render("just some words", "eager").unwrap_err();
        assert!(matches!(err, TagError::Syntax { .. }));
        assert!(err.to_string().contains(SYNTAX));

        assert!(render("", "eager").is_err());
    }
}
