//! `youtube` tag.
//!
//! ```text
//! {% youtube id [width height] %}
//! ```
//!
//! Embeds the player in an iframe, or with `YOUTUBE_THUMB_ONLY` a thumbnail
//! linking to the video. `YOUTUBE_THUMB_SIZE` picks the thumbnail resolution:
//!
//! | name   | width | height |
//! |--------|-------|--------|
//! | maxres | 1280  | 720    |
//! | sd     | 640   | 480    |
//! | hq     | 480   | 360    |
//! | mq     | 320   | 180    |
//!
//! `YOUTUBE_INVIDIOUS_INSTANCE` replaces both the player and the thumbnail
//! origins with an Invidious instance.

use std::sync::LazyLock;

use lqt_config::ConfigRegistry;
use lqt_engine::{EngineContext, TagError};
use regex::Regex;

/// Expected syntax of the `youtube` tag.
pub const SYNTAX: &str = "{% youtube id [width height] %}";

const DEFAULT_WIDTH: &str = "640";
const DEFAULT_HEIGHT: &str = "390";
const DEFAULT_THUMB_SIZE: &str = "sd";

const YOUTUBE_ORIGIN: &str = "https://www.youtube.com";
const THUMBNAIL_ORIGIN: &str = "https://img.youtube.com";

static YOUTUBE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S+)(\s+([\d%]+)\s([\d%]+))?").unwrap());

/// Declare the options only this tag reads.
pub fn declare_config(registry: &mut ConfigRegistry) {
    registry.declare(
        "YOUTUBE_INVIDIOUS_INSTANCE",
        "",
        "Invidious instance replacing the YouTube origins, e.g. https://yewtu.be",
    );
}

/// Dimensions of a named thumbnail resolution.
fn thumb_dimensions(size: &str) -> Option<(&'static str, &'static str)> {
    match size {
        "maxres" => Some(("1280", "720")),
        "sd" => Some(("640", "480")),
        "hq" => Some(("480", "360")),
        "mq" => Some(("320", "180")),
        _ => None,
    }
}

/// Render a `youtube` tag.
///
/// # Errors
///
/// Returns [`TagError::Syntax`] if no video id is given.
pub fn youtube(ctx: &mut EngineContext, _tag: &str, markup: &str) -> Result<String, TagError> {
    let config = ctx.config();
    let thumb_only = config.is_enabled("YOUTUBE_THUMB_ONLY");
    let invidious = config.get_string("YOUTUBE_INVIDIOUS_INSTANCE");

    let mut thumb_size = config.get_string("YOUTUBE_THUMB_SIZE");
    if thumb_size.is_empty() {
        thumb_size = DEFAULT_THUMB_SIZE.to_owned();
    }

    let (mut width, mut height) = (DEFAULT_WIDTH, DEFAULT_HEIGHT);
    if thumb_only && let Some((w, h)) = thumb_dimensions(&thumb_size) {
        (width, height) = (w, h);
    }

    let caps = YOUTUBE_PATTERN
        .captures(markup)
        .ok_or_else(|| TagError::syntax(SYNTAX))?;
    let id = &caps[1];
    if let (Some(w), Some(h)) = (caps.get(3), caps.get(4)) {
        (width, height) = (w.as_str(), h.as_str());
    }

    let frontend = if invidious.is_empty() {
        YOUTUBE_ORIGIN
    } else {
        invidious.as_str()
    };

    let html = if thumb_only {
        let thumb_origin = if invidious.is_empty() {
            THUMBNAIL_ORIGIN
        } else {
            invidious.as_str()
        };
        thumbnail_html(frontend, thumb_origin, id, width, height, &thumb_size)
    } else {
        player_html(frontend, id, width, height)
    };

    Ok(html)
}

fn thumbnail_html(
    frontend: &str,
    thumb_origin: &str,
    id: &str,
    width: &str,
    height: &str,
    size: &str,
) -> String {
    let pad16 = " ".repeat(16);
    let pad20 = " ".repeat(20);
    let pad24 = " ".repeat(24);
    format!(
        "<a\n\
         {pad20}href=\"{frontend}/watch?v={id}\"\n\
         {pad16}class=\"youtube_video\" alt=\"YouTube Video\"\n\
         {pad16}title=\"Click to view on YouTube\"\n\
         {pad16}target=\"_blank\" rel=\"noopener noreferrer\">\n\
         {pad20}<img width=\"{width}\" height=\"{height}\"\n\
         {pad24}src=\"{thumb_origin}/vi/{id}/{size}default.jpg\">\n\
         {pad16}</a>"
    )
}

fn player_html(frontend: &str, id: &str, width: &str, height: &str) -> String {
    let pad16 = " ".repeat(16);
    let pad20 = " ".repeat(20);
    let pad24 = " ".repeat(24);
    format!(
        "<span class=\"videobox\">\n\
         {pad20}<iframe width=\"{width}\" height=\"{height}\"\n\
         {pad24}src='{frontend}/embed/{id}'\n\
         {pad24}frameborder='0' webkitAllowFullScreen\n\
         {pad24}mozallowfullscreen allowFullScreen>\n\
         {pad20}</iframe>\n\
         {pad16}</span>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lqt_config::TagConfig;
    use pretty_assertions::assert_eq;

    const THUMB: &str = r#"<a
                    href="https://www.youtube.com/watch?v=v78_WujMnVk"
                class="youtube_video" alt="YouTube Video"
                title="Click to view on YouTube"
                target="_blank" rel="noopener noreferrer">
                    <img width="1280" height="720"
                        src="https://img.youtube.com/vi/v78_WujMnVk/maxresdefault.jpg">
                </a>"#;

    const PLAYER: &str = r#"<span class="videobox">
                    <iframe width="640" height="390"
                        src='https://www.youtube.com/embed/v78_WujMnVk'
                        frameborder='0' webkitAllowFullScreen
                        mozallowfullscreen allowFullScreen>
                    </iframe>
                </span>"#;

    const INVIDIOUS_THUMB: &str = r#"<a
                    href="https://inv.example.com/watch?v=v78_WujMnVk"
                class="youtube_video" alt="YouTube Video"
                title="Click to view on YouTube"
                target="_blank" rel="noopener noreferrer">
                    <img width="1280" height="720"
                        src="https://inv.example.com/vi/v78_WujMnVk/maxresdefault.jpg">
                </a>"#;

    const INVIDIOUS_PLAYER: &str = r#"<span class="videobox">
                    <iframe width="640" height="390"
                        src='https://inv.example.com/embed/v78_WujMnVk'
                        frameborder='0' webkitAllowFullScreen
                        mozallowfullscreen allowFullScreen>
                    </iframe>
                </span>"#;

    fn render(markup: &str, thumb_only: bool, size: &str, invidious: &str) -> String {
        let config = TagConfig::default()
            .with("YOUTUBE_THUMB_ONLY", thumb_only)
            .with("YOUTUBE_THUMB_SIZE", size)
            .with("YOUTUBE_INVIDIOUS_INSTANCE", invidious);
        let mut ctx = EngineContext::new(config);
        youtube(&mut ctx, "youtube", markup).unwrap()
    }

    #[test]
    fn test_thumbnail() {
        assert_eq!(render("v78_WujMnVk", true, "maxres", ""), THUMB);
    }

    #[test]
    fn test_player() {
        assert_eq!(render("v78_WujMnVk", false, "maxres", ""), PLAYER);
    }

    #[test]
    fn test_invidious_thumbnail() {
        assert_eq!(
            render("v78_WujMnVk", true, "maxres", "https://inv.example.com"),
            INVIDIOUS_THUMB
        );
    }

    #[test]
    fn test_invidious_player() {
        assert_eq!(
            render("v78_WujMnVk", false, "maxres", "https://inv.example.com"),
            INVIDIOUS_PLAYER
        );
    }

    #[test]
    fn test_explicit_dimensions() {
        let html = render("dQw4w9WgXcQ 100% 480", false, "", "");
        assert!(html.contains(r#"<iframe width="100%" height="480""#));

        let html = render("dQw4w9WgXcQ 320 240", true, "hq", "");
        assert!(html.contains(r#"<img width="320" height="240""#));
        assert!(html.contains("/vi/dQw4w9WgXcQ/hqdefault.jpg"));
    }

    #[test]
    fn test_thumb_size_defaults_to_sd() {
        let html = render("dQw4w9WgXcQ", true, "", "");
        assert!(html.contains(r#"<img width="640" height="480""#));
        assert!(html.contains("/vi/dQw4w9WgXcQ/sddefault.jpg"));
    }

    #[test]
    fn test_unknown_thumb_size_keeps_default_dimensions() {
        let html = render("dQw4w9WgXcQ", true, "huge", "");
        assert!(html.contains(r#"<img width="640" height="390""#));
        assert!(html.contains("/vi/dQw4w9WgXcQ/hugedefault.jpg"));
    }

    #[test]
    fn test_single_dimension_ignored() {
        let html = render("dQw4w9WgXcQ 320", false, "", "");
        assert!(html.contains(r#"<iframe width="640" height="390""#));
        assert!(html.contains("/embed/dQw4w9WgXcQ'"));
    }

    #[test]
    fn test_missing_id_is_syntax_error() {
        let mut ctx = EngineContext::default();
        let err = youtube(&mut ctx, "youtube", "").unwrap_err();
        assert!(matches!(err, TagError::Syntax { .. }));
        assert!(err.to_string().contains(SYNTAX));
    }

    #[test]
    fn test_declare_config() {
        let mut registry = ConfigRegistry::new();
        declare_config(&mut registry);
        assert_eq!(
            registry.default_value("YOUTUBE_INVIDIOUS_INSTANCE").map(ToString::to_string),
            Some(String::new())
        );
    }
}
