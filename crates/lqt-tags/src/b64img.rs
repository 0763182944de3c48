//! `b64img` tag: an image inlined as a base64 `data:` URI.
//!
//! ```text
//! {% b64img [class name(s)] [http[s]:/]/path/to/image [width [height]] [title text | "title text" ["alt text"]] %}
//! ```
//!
//! Remote images are fetched over HTTP, anything else is read from the local
//! filesystem relative to the working directory.

use std::sync::LazyLock;
use std::time::Duration;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use lqt_engine::{EngineContext, TagError};
use regex::Regex;
use ureq::Agent;

use crate::image::ImageAttrs;

/// Expected syntax of the `b64img` tag.
pub const SYNTAX: &str = r#"{% b64img [class name(s)] [http[s]:/]/path/to/image [width [height]] [title text | "title text" ["alt text"]] %}"#;

/// Timeout for fetching remote images.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

static B64IMG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<class>\S.*\s+)?(?P<src>(?:https?://|/|\S+/)\S+)(?:\s+(?P<width>\d+))?(?:\s+(?P<height>\d+))?(?P<title>\s+.+)?",
    )
    .unwrap()
});

static HTTP_AGENT: LazyLock<Agent> = LazyLock::new(|| create_agent(FETCH_TIMEOUT));

/// Create HTTP agent with the specified timeout.
fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Render a `b64img` tag.
///
/// # Errors
///
/// Returns [`TagError::Syntax`] if the markup has no image path and
/// [`TagError::Resource`] if the image cannot be read.
pub fn b64img(_ctx: &mut EngineContext, _tag: &str, markup: &str) -> Result<String, TagError> {
    let caps = B64IMG_PATTERN
        .captures(markup)
        .ok_or_else(|| TagError::syntax(SYNTAX))?;
    let mut attrs = ImageAttrs::from_captures(&caps);

    let data = read_image(&attrs.src)?;
    tracing::debug!(src = %attrs.src, bytes = data.len(), "Inlined image");
    attrs.src = format!("data:;base64,{}", BASE64_STANDARD.encode(&data));

    Ok(attrs.to_html())
}

/// URL to fetch for a remote `src`, `None` for a local path.
///
/// Protocol-relative URLs are fetched over HTTPS.
fn remote_url(src: &str) -> Option<String> {
    if src.starts_with("//") {
        Some(format!("https:{src}"))
    } else if src.contains("://") {
        Some(src.to_owned())
    } else {
        None
    }
}

fn read_image(src: &str) -> Result<Vec<u8>, TagError> {
    match remote_url(src) {
        Some(url) => fetch(&url),
        None => std::fs::read(src).map_err(|e| TagError::resource(src, e)),
    }
}

fn fetch(url: &str) -> Result<Vec<u8>, TagError> {
    let response = HTTP_AGENT
        .get(url)
        .call()
        .map_err(|e| TagError::resource(url, e))?;

    let status = response.status().as_u16();
    if status >= 400 {
        return Err(TagError::resource(url, format!("HTTP {status}")));
    }

    response
        .into_body()
        .read_to_vec()
        .map_err(|e| TagError::resource(url, e))
}
