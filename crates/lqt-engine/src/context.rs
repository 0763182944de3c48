//! Per-pass engine context.

use lqt_config::TagConfig;

use crate::HtmlStash;

/// Context handed to every handler invoked during one document pass.
///
/// The configuration is read-only to handlers; the stash is pass-local and
/// may be written. Create one context per document pass and never share it
/// between concurrent passes.
///
/// # Example
///
/// ```
/// use lqt_config::TagConfig;
/// use lqt_engine::EngineContext;
///
/// let ctx = EngineContext::new(TagConfig::default().with("IMG_DEFAULT_LOADING", "lazy"));
/// assert_eq!(ctx.config().get_string("IMG_DEFAULT_LOADING"), "lazy");
/// ```
#[derive(Debug, Default)]
pub struct EngineContext {
    config: TagConfig,
    stash: HtmlStash,
}

impl EngineContext {
    /// Create a context for one pass with the resolved configuration.
    #[must_use]
    pub fn new(config: TagConfig) -> Self {
        Self {
            config,
            stash: HtmlStash::new(),
        }
    }

    /// Resolved configuration for this pass.
    #[must_use]
    pub fn config(&self) -> &TagConfig {
        &self.config
    }

    /// HTML stash for this pass.
    #[must_use]
    pub fn stash(&self) -> &HtmlStash {
        &self.stash
    }

    /// Mutable HTML stash for this pass.
    pub fn stash_mut(&mut self) -> &mut HtmlStash {
        &mut self.stash
    }

    /// Substitute stashed fragments back into `html`.
    ///
    /// Call after the host has finished transforming the preprocessed text.
    pub fn restore(&self, html: &mut String) {
        self.stash.restore(html);
    }
}
