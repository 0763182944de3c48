//! Tag registry: tag name to handler.
//!
//! Registration is append/overwrite only. A later registration for the same
//! name replaces the earlier one and logs a warning, so a host can shadow a
//! built-in tag with its own.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

use crate::{EngineContext, TagError};

/// Handler for one tag name.
///
/// Receives the pass context, the tag name it was invoked as, and the
/// trimmed argument string. Returns the replacement text for the marker.
///
/// Any `Fn(&mut EngineContext, &str, &str) -> Result<String, TagError>` that is
/// `Send + Sync` is a handler, so plain functions can be registered directly.
///
/// # Example
///
/// ```
/// use lqt_engine::{EngineContext, TagError, TagHandler};
///
/// fn kbd(_ctx: &mut EngineContext, _tag: &str, markup: &str) -> Result<String, TagError> {
///     Ok(format!("<kbd>{markup}</kbd>"))
/// }
///
/// let mut ctx = EngineContext::default();
/// assert_eq!(kbd.render(&mut ctx, "kbd", "Ctrl+C").unwrap(), "<kbd>Ctrl+C</kbd>");
/// ```
pub trait TagHandler: Send + Sync {
    /// Produce the replacement for one marker.
    fn render(&self, ctx: &mut EngineContext, tag: &str, markup: &str) -> Result<String, TagError>;
}

impl<F> TagHandler for F
where
    F: Fn(&mut EngineContext, &str, &str) -> Result<String, TagError> + Send + Sync,
{
    fn render(&self, ctx: &mut EngineContext, tag: &str, markup: &str) -> Result<String, TagError> {
        self(ctx, tag, markup)
    }
}

/// Mapping from tag name to handler.
///
/// # Example
///
/// ```
/// use lqt_engine::{EngineContext, TagError, TagRegistry};
///
/// fn shout(_ctx: &mut EngineContext, _tag: &str, markup: &str) -> Result<String, TagError> {
///     Ok(markup.to_uppercase())
/// }
///
/// let mut registry = TagRegistry::new();
/// registry.register("shout", shout);
///
/// assert!(registry.lookup("shout").is_some());
/// assert!(registry.lookup("Shout").is_none());
/// ```
#[derive(Default)]
pub struct TagRegistry {
    handlers: HashMap<String, Arc<dyn TagHandler>>,
}

impl TagRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name` and return it.
    ///
    /// If `name` is already registered, logs a warning and replaces the
    /// previous handler.
    pub fn register<H>(&mut self, name: impl Into<String>, handler: H) -> Arc<dyn TagHandler>
    where
        H: TagHandler + 'static,
    {
        let name = name.into();
        let handler: Arc<dyn TagHandler> = Arc::new(handler);

        if self.handlers.contains_key(&name) {
            tracing::warn!(tag = %name, "Overriding tag '{name}'");
        } else {
            tracing::debug!(tag = %name, "Registered tag");
        }

        self.handlers.insert(name, Arc::clone(&handler));
        handler
    }

    /// Look up the handler registered for `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn TagHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Whether a handler is registered for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered tag names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no tags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagRegistry")
            .field("tags", &self.names())
            .finish()
    }
}

static GLOBAL_REGISTRY: LazyLock<RwLock<TagRegistry>> =
    LazyLock::new(|| RwLock::new(TagRegistry::new()));

/// Process-wide tag registry.
///
/// Register every tag at startup, before the first document pass; passes then
/// only take read locks.
pub fn global() -> &'static RwLock<TagRegistry> {
    &GLOBAL_REGISTRY
}
