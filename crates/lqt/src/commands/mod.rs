//! CLI command implementations.

pub(crate) mod config;
pub(crate) mod render;
pub(crate) mod tags;

pub(crate) use config::ConfigArgs;
pub(crate) use render::RenderArgs;
pub(crate) use tags::TagsArgs;

use lqt_config::{ConfigRegistry, Settings};
use lqt_engine::TagRegistry;

/// Option registry for `settings`: core options, options read by the
/// built-in tags, and the host's `liquid_configs` declarations.
pub(crate) fn config_registry(settings: &Settings) -> ConfigRegistry {
    let mut registry = ConfigRegistry::core();
    lqt_tags::declare_config(&mut registry);
    settings.declare_into(&mut registry);
    registry
}

/// Tag registry for `settings`.
///
/// Registers the tags named in `liquid_tags`, or every built-in tag when the
/// list is empty.
pub(crate) fn tag_registry(settings: &Settings) -> TagRegistry {
    let mut registry = TagRegistry::new();
    if settings.liquid_tags.is_empty() {
        lqt_tags::register_all(&mut registry);
    } else {
        lqt_tags::register_tags(&mut registry, &settings.liquid_tags);
    }
    registry
}
