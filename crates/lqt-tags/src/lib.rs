//! Built-in liquid-style tags.
//!
//! | tag       | output                                              |
//! |-----------|-----------------------------------------------------|
//! | `img`     | `<img>` element with class, size, title and alt     |
//! | `b64img`  | `<img>` with the image inlined as a `data:` URI     |
//! | `youtube` | embedded player or linked thumbnail                 |
//! | `generic` | value of a configuration option                     |
//!
//! # Example
//!
//! ```
//! use lqt_config::{ConfigRegistry, Settings};
//! use lqt_engine::{EngineContext, Preprocessor, TagRegistry};
//!
//! let mut config = ConfigRegistry::core();
//! lqt_tags::declare_config(&mut config);
//!
//! let mut tags = TagRegistry::new();
//! lqt_tags::register_tags(&mut tags, &["img"]);
//!
//! let mut ctx = EngineContext::new(config.resolve(&Settings::default()));
//! let html = Preprocessor::new(&tags)
//!     .run("{% img /images/ninja.png %}", &mut ctx)
//!     .unwrap();
//! assert_eq!(html, r#"<img src="/images/ninja.png">"#);
//! ```

mod b64img;
mod generic;
mod image;
mod img;
mod youtube;

use lqt_config::ConfigRegistry;
use lqt_engine::TagRegistry;

pub use b64img::b64img;
pub use generic::generic;
pub use img::img;
pub use youtube::youtube;

/// Names of all built-in tags.
pub const BUILTIN_TAGS: &[&str] = &["b64img", "generic", "img", "youtube"];

/// Register one built-in tag by name.
///
/// Returns `false` if there is no built-in tag of that name.
pub fn register_tag(registry: &mut TagRegistry, name: &str) -> bool {
    match name {
        "b64img" => registry.register(name, b64img),
        "generic" => registry.register(name, generic),
        "img" => registry.register(name, img),
        "youtube" => registry.register(name, youtube),
        _ => return false,
    };
    true
}

/// Register the built-in tags listed in `names`.
///
/// Names without a built-in tag are skipped with a warning.
pub fn register_tags<S: AsRef<str>>(registry: &mut TagRegistry, names: &[S]) {
    for name in names {
        let name = name.as_ref();
        if !register_tag(registry, name) {
            tracing::warn!(tag = name, "Could not load liquid_tag '{name}'");
        }
    }
}

/// Register every built-in tag.
pub fn register_all(registry: &mut TagRegistry) {
    register_tags(registry, BUILTIN_TAGS);
}

/// Declare the configuration options read by built-in tags beyond the core set.
pub fn declare_config(registry: &mut ConfigRegistry) {
    youtube::declare_config(registry);
}
