//! Configuration management for liquid-style tags.
//!
//! Two layers:
//!
//! - [`ConfigRegistry`] knows every option with its default and help text.
//!   It is seeded with the core options, then extended by tag modules and by
//!   the host's `liquid_configs` declarations.
//! - [`Settings`] is the host's `liquid.toml`: which tags to enable, extra
//!   option declarations, and option values.
//!
//! [`ConfigRegistry::resolve`] combines both into the [`TagConfig`] that tag
//! handlers read during a document pass.
//!
//! ## Environment Variable Expansion
//!
//! String values in `[settings]` and `liquid_configs` defaults support
//! environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;
mod registry;
mod settings;
mod value;

use std::path::PathBuf;

pub use registry::{ConfigRegistry, TagConfig};
pub use settings::{CliSettings, ConfigDeclaration, Settings};
pub use value::ConfigValue;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Settings file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Settings field path (e.g., "`settings.GIPHY_API_KEY`").
        field: String,
        /// Error message (e.g., "${`GIPHY_KEY`} not set").
        message: String,
    },
}
