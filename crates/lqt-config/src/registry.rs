//! Configuration registry and resolved tag configuration.

use std::collections::BTreeMap;

use crate::{ConfigValue, Settings};

/// Core options and their defaults, as `(name, default, help)`.
const CORE_OPTIONS: &[(&str, CoreDefault, &str)] = &[
    (
        "CODE_DIR",
        CoreDefault::Str("code"),
        "Code directory for include_code subplugin",
    ),
    (
        "NOTEBOOK_DIR",
        CoreDefault::Str("notebooks"),
        "Notebook directory for notebook subplugin",
    ),
    (
        "FLICKR_API_KEY",
        CoreDefault::Str("flickr"),
        "Flickr key for accessing the API",
    ),
    (
        "GIPHY_API_KEY",
        CoreDefault::Str("giphy"),
        "Giphy key for accessing the API",
    ),
    (
        "IMG_DEFAULT_LOADING",
        CoreDefault::Str("eager"),
        "The default loading method of images (eager or lazy)",
    ),
    (
        "YOUTUBE_THUMB_ONLY",
        CoreDefault::Bool(false),
        "Embed a linked thumbnail instead 1MB of JS code",
    ),
    (
        "YOUTUBE_THUMB_SIZE",
        CoreDefault::Str(""),
        "Thumbnail dimensions maxres/sd (default)/hq/mq",
    ),
];

#[derive(Clone, Copy)]
enum CoreDefault {
    Str(&'static str),
    Bool(bool),
}

impl From<CoreDefault> for ConfigValue {
    fn from(value: CoreDefault) -> Self {
        match value {
            CoreDefault::Str(s) => Self::from(s),
            CoreDefault::Bool(b) => Self::Bool(b),
        }
    }
}

/// Registry of known configuration options.
///
/// Holds two parallel mappings: option name to default value, and option name
/// to help text. The registry is seeded with the core options and extended by
/// tag modules and host declarations before any document is processed. It is
/// read-only during a processing pass.
///
/// # Example
///
/// ```
/// use lqt_config::{ConfigRegistry, ConfigValue, Settings};
///
/// let mut registry = ConfigRegistry::core();
/// registry.declare("SITENAME", "Default Sitename", "The name of the site");
///
/// let config = registry.resolve(&Settings::default());
/// assert_eq!(config.get_string("SITENAME"), "Default Sitename");
/// assert_eq!(config.get_string("IMG_DEFAULT_LOADING"), "eager");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigRegistry {
    defaults: BTreeMap<String, ConfigValue>,
    help: BTreeMap<String, String>,
}

impl ConfigRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the core options.
    #[must_use]
    pub fn core() -> Self {
        let mut registry = Self::new();
        for &(name, default, help) in CORE_OPTIONS {
            registry.declare(name, default, help);
        }
        registry
    }

    /// Declare an option with its default value and help text.
    ///
    /// Re-declaring an option replaces both its default and its help text.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        default: impl Into<ConfigValue>,
        help: impl Into<String>,
    ) {
        let name = name.into();
        self.help.insert(name.clone(), help.into());
        self.defaults.insert(name, default.into());
    }

    /// Whether an option is known.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.defaults.contains_key(name)
    }

    /// Default value of an option.
    #[must_use]
    pub fn default_value(&self, name: &str) -> Option<&ConfigValue> {
        self.defaults.get(name)
    }

    /// Help text of an option.
    #[must_use]
    pub fn help(&self, name: &str) -> Option<&str> {
        self.help.get(name).map(String::as_str)
    }

    /// Iterate over `(name, default, help)` in name order.
    pub fn options(&self) -> impl Iterator<Item = (&str, &ConfigValue, &str)> {
        self.defaults.iter().map(|(name, default)| {
            let help = self.help.get(name).map_or("", String::as_str);
            (name.as_str(), default, help)
        })
    }

    /// Number of known options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    /// Whether no options are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    /// Resolve the configuration for a processing pass.
    ///
    /// Starts from the registered defaults and applies the host settings
    /// values. Values for options the registry does not know are ignored.
    #[must_use]
    pub fn resolve(&self, settings: &Settings) -> TagConfig {
        let mut values = self.defaults.clone();

        for (name, value) in &settings.values {
            if self.contains(name) {
                values.insert(name.clone(), value.clone());
            } else {
                tracing::debug!(option = %name, "Ignoring setting not declared by any tag");
            }
        }

        TagConfig { values }
    }
}

/// Resolved configuration handed to tag handlers.
///
/// Lookups of unknown options behave as empty values, so handlers can treat
/// "unset" and "empty" alike.
///
/// # Example
///
/// ```
/// use lqt_config::TagConfig;
///
/// let config = TagConfig::default()
///     .with("YOUTUBE_THUMB_ONLY", true)
///     .with("YOUTUBE_THUMB_SIZE", "maxres");
///
/// assert!(config.is_enabled("YOUTUBE_THUMB_ONLY"));
/// assert_eq!(config.get_string("YOUTUBE_THUMB_SIZE"), "maxres");
/// assert_eq!(config.get_string("YOUTUBE_INVIDIOUS_INSTANCE"), "");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagConfig {
    values: BTreeMap<String, ConfigValue>,
}

impl TagConfig {
    /// Set an option, returning the updated configuration.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Raw value of an option.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.values.get(name)
    }

    /// Textual value of an option, empty when unset.
    #[must_use]
    pub fn get_string(&self, name: &str) -> String {
        self.values
            .get(name)
            .map(ConfigValue::as_text)
            .unwrap_or_default()
    }

    /// Whether an option is set to a truthy value.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(ConfigValue::is_truthy)
    }

    /// Iterate over all resolved options in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
