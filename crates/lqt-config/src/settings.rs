//! Host settings loaded from `liquid.toml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{ConfigError, ConfigRegistry, ConfigValue, expand};

/// Settings filename to search for.
const SETTINGS_FILENAME: &str = "liquid.toml";

/// Accepted values for `IMG_DEFAULT_LOADING`.
const LOADING_VALUES: &[&str] = &["lazy", "eager"];

/// CLI settings that override settings file values.
///
/// All fields are optional. Only non-None values override the loaded settings.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the list of enabled tags.
    pub tags: Option<Vec<String>>,
    /// Extra option values, applied after the file's `[settings]` table.
    pub values: Vec<(String, ConfigValue)>,
}

/// A host-declared configuration option.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ConfigDeclaration {
    /// Option name (upper-case identifier).
    pub name: String,
    /// Default value.
    #[serde(default)]
    pub default: ConfigValue,
    /// Human-readable help text.
    #[serde(default)]
    pub help: String,
}

/// Host settings.
///
/// ```toml
/// liquid_tags = ["img", "youtube"]
///
/// [settings]
/// IMG_DEFAULT_LOADING = "lazy"
///
/// [[liquid_configs]]
/// name = "SITENAME"
/// default = "Default Sitename"
/// help = "The name of the site"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Names of the tags to enable.
    pub liquid_tags: Vec<String>,
    /// Extra options declared by the host.
    pub liquid_configs: Vec<ConfigDeclaration>,
    /// Option values from the `[settings]` table.
    #[serde(rename = "settings")]
    pub values: BTreeMap<String, ConfigValue>,

    /// Path to the settings file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise, searches
    /// for `liquid.toml` in the current directory and its parents, falling back
    /// to empty settings.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, parsing or
    /// expansion fails, or the final settings are invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut settings = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {SETTINGS_FILENAME} found, using defaults");
            Self::default()
        };

        if let Some(cli) = cli_settings {
            settings.apply_cli_settings(cli);
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or environment expansion fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut settings: Self = toml::from_str(content)?;
        settings.expand_env_vars()?;
        Ok(settings)
    }

    /// Declare the host's `liquid_configs` options in `registry`.
    pub fn declare_into(&self, registry: &mut ConfigRegistry) {
        for decl in &self.liquid_configs {
            registry.declare(decl.name.clone(), decl.default.clone(), decl.help.clone());
        }
    }

    /// Validate settings values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for decl in &self.liquid_configs {
            require_option_name(&decl.name)?;
            if decl.name == "IMG_DEFAULT_LOADING" {
                require_loading(&decl.default)?;
            }
        }

        if let Some(loading) = self.values.get("IMG_DEFAULT_LOADING") {
            require_loading(loading)?;
        }

        Ok(())
    }

    fn apply_cli_settings(&mut self, cli: &CliSettings) {
        if let Some(tags) = &cli.tags {
            self.liquid_tags.clone_from(tags);
        }
        for (name, value) in &cli.values {
            self.values.insert(name.clone(), value.clone());
        }
    }

    /// Search for the settings file in the current directory and parents.
    fn discover() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(SETTINGS_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        for (name, value) in &mut self.values {
            if let ConfigValue::String(s) = value {
                *s = expand::expand_env(s, &format!("settings.{name}"))?;
            }
        }

        for decl in &mut self.liquid_configs {
            if let ConfigValue::String(s) = &mut decl.default {
                *s = expand::expand_env(s, &format!("liquid_configs.{}", decl.name))?;
            }
        }

        Ok(())
    }
}

/// Require a `loading` attribute value; empty means unset.
fn require_loading(value: &ConfigValue) -> Result<(), ConfigError> {
    let loading = value.as_text();
    if loading.is_empty() || LOADING_VALUES.contains(&loading.as_str()) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "IMG_DEFAULT_LOADING must be one of {}, got \"{loading}\"",
            LOADING_VALUES.join(", ")
        )))
    }
}

/// Require an option name to be an upper-case identifier.
fn require_option_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "liquid_configs entry name cannot be empty".to_owned(),
        ));
    }

    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_uppercase() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');

    if !valid_start || !valid_rest {
        return Err(ConfigError::Validation(format!(
            "liquid_configs entry name \"{name}\" must be an upper-case identifier"
        )));
    }

    Ok(())
}
