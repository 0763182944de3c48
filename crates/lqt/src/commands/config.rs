//! `lqt config` command implementation.

use std::path::PathBuf;

use clap::Args;
use lqt_config::{ConfigRegistry, Settings, TagConfig};

use super::config_registry;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the config command.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to settings file (default: auto-discover liquid.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ConfigArgs {
    /// Execute the config command.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = Settings::load(self.config.as_deref(), None)?;
        match &settings.config_path {
            Some(path) => output.info(&format!("Settings: {}", path.display())),
            None => output.info("Settings: defaults (no liquid.toml found)"),
        }

        let registry = config_registry(&settings);
        let resolved = registry.resolve(&settings);
        for (name, value, help) in describe_options(&registry, &resolved) {
            output.highlight(&format!("{name} = {value}"));
            if !help.is_empty() {
                output.detail(&format!("    {help}"));
            }
        }

        Ok(())
    }
}

/// `(name, resolved value, help)` for every known option, in name order.
///
/// Values are shown quoted when they are strings.
fn describe_options<'a>(
    registry: &'a ConfigRegistry,
    resolved: &TagConfig,
) -> Vec<(&'a str, String, &'a str)> {
    registry
        .options()
        .map(|(name, default, help)| {
            let value = resolved.get(name).unwrap_or(default);
            let shown = match value.as_str() {
                Some(text) => format!("{text:?}"),
                None => value.to_string(),
            };
            (name, shown, help)
        })
        .collect()
}
