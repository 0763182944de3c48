//! `lqt tags` command implementation.

use std::path::PathBuf;

use clap::Args;
use lqt_config::Settings;

use super::tag_registry;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tags command.
#[derive(Args)]
pub(crate) struct TagsArgs {
    /// Path to settings file (default: auto-discover liquid.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl TagsArgs {
    /// Execute the tags command.
    ///
    /// Lists every built-in tag and marks the ones the settings enable.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = Settings::load(self.config.as_deref(), None)?;
        let enabled = tag_registry(&settings);

        for name in lqt_tags::BUILTIN_TAGS {
            if enabled.contains(name) {
                output.highlight(&format!("* {name}"));
            } else {
                output.line(&format!("  {name}"));
            }
        }

        Ok(())
    }
}
