//! `lqt render` command implementation.

use std::borrow::Cow;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use lqt_config::{CliSettings, ConfigValue, Settings};
use lqt_engine::{EngineContext, HtmlStash, Preprocessor};
use pulldown_cmark::{CowStr, Event, Options, Parser};

use super::{config_registry, tag_registry};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to process (default: stdin).
    input: Option<PathBuf>,

    /// Path to settings file (default: auto-discover liquid.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comma-separated tags to enable (overrides liquid_tags).
    #[arg(long, value_delimiter = ',')]
    tags: Option<Vec<String>>,

    /// Set an option, e.g. `--set IMG_DEFAULT_LOADING=lazy` (repeatable).
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    values: Vec<(String, ConfigValue)>,

    /// Render the result to HTML.
    #[arg(long)]
    html: bool,

    /// Write the result to this file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if settings, input or output fail, or a tag fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            tags: self.tags,
            values: self.values,
        };
        let settings = Settings::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &settings.config_path {
            tracing::info!(path = %path.display(), "Loaded settings");
        }
        require_known_options(&settings, &cli_settings)?;

        let text = match &self.input {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                text
            }
        };

        let result = render_document(&text, &settings, self.html)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &result)?;
                output.info(&format!("Wrote {}", path.display()));
            }
            None => output.document(&result)?,
        }

        Ok(())
    }
}

/// Preprocess `text`, optionally rendering the result to HTML.
///
/// When rendering HTML, tag output is kept out of the Markdown renderer's
/// reach and restored afterwards. Inside code spans and blocks it is restored
/// before escaping, so it reads the same as without protection.
pub(crate) fn render_document(
    text: &str,
    settings: &Settings,
    html: bool,
) -> Result<String, CliError> {
    let tags = tag_registry(settings);
    let config = config_registry(settings).resolve(settings);
    let mut ctx = EngineContext::new(config);

    let preprocessed = Preprocessor::new(&tags)
        .protect_html(html)
        .run(text, &mut ctx)?;
    if !html {
        return Ok(preprocessed);
    }

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(&preprocessed, options).map(|event| match event {
        Event::Text(text) => Event::Text(restore_text(ctx.stash(), text)),
        Event::Code(text) => Event::Code(restore_text(ctx.stash(), text)),
        other => other,
    });
    let mut rendered = String::with_capacity(preprocessed.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut rendered, parser);
    ctx.restore(&mut rendered);
    Ok(rendered)
}

/// Substitute stashed fragments into text the renderer will escape.
fn restore_text<'a>(stash: &HtmlStash, text: CowStr<'a>) -> CowStr<'a> {
    let restored = match stash.restore_str(&text) {
        Cow::Borrowed(_) => None,
        Cow::Owned(restored) => Some(restored),
    };
    restored.map_or(text, CowStr::from)
}

/// Parse a `KEY=VALUE` option assignment.
fn parse_assignment(raw: &str) -> Result<(String, ConfigValue), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing option name in '{raw}'"));
    }
    Ok((name.to_owned(), ConfigValue::parse_literal(value)))
}

/// Reject `--set` options that no tag or `liquid_configs` entry declares.
fn require_known_options(settings: &Settings, cli_settings: &CliSettings) -> Result<(), CliError> {
    let registry = config_registry(settings);
    let unknown: Vec<&str> = cli_settings
        .values
        .iter()
        .map(|(name, _)| name.as_str())
        .filter(|name| !registry.contains(name))
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(CliError::Validation(format!(
            "Unknown option(s): {} (run `lqt config` for the list)",
            unknown.join(", ")
        )))
    }
}
