//! CLI error types.

use lqt_config::ConfigError;
use lqt_engine::PreprocessError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Preprocess(#[from] PreprocessError),

    #[error("{0}")]
    Validation(String),
}
