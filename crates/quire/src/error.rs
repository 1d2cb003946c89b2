//! CLI error types.

use quire_book::BookError;
use quire_config::ConfigError;
use quire_output::GenerateError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Book(#[from] BookError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
