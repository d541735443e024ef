use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the conversion library.
///
/// Recoverable conditions (unreachable reference sources, records with bad
/// timestamps, unresolved names) are not errors: they degrade to empty data
/// and are reported through logging or the unresolved-items report.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("schema violation at {path}: {message} (rule: {rule})")]
    Validation {
        path: String,
        message: String,
        rule: String,
    },

    #[error("invalid schema: {0}")]
    Schema(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
