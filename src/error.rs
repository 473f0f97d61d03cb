use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RiskError>;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid row at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    #[error("dataset is missing required column `{0}`")]
    MissingColumn(String),

    #[error("backup {} does not match the original dataset", path.display())]
    BackupMismatch { path: PathBuf },

    #[error("failed to decode model spec: {0}")]
    ModelDecode(#[from] prost::DecodeError),

    #[error("model spec has no description block")]
    MissingDescription,

    #[error("no model spec found at {}", path.display())]
    ModelNotFound { path: PathBuf },

    #[error("invalid weight tables: {0}")]
    Weights(String),

    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl RiskError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RiskError::Io {
            path: path.into(),
            source,
        }
    }
}
