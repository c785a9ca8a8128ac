use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("invalid collection config: {0}")]
    Config(String),
    #[error("failed to extract {path:?}: {reason}")]
    Extraction { path: PathBuf, reason: String },
    #[error("embedding backend error: {0}")]
    Embedding(String),
    #[error("unsupported input format: {0:?}")]
    UnsupportedInput(PathBuf),
    #[error("other: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SiftError>;

impl From<anyhow::Error> for SiftError {
    fn from(value: anyhow::Error) -> Self {
        Self::Other(value.to_string())
    }
}
