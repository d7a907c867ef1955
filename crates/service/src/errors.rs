use std::path::PathBuf;

use thiserror::Error;

use crate::document::Document;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("{document} is corrupt: {reason}")]
    Corrupt { document: Document, reason: String },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
