use async_trait::async_trait;
use serde_json::Value;

use crate::document::Document;
use crate::errors::StoreError;

/// Result of reading a document, keeping apart the cases a masked load
/// collapses into the default value.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Stored(Value),
    Absent,
    /// Present but not valid JSON.
    Corrupt { reason: String },
    /// Present but could not be read (permissions, I/O).
    Unreadable { reason: String },
}

impl LoadOutcome {
    /// The stored value, or the document default for every other outcome.
    pub fn into_value_or_default(self, document: Document) -> Value {
        match self {
            LoadOutcome::Stored(v) => v,
            _ => document.default_value(),
        }
    }

    /// Like `into_value_or_default` for an absent document, but corrupt or
    /// unreadable content is an error.
    pub fn into_strict(self, document: Document) -> Result<Value, StoreError> {
        match self {
            LoadOutcome::Stored(v) => Ok(v),
            LoadOutcome::Absent => Ok(document.default_value()),
            LoadOutcome::Corrupt { reason } => Err(StoreError::Corrupt { document, reason }),
            LoadOutcome::Unreadable { reason } => Err(StoreError::Unavailable(reason)),
        }
    }

    pub fn is_stored(&self) -> bool {
        matches!(self, LoadOutcome::Stored(_))
    }
}

/// Whole-document storage keyed by [`Document`].
/// Implementations can be file-backed or in-memory.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Make the backing location usable. Must tolerate being called again.
    async fn prepare(&self) -> Result<(), StoreError>;
    async fn exists(&self, document: Document) -> Result<bool, StoreError>;
    async fn get(&self, document: Document) -> LoadOutcome;
    /// Replace the document with `value`, pretty-printed with 2-space indent.
    async fn put(&self, document: Document, value: &Value) -> Result<(), StoreError>;
}
