use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::document::Document;
use crate::errors::StoreError;
use crate::storage::document_store::{DocumentStore, LoadOutcome};

/// In-memory document store keeping the serialized text of each document.
///
/// Raw text can be injected to simulate a damaged file, and the store can be
/// switched to unavailable to simulate failing writes.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    docs: RwLock<HashMap<Document, String>>,
    unavailable: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` verbatim, bypassing serialization.
    pub async fn insert_raw(&self, document: Document, text: impl Into<String>) {
        self.docs.write().await.insert(document, text.into());
    }

    pub async fn raw(&self, document: Document) -> Option<String> {
        self.docs.read().await.get(&document).cloned()
    }

    pub async fn remove(&self, document: Document) -> bool {
        self.docs.write().await.remove(&document).is_some()
    }

    /// When set, `prepare` and `put` fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store marked unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn prepare(&self) -> Result<(), StoreError> {
        self.check_available()
    }

    async fn exists(&self, document: Document) -> Result<bool, StoreError> {
        Ok(self.docs.read().await.contains_key(&document))
    }

    async fn get(&self, document: Document) -> LoadOutcome {
        let docs = self.docs.read().await;
        match docs.get(&document) {
            None => LoadOutcome::Absent,
            Some(text) => match serde_json::from_str::<Value>(text) {
                Ok(v) => LoadOutcome::Stored(v),
                Err(e) => LoadOutcome::Corrupt { reason: e.to_string() },
            },
        }
    }

    async fn put(&self, document: Document, value: &Value) -> Result<(), StoreError> {
        self.check_available()?;
        let text = serde_json::to_string_pretty(value)?;
        self.docs.write().await.insert(document, text);
        Ok(())
    }
}
