use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use uuid::Uuid;

use crate::document::Document;
use crate::errors::StoreError;
use crate::storage::document_store::{DocumentStore, LoadOutcome};

/// JSON file-backed document store.
///
/// Each document is one file inside `dir`. Writes land in a uniquely named
/// sibling and are renamed over the target, so a reader or a racing writer
/// sees either the old or the new content in full.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    dir: PathBuf,
}

impl FileDocumentStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, document: Document) -> PathBuf {
        self.dir.join(document.file_name())
    }

    async fn replace(&self, target: &Path, document: Document, bytes: &[u8]) -> Result<(), StoreError> {
        let tmp = self.dir.join(format!(".{}.{}.tmp", document.file_name(), Uuid::new_v4()));
        write_then_rename(&tmp, target, bytes).await
    }
}

/// Write `bytes` to `tmp` and rename it over `target`. On any failure the
/// temporary file is removed, whether it was partially written or complete.
async fn write_then_rename(tmp: &Path, target: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let result = match fs::write(tmp, bytes).await {
        Ok(()) => fs::rename(tmp, target).await.map_err(|e| StoreError::io(target, e)),
        Err(e) => Err(StoreError::io(tmp, e)),
    };
    if result.is_err() {
        let _ = fs::remove_file(tmp).await;
    }
    result
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn prepare(&self) -> Result<(), StoreError> {
        let dir = self.dir.to_string_lossy();
        common::env::ensure_data_dir(&dir)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    async fn exists(&self, document: Document) -> Result<bool, StoreError> {
        let path = self.path_of(document);
        fs::try_exists(&path).await.map_err(|e| StoreError::io(path, e))
    }

    async fn get(&self, document: Document) -> LoadOutcome {
        let bytes = match fs::read(self.path_of(document)).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return LoadOutcome::Absent,
            Err(e) => return LoadOutcome::Unreadable { reason: e.to_string() },
        };
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(v) => LoadOutcome::Stored(v),
            Err(e) => LoadOutcome::Corrupt { reason: e.to_string() },
        }
    }

    async fn put(&self, document: Document, value: &Value) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(value)?;
        self.replace(&self.path_of(document), document, &data).await
    }
}
