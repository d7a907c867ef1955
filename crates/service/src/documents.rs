use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::document::Document;
use crate::errors::StoreError;
use crate::storage::{DocumentStore, LoadOutcome};

/// What the startup initialization did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InitReport {
    /// False when the store could not be prepared; the service keeps running.
    pub storage_ready: bool,
    pub created: Vec<Document>,
    pub failed: Vec<Document>,
}

/// Save/load/clear operations over a [`DocumentStore`].
///
/// Every call is a single attempt against the store. There is no locking
/// between requests; concurrent saves to one document are last-write-wins.
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Prepare the store, then write the default of every absent document.
    /// Existing documents are left untouched. Nothing here is fatal.
    pub async fn initialize(&self) -> InitReport {
        let mut report = InitReport { storage_ready: true, ..Default::default() };

        if let Err(e) = self.store.prepare().await {
            warn!(event = "storage_prepare_failed", error = %e, "data directory already exists or could not be created");
            report.storage_ready = false;
        }

        for document in Document::ALL {
            match self.store.exists(document).await {
                Ok(true) => {}
                Ok(false) => match self.store.put(document, &document.default_value()).await {
                    Ok(()) => {
                        info!(event = "document_created", document = %document, file = document.file_name(), "created document with default value");
                        report.created.push(document);
                    }
                    Err(e) => {
                        error!(event = "document_create_failed", document = %document, error = %e, "failed to create document");
                        report.failed.push(document);
                    }
                },
                Err(e) => {
                    error!(event = "document_probe_failed", document = %document, error = %e, "cannot check document presence");
                    report.failed.push(document);
                }
            }
        }
        report
    }

    /// Replace the whole document with `value`.
    pub async fn save(&self, document: Document, value: &Value) -> Result<(), StoreError> {
        self.store.put(document, value).await.map_err(|e| {
            error!(event = "save_failed", document = %document, error = %e, "error saving {}", document.label());
            e
        })
    }

    /// Stored value, or the document default when it is absent, unreadable or corrupt.
    pub async fn load(&self, document: Document) -> Value {
        let outcome = self.load_outcome(document).await;
        match &outcome {
            LoadOutcome::Stored(_) => {}
            LoadOutcome::Absent => {
                debug!(event = "load_defaulted", document = %document, "document absent, returning default");
            }
            LoadOutcome::Corrupt { reason } | LoadOutcome::Unreadable { reason } => {
                error!(event = "load_failed", document = %document, error = %reason, "error loading {}", document.label());
            }
        }
        outcome.into_value_or_default(document)
    }

    pub async fn load_outcome(&self, document: Document) -> LoadOutcome {
        self.store.get(document).await
    }

    /// Like [`load`](Self::load) but corrupt or unreadable documents are errors.
    pub async fn load_strict(&self, document: Document) -> Result<Value, StoreError> {
        self.load_outcome(document).await.into_strict(document)
    }

    /// Overwrite every document with `[]`, in catalogue order, stopping at
    /// the first failure. Documents written before the failure stay cleared.
    pub async fn clear_all(&self) -> Result<(), StoreError> {
        for document in Document::ALL {
            if let Err(e) = self.store.put(document, &document.cleared_value()).await {
                error!(event = "clear_failed", document = %document, error = %e, "error clearing data");
                return Err(e);
            }
        }
        info!(event = "cleared", "all documents cleared");
        Ok(())
    }
}
