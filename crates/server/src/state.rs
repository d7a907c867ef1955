use std::sync::Arc;

use service::storage::DocumentStore;
use service::DocumentService;

#[derive(Clone)]
pub struct AppState {
    pub documents: DocumentService,
}

impl AppState {
    pub fn new(documents: DocumentService) -> Self {
        Self { documents }
    }

    pub fn from_store(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(DocumentService::new(store))
    }
}
