//! Service layer for the document store.
//! - `document` names the four documents and their defaults.
//! - `storage` abstracts where documents live (filesystem or memory).
//! - `documents` holds the startup, save, load and clear-all operations.

pub mod errors;
pub mod document;
pub mod storage;
pub mod documents;

pub use document::Document;
pub use documents::{DocumentService, InitReport};
pub use errors::StoreError;
pub use storage::{DocumentStore, LoadOutcome};
