//! Storage abstractions for the service layer
//!
//! `DocumentStore` decouples the HTTP layer from where documents live. The
//! file store is used in production; the memory store backs tests.

pub mod document_store;
pub mod file_store;
pub mod memory_store;

pub use document_store::{DocumentStore, LoadOutcome};
pub use file_store::FileDocumentStore;
pub use memory_store::MemoryDocumentStore;
