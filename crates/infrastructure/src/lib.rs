//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod file_preference_store;
mod in_memory_auth_gateway;
mod in_memory_document_store;
mod rest_document_store;

pub use file_preference_store::FilePreferenceStore;
pub use in_memory_auth_gateway::InMemoryAuthGateway;
pub use in_memory_document_store::InMemoryDocumentStore;
pub use rest_document_store::{RestDocumentStore, RestDocumentStoreConfig};
