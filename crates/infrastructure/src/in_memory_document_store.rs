use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use stagecraft_application::{ConfigDocumentStore, deep_merge};
use stagecraft_core::AppResult;
use tokio::sync::RwLock;

/// In-memory configuration document store.
///
/// Backs tests and offline development; contents do not survive the process.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<String, Value>>,
}

impl InMemoryDocumentStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigDocumentStore for InMemoryDocumentStore {
    async fn read_document(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn write_document(&self, key: &str, document: Value) -> AppResult<()> {
        self.documents
            .write()
            .await
            .insert(key.to_owned(), document);
        Ok(())
    }

    async fn merge_document(&self, key: &str, patch: Value) -> AppResult<()> {
        let mut documents = self.documents.write().await;
        match documents.get_mut(key) {
            Some(existing) => deep_merge(existing, patch),
            None => {
                documents.insert(key.to_owned(), patch);
            }
        }

        Ok(())
    }

    async fn delete_document(&self, key: &str) -> AppResult<()> {
        self.documents.write().await.remove(key);
        Ok(())
    }

    async fn list_document_keys(&self) -> AppResult<Vec<String>> {
        let mut keys: Vec<String> = self.documents.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests;
