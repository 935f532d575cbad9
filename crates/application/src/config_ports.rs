use async_trait::async_trait;
use serde_json::Value;

use stagecraft_core::AppResult;

/// Key-addressed JSON document store holding one document per screen.
///
/// Keys are the screen document keys; the adapter decides where the
/// collection physically lives.
#[async_trait]
pub trait ConfigDocumentStore: Send + Sync {
    /// Returns the document stored under `key`, or `None` when absent.
    async fn read_document(&self, key: &str) -> AppResult<Option<Value>>;

    /// Writes `document` under `key`, replacing any previous content.
    async fn write_document(&self, key: &str, document: Value) -> AppResult<()>;

    /// Deep-merges `patch` into the document under `key`, creating the
    /// document when absent. Merge semantics follow [`deep_merge`].
    async fn merge_document(&self, key: &str, patch: Value) -> AppResult<()>;

    /// Deletes the document under `key`; deleting an absent key succeeds.
    async fn delete_document(&self, key: &str) -> AppResult<()>;

    /// Lists every key currently holding a document.
    async fn list_document_keys(&self) -> AppResult<Vec<String>>;
}

/// Deep-merges `patch` into `target`.
///
/// Objects merge key by key, recursing into nested objects; arrays and
/// scalars replace the existing value wholesale, as does a non-object patch.
pub fn deep_merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (slot, incoming) => *slot = incoming,
    }
}
