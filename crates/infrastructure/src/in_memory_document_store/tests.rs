use serde_json::json;
use stagecraft_application::ConfigDocumentStore;

use super::InMemoryDocumentStore;

#[tokio::test]
async fn read_returns_none_for_missing_keys() {
    let store = InMemoryDocumentStore::new();

    let read = store.read_document("splash").await;
    assert!(read.is_ok());
    assert!(read.unwrap_or_default().is_none());
}

#[tokio::test]
async fn write_then_read_round_trips() {
    let store = InMemoryDocumentStore::new();

    let write = store
        .write_document("splash", json!({"showImage": true}))
        .await;
    assert!(write.is_ok());

    let read = store.read_document("splash").await;
    assert!(read.is_ok());
    assert_eq!(
        read.unwrap_or_default(),
        Some(json!({"showImage": true}))
    );
}

#[tokio::test]
async fn merge_patches_nested_objects_in_place() {
    let store = InMemoryDocumentStore::new();

    let write = store
        .write_document(
            "home",
            json!({"welcomeText": "Hello", "webLink": {"url": "https://a", "text": "A"}}),
        )
        .await;
    assert!(write.is_ok());

    let merge = store
        .merge_document("home", json!({"webLink": {"text": "B"}}))
        .await;
    assert!(merge.is_ok());

    let read = store.read_document("home").await;
    assert!(read.is_ok());
    assert_eq!(
        read.unwrap_or_default(),
        Some(json!({"welcomeText": "Hello", "webLink": {"url": "https://a", "text": "B"}}))
    );
}

#[tokio::test]
async fn merge_into_a_missing_key_creates_the_document() {
    let store = InMemoryDocumentStore::new();

    let merge = store.merge_document("login", json!({"title": "Hi"})).await;
    assert!(merge.is_ok());

    let read = store.read_document("login").await;
    assert!(read.is_ok());
    assert_eq!(read.unwrap_or_default(), Some(json!({"title": "Hi"})));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let store = InMemoryDocumentStore::new();

    let write = store.write_document("splash", json!({})).await;
    assert!(write.is_ok());

    assert!(store.delete_document("splash").await.is_ok());
    assert!(store.delete_document("splash").await.is_ok());

    let read = store.read_document("splash").await;
    assert!(read.is_ok());
    assert!(read.unwrap_or_default().is_none());
}

#[tokio::test]
async fn keys_are_listed_sorted() {
    let store = InMemoryDocumentStore::new();

    for key in ["splash", "home", "login"] {
        let write = store.write_document(key, json!({})).await;
        assert!(write.is_ok());
    }

    let keys = store.list_document_keys().await;
    assert!(keys.is_ok());
    assert_eq!(keys.unwrap_or_default(), vec!["home", "login", "splash"]);
}
