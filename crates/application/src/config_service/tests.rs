use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use stagecraft_core::{AppError, AppResult};
use stagecraft_domain::{Screen, ScreenConfig};

use crate::config_ports::{ConfigDocumentStore, deep_merge};
use crate::config_service::ConfigService;

struct FakeDocumentStore {
    documents: Mutex<HashMap<String, Value>>,
    failing_key: Option<String>,
}

impl FakeDocumentStore {
    fn new() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            failing_key: None,
        }
    }

    fn failing_writes_on(key: &str) -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            failing_key: Some(key.to_owned()),
        }
    }
}

#[async_trait]
impl ConfigDocumentStore for FakeDocumentStore {
    async fn read_document(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.documents.lock().await.get(key).cloned())
    }

    async fn write_document(&self, key: &str, document: Value) -> AppResult<()> {
        if self.failing_key.as_deref() == Some(key) {
            return Err(AppError::Store(format!("write to '{key}' refused")));
        }

        self.documents.lock().await.insert(key.to_owned(), document);
        Ok(())
    }

    async fn merge_document(&self, key: &str, patch: Value) -> AppResult<()> {
        let mut documents = self.documents.lock().await;
        match documents.get_mut(key) {
            Some(existing) => deep_merge(existing, patch),
            None => {
                documents.insert(key.to_owned(), patch);
            }
        }
        Ok(())
    }

    async fn delete_document(&self, key: &str) -> AppResult<()> {
        self.documents.lock().await.remove(key);
        Ok(())
    }

    async fn list_document_keys(&self) -> AppResult<Vec<String>> {
        Ok(self.documents.lock().await.keys().cloned().collect())
    }
}

fn build_service(store: Arc<FakeDocumentStore>) -> ConfigService {
    ConfigService::new(store)
}

#[tokio::test]
async fn fetch_reports_missing_documents_as_not_found() {
    let service = build_service(Arc::new(FakeDocumentStore::new()));

    let error = match service.fetch(Screen::Login).await {
        Err(error) => error,
        Ok(_) => unreachable!(),
    };

    assert!(matches!(error, AppError::NotFound(_)));
    assert!(error.to_string().contains("login"));
}

#[tokio::test]
async fn fetch_decodes_seeded_documents() {
    let service = build_service(Arc::new(FakeDocumentStore::new()));
    assert!(service.import_initial_configuration().await.is_ok());

    let config = match service.fetch(Screen::Splash).await {
        Ok(ScreenConfig::Splash(config)) => config,
        _ => unreachable!(),
    };

    assert_eq!(config.text(), Some("Stagecraft"));
    assert_eq!(config.duration(), Some(2.0));
}

#[tokio::test]
async fn fetch_surfaces_decode_errors_with_screen_context() {
    let store = Arc::new(FakeDocumentStore::new());
    let service = build_service(store.clone());
    assert!(
        store
            .write_document("login", json!({"title": "Welcome back"}))
            .await
            .is_ok()
    );

    let error = match service.fetch(Screen::Login).await {
        Err(error) => error,
        Ok(_) => unreachable!(),
    };

    assert!(matches!(error, AppError::Decode(_)));
    assert!(error.to_string().contains("config/login"));
}

#[tokio::test]
async fn ensure_imports_only_when_the_store_is_empty() {
    let service = build_service(Arc::new(FakeDocumentStore::new()));

    assert!(!service.check_initial_configuration().await.unwrap_or(true));
    assert_eq!(service.ensure_initial_configuration().await.ok(), Some(true));
    assert!(service.check_initial_configuration().await.unwrap_or(false));
    assert_eq!(
        service.ensure_initial_configuration().await.ok(),
        Some(false)
    );
}

#[tokio::test]
async fn import_writes_one_document_per_screen() {
    let store = Arc::new(FakeDocumentStore::new());
    let service = build_service(store.clone());

    assert!(service.import_initial_configuration().await.is_ok());

    let mut keys = store.list_document_keys().await.unwrap_or_default();
    keys.sort();
    assert_eq!(
        keys,
        vec!["home", "login", "onboarding", "registration", "splash"]
    );
}

#[tokio::test]
async fn import_failure_names_the_failed_key_and_keeps_earlier_documents() {
    let store = Arc::new(FakeDocumentStore::failing_writes_on("registration"));
    let service = build_service(store.clone());

    let error = match service.import_initial_configuration().await {
        Err(error) => error,
        Ok(()) => unreachable!(),
    };

    assert!(matches!(error, AppError::Import(_)));
    assert!(error.to_string().contains("registration"));

    // Documents seeded before the failure stay written.
    let documents = store.documents.lock().await;
    assert!(documents.contains_key("splash"));
    assert!(documents.contains_key("onboarding"));
    assert!(documents.contains_key("login"));
    assert!(!documents.contains_key("registration"));
    assert!(!documents.contains_key("home"));
}

#[tokio::test]
async fn update_config_rejects_non_object_partials() {
    let service = build_service(Arc::new(FakeDocumentStore::new()));

    let result = service.update_config(Screen::Splash, json!(2.0)).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn update_config_preserves_unspecified_fields() {
    let service = build_service(Arc::new(FakeDocumentStore::new()));
    assert!(service.import_initial_configuration().await.is_ok());

    let result = service
        .update_config(Screen::Splash, json!({"text": "See you next year"}))
        .await;
    assert!(result.is_ok());

    let config = match service.fetch_splash().await {
        Ok(config) => config,
        Err(_) => unreachable!(),
    };

    assert_eq!(config.text(), Some("See you next year"));
    assert_eq!(config.background_color(), "#101828");
    assert_eq!(config.duration(), Some(2.0));
}

#[tokio::test]
async fn update_config_replaces_arrays_wholesale() {
    let service = build_service(Arc::new(FakeDocumentStore::new()));
    assert!(service.import_initial_configuration().await.is_ok());

    let replacement_pages = json!({
        "pages": [{
            "id": "only",
            "imageURL": "https://cdn.stagecraft.dev/onboarding/only.png",
            "title": "One page",
            "description": "A single page replaces the whole list."
        }]
    });
    assert!(
        service
            .update_config(Screen::Onboarding, replacement_pages)
            .await
            .is_ok()
    );

    let config = match service.fetch_onboarding().await {
        Ok(config) => config,
        Err(_) => unreachable!(),
    };

    assert_eq!(config.pages().len(), 1);
    assert_eq!(config.pages()[0].id(), "only");
    // The sibling keys of the replaced array are untouched.
    assert!(config.show_skip_button());
}

#[tokio::test]
async fn reset_to_defaults_restores_seed_content_and_drops_extra_keys() {
    let store = Arc::new(FakeDocumentStore::new());
    let service = build_service(store.clone());
    assert!(service.import_initial_configuration().await.is_ok());
    assert!(
        service
            .update_config(Screen::Splash, json!({"text": "Edited"}))
            .await
            .is_ok()
    );
    assert!(
        store
            .write_document("experimental", json!({"enabled": true}))
            .await
            .is_ok()
    );

    assert!(service.reset_to_defaults().await.is_ok());

    let mut keys = store.list_document_keys().await.unwrap_or_default();
    keys.sort();
    assert_eq!(
        keys,
        vec!["home", "login", "onboarding", "registration", "splash"]
    );

    let config = match service.fetch_splash().await {
        Ok(config) => config,
        Err(_) => unreachable!(),
    };
    assert_eq!(config.text(), Some("Stagecraft"));
}

#[tokio::test]
async fn load_bundle_fails_when_any_document_is_missing() {
    let store = Arc::new(FakeDocumentStore::new());
    let service = build_service(store.clone());
    assert!(service.import_initial_configuration().await.is_ok());
    assert!(store.delete_document("home").await.is_ok());

    let error = match service.load_bundle().await {
        Err(error) => error,
        Ok(_) => unreachable!(),
    };

    assert!(matches!(error, AppError::NotFound(_)));
    assert!(error.to_string().contains("home"));
}

#[tokio::test]
async fn load_bundle_returns_every_screen() {
    let service = build_service(Arc::new(FakeDocumentStore::new()));
    assert!(service.import_initial_configuration().await.is_ok());

    let bundle = match service.load_bundle().await {
        Ok(bundle) => bundle,
        Err(_) => unreachable!(),
    };

    assert_eq!(bundle.splash().text(), Some("Stagecraft"));
    assert_eq!(bundle.onboarding().pages().len(), 3);
    assert_eq!(bundle.login().fields_in_order().len(), 2);
    assert_eq!(bundle.registration().fields_in_order().len(), 3);
    assert_eq!(
        bundle.home().tracks_config().initial_selection(),
        Some("ai")
    );
}
