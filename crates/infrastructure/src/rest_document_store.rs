//! Configuration document store backed by a remote REST document service.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use stagecraft_application::ConfigDocumentStore;
use stagecraft_core::{AppError, AppResult};
use url::Url;

/// Connection settings for the remote document service.
#[derive(Clone)]
pub struct RestDocumentStoreConfig {
    /// Service base URL, for example `https://config.example.com/v1`.
    pub base_url: String,
    /// Collection the screen documents live under.
    pub collection: String,
    /// Bearer token sent with every request, when the service requires one.
    pub bearer_token: Option<String>,
}

/// Document store speaking plain JSON over HTTPS.
///
/// Layout is one document per key below the collection path:
/// `GET {base}/{collection}` lists keys, `GET {base}/{collection}/{key}`
/// returns one document, `PUT` replaces it, `PATCH` merges into it and
/// `DELETE` removes it.
pub struct RestDocumentStore {
    http_client: reqwest::Client,
    base: Url,
    collection: String,
    bearer_token: Option<String>,
}

impl RestDocumentStore {
    /// Creates a store for the given service.
    ///
    /// # Errors
    /// Returns a validation error when the base URL does not parse or
    /// cannot carry path segments.
    pub fn new(http_client: reqwest::Client, config: RestDocumentStoreConfig) -> AppResult<Self> {
        let base = Url::parse(&config.base_url).map_err(|error| {
            AppError::Validation(format!(
                "invalid configuration store URL '{}': {error}",
                config.base_url
            ))
        })?;
        if base.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "configuration store URL '{}' cannot carry a collection path",
                config.base_url
            )));
        }

        Ok(Self {
            http_client,
            base,
            collection: config.collection,
            bearer_token: config.bearer_token,
        })
    }

    fn collection_url(&self) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&self.collection);
        }
        url
    }

    fn document_url(&self, key: &str) -> Url {
        let mut url = self.collection_url();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(key);
        }
        url
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> AppResult<reqwest::Response> {
        self.authorize(builder).send().await.map_err(|error| {
            AppError::Store(format!("configuration store request failed: {error}"))
        })
    }
}

async fn status_error(operation: &str, key: &str, response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<response body unavailable>".to_owned());
    AppError::Store(format!(
        "{operation} '{key}' failed with status {status}: {body}"
    ))
}

#[derive(Deserialize)]
struct KeyListBody {
    keys: Vec<String>,
}

#[async_trait]
impl ConfigDocumentStore for RestDocumentStore {
    async fn read_document(&self, key: &str) -> AppResult<Option<Value>> {
        let response = self
            .send(self.http_client.get(self.document_url(key)))
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(status_error("reading document", key, response).await);
        }

        let document = response.json::<Value>().await.map_err(|error| {
            AppError::Decode(format!("document '{key}' is not valid JSON: {error}"))
        })?;
        Ok(Some(document))
    }

    async fn write_document(&self, key: &str, document: Value) -> AppResult<()> {
        let response = self
            .send(self.http_client.put(self.document_url(key)).json(&document))
            .await?;

        if !response.status().is_success() {
            return Err(status_error("writing document", key, response).await);
        }
        Ok(())
    }

    async fn merge_document(&self, key: &str, patch: Value) -> AppResult<()> {
        let response = self
            .send(self.http_client.patch(self.document_url(key)).json(&patch))
            .await?;

        // Services without the document report 404 on PATCH; merging into an
        // absent key means creating it.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return self.write_document(key, patch).await;
        }
        if !response.status().is_success() {
            return Err(status_error("merging document", key, response).await);
        }
        Ok(())
    }

    async fn delete_document(&self, key: &str) -> AppResult<()> {
        let response = self
            .send(self.http_client.delete(self.document_url(key)))
            .await?;

        // Deleting an absent key is a success, per the port contract.
        if response.status() == reqwest::StatusCode::NOT_FOUND
            || response.status().is_success()
        {
            return Ok(());
        }
        Err(status_error("deleting document", key, response).await)
    }

    async fn list_document_keys(&self) -> AppResult<Vec<String>> {
        let response = self.send(self.http_client.get(self.collection_url())).await?;

        if !response.status().is_success() {
            return Err(status_error("listing documents in", &self.collection, response).await);
        }

        let body = response.json::<KeyListBody>().await.map_err(|error| {
            AppError::Decode(format!(
                "document list for '{}' is not valid JSON: {error}",
                self.collection
            ))
        })?;
        Ok(body.keys)
    }
}
