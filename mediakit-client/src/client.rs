//! Media Services HTTP Client
//!
//! Thin OData transport: builds URLs and headers, sends one request per call
//! and decodes the verbose JSON envelopes. Entity semantics live in the
//! service layer.

use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{check_response, json_with_limit, MediaError};
use crate::odata::{entity_path, CollectionEnvelope, EntityEnvelope, ListOptions};

/// Shared HTTP client for requests built without explicit configuration (connection pooling)
/// Redirects are disabled; a redirect surfaces as a service error instead.
static SHARED_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build Media Services shared HTTP client")
});

/// OData partial-update verb.
static MERGE: LazyLock<Method> =
    LazyLock::new(|| Method::from_bytes(b"MERGE").expect("MERGE is a valid method token"));

const ODATA_VERBOSE_JSON: &str = "application/json;odata=verbose";
const ODATA_VERSION: &str = "3.0";
const DATA_SERVICE_VERSION: &str = "dataserviceversion";
const MAX_DATA_SERVICE_VERSION: &str = "maxdataserviceversion";
const X_MS_VERSION: &str = "x-ms-version";
const DEFAULT_API_VERSION: &str = "2.19";

/// Media Services HTTP Client
#[derive(Clone)]
pub struct MediaClient {
    endpoint: String,
    access_token: Option<String>,
    api_version: String,
    client: Client,
}

impl MediaClient {
    /// Create a new client for `endpoint` (reuses shared connection pool)
    pub fn new(endpoint: impl Into<String>) -> Result<Self, MediaError> {
        Ok(Self {
            endpoint: normalize_endpoint(endpoint.into())?,
            access_token: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            client: SHARED_CLIENT.clone(),
        })
    }

    /// Create a new client with a bearer token (reuses shared connection pool)
    pub fn with_token(
        endpoint: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, MediaError> {
        let mut client = Self::new(endpoint)?;
        client.set_token(token);
        Ok(client)
    }

    /// Create a client with its own connection pool, honoring configured timeouts
    pub fn from_config(config: &ClientConfig) -> Result<Self, MediaError> {
        config
            .validate()
            .map_err(|errors| MediaError::InvalidConfig(errors.join("; ")))?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .pool_max_idle_per_host(10)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| MediaError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: normalize_endpoint(config.endpoint.clone())?,
            access_token: config.access_token.clone().filter(|t| !t.is_empty()),
            api_version: config.api_version.clone(),
            client,
        })
    }

    /// Set bearer token
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    /// Get endpoint (without trailing slash)
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Check if client has a bearer token
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Build request headers
    fn build_headers(&self) -> Result<HeaderMap, MediaError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ODATA_VERBOSE_JSON));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(ODATA_VERBOSE_JSON));
        headers.insert(DATA_SERVICE_VERSION, HeaderValue::from_static(ODATA_VERSION));
        headers.insert(MAX_DATA_SERVICE_VERSION, HeaderValue::from_static(ODATA_VERSION));
        headers.insert(X_MS_VERSION, HeaderValue::from_str(&self.api_version)?);

        if let Some(ref token) = self.access_token {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
        }

        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }

    /// Send one request and map non-2xx answers to [`MediaError::Service`]
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<reqwest::Response, MediaError> {
        let url = self.url(path);
        debug!(method = %method, %path, "Media service request");

        let mut request = self
            .client
            .request(method, &url)
            .headers(self.build_headers()?);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        check_response(response).await
    }

    /// `GET /<set>('<id>')`
    pub(crate) async fn get_entity<T: DeserializeOwned>(
        &self,
        entity_set: &str,
        id: &str,
    ) -> Result<T, MediaError> {
        let response = self
            .send::<()>(Method::GET, &entity_path(entity_set, id), &[], None)
            .await?;
        let envelope: EntityEnvelope<T> = json_with_limit(response).await?;
        Ok(envelope.d)
    }

    /// `GET /<set>` with optional OData query options
    pub(crate) async fn list_entities<T: DeserializeOwned>(
        &self,
        entity_set: &str,
        options: Option<&ListOptions>,
    ) -> Result<Vec<T>, MediaError> {
        let query = options.map(ListOptions::query_pairs).unwrap_or_default();
        let response = self
            .send::<()>(Method::GET, entity_set, &query, None)
            .await?;
        let envelope: CollectionEnvelope<T> = json_with_limit(response).await?;
        Ok(envelope.d.results)
    }

    /// `POST /<set>`, returning the created entity
    pub(crate) async fn create_entity<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        entity_set: &str,
        body: &B,
    ) -> Result<T, MediaError> {
        let response = self
            .send(Method::POST, entity_set, &[], Some(body))
            .await?;
        let envelope: EntityEnvelope<T> = json_with_limit(response).await?;
        Ok(envelope.d)
    }

    /// `MERGE /<set>('<id>')`; only the fields present in `body` change
    pub(crate) async fn merge_entity<B: Serialize + ?Sized>(
        &self,
        entity_set: &str,
        id: &str,
        body: &B,
    ) -> Result<(), MediaError> {
        self.send(MERGE.clone(), &entity_path(entity_set, id), &[], Some(body))
            .await?;
        Ok(())
    }

    /// `DELETE /<set>('<id>')`
    pub(crate) async fn delete_entity(&self, entity_set: &str, id: &str) -> Result<(), MediaError> {
        self.send::<()>(Method::DELETE, &entity_path(entity_set, id), &[], None)
            .await?;
        Ok(())
    }
}

impl fmt::Debug for MediaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaClient")
            .field("endpoint", &self.endpoint)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

/// Validate the endpoint and strip trailing slashes
fn normalize_endpoint(endpoint: String) -> Result<String, MediaError> {
    let trimmed = endpoint.trim().trim_end_matches('/');
    let url = url::Url::parse(trimmed)
        .map_err(|e| MediaError::InvalidConfig(format!("Invalid endpoint '{endpoint}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(MediaError::InvalidConfig(format!(
            "Endpoint must use http or https: {endpoint}"
        )));
    }
    Ok(trimmed.to_string())
}
