//! HTTP utilities for the infractl client.
//!
//! This module wraps `reqwest` with the request handling shared by every
//! control plane call: base URL resolution, authorization and default
//! headers, and translation of error responses into `ApiError`.

use crate::client::ApiError;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, trace};

/// Configuration for HTTP requests with common settings
#[derive(Debug, Clone)]
pub struct HttpRequestConfig {
    /// Base URL for the API, without a trailing slash
    pub base_url: String,
    /// Default headers to include with all requests
    pub default_headers: HashMap<String, String>,
    /// Request timeout
    pub timeout: Duration,
    /// Bearer token attached to every request, if set
    pub access_token: Option<String>,
}

impl Default for HttpRequestConfig {
    fn default() -> Self {
        Self {
            base_url: crate::configuration::DEFAULT_ENDPOINT.to_string(),
            default_headers: default_headers(),
            timeout: Duration::from_secs(60),
            access_token: None,
        }
    }
}

fn default_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert(
        "User-Agent".to_string(),
        format!("infractl/{}", env!("CARGO_PKG_VERSION")),
    );
    headers
}

impl HttpRequestConfig {
    pub fn from_configuration(
        configuration: &crate::configuration::Configuration,
    ) -> Result<Self, crate::configuration::ConfigurationError> {
        let endpoint = configuration.endpoint()?;

        Ok(Self {
            base_url: endpoint.as_str().trim_end_matches('/').to_string(),
            default_headers: default_headers(),
            timeout: configuration.request_timeout(),
            access_token: configuration.access_token().map(str::to_string),
        })
    }
}

/// Error document returned by the control plane on failed requests
#[derive(Debug, Deserialize)]
struct ErrorDocument {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// HTTP client wrapper with common request handling logic
#[derive(Clone)]
pub struct HttpClient {
    client: Arc<Client>,
    config: HttpRequestConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpRequestConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    /// Get a reference to the HTTP client configuration
    pub fn config(&self) -> &HttpRequestConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    pub async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.execute_request(self.client.get(self.url(path))).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute_request(self.client.get(self.url(path)).query(query))
            .await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute_request(self.client.post(self.url(path)).json(body))
            .await
    }

    /// POST without a request body, used for actions such as start and stop
    pub async fn post_action<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.execute_request(self.client.post(self.url(path))).await
    }

    pub async fn delete<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.execute_request(self.client.delete(self.url(path))).await
    }

    /// Execute an HTTP request with common error handling and optional authentication
    async fn execute_request<T>(&self, mut request: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        if let Some(token) = &self.config.access_token {
            request = request.bearer_auth(token);
        }

        for (key, value) in &self.config.default_headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        let status = response.status();
        trace!("Response status: {}", status);

        if status.is_success() {
            let response_text = response.text().await?;
            trace!("Raw response text for deserialization: {}", response_text);

            serde_json::from_str::<T>(&response_text).map_err(|e| {
                error!(
                    "Failed to deserialize response: {}. Raw response: {}",
                    e, response_text
                );
                ApiError::JsonError(e)
            })
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    async fn error_from_response(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        debug!("Request failed with status {}: {}", status, body);

        match serde_json::from_str::<ErrorDocument>(&body) {
            Ok(document) if !document.message.is_empty() || !document.code.is_empty() => {
                ApiError::Server {
                    status,
                    code: document.code,
                    message: document.message,
                }
            }
            _ => ApiError::Status { status },
        }
    }
}
