//! JSON request client for the console backend.
//!
//! Every endpoint answers with an envelope `{code, data, message}` where
//! `code == 0` means success. [`ApiClient`] sends the request, checks the
//! HTTP status, unwraps the envelope and deserializes `data`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::query::{PageResult, SearchRequest};
use crate::sse::{subscribe, SseConfig, SseConnection, SseHandler};
use crate::traits::{Headers, HttpClient, HttpError, Response};

/// Envelope code of a successful response.
pub const SUCCESS_CODE: i64 = 0;

/// Response envelope shared by all backend endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: String,
}

/// Client for JSON endpoints under a base URL.
#[derive(Clone)]
pub struct ApiClient {
    http: Arc<dyn HttpClient>,
    stream_http: Arc<dyn HttpClient>,
    config: ClientConfig,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("token", &self.config.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ApiClient {
    /// Create a client using reqwest with the configured timeouts.
    ///
    /// SSE connections get their own transport without the request timeout.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = ReqwestHttpClient::from_config(&config).map_err(Self::build_error)?;
        let stream_http = ReqwestHttpClient::for_streaming(&config).map_err(Self::build_error)?;
        Ok(Self {
            http: Arc::new(http),
            stream_http: Arc::new(stream_http),
            config,
        })
    }

    /// Create a client over any transport, used for both requests and streams.
    pub fn with_http(http: Arc<dyn HttpClient>, config: ClientConfig) -> Self {
        Self {
            stream_http: http.clone(),
            http,
            config,
        }
    }

    fn build_error(err: HttpError) -> ClientError {
        ClientError::Config(format!("failed to build HTTP client: {}", err))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> Arc<dyn HttpClient> {
        self.http.clone()
    }

    /// A first-page request using the configured page size.
    pub fn search_request(&self) -> SearchRequest {
        SearchRequest::new(1, self.config.default_page_size)
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(auth) = self.config.authorization() {
            headers.insert("Authorization".to_string(), auth);
        }
        headers
    }

    fn url_with_query(&self, path: &str, query: &[(&str, &str)]) -> String {
        let mut url = self.config.url(path);
        if query.is_empty() {
            return url;
        }
        let encoded: Vec<String> = query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&encoded.join("&"));
        url
    }

    /// Check status and unwrap the envelope.
    fn unwrap_envelope<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        if !response.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(HttpError::ServerError {
                status: response.status,
                message,
            }
            .into());
        }

        let envelope: ApiEnvelope<serde_json::Value> = response.json()?;
        if envelope.code != SUCCESS_CODE {
            tracing::debug!("API error {}: {}", envelope.code, envelope.message);
            return Err(ClientError::Api {
                code: envelope.code,
                message: envelope.message,
            });
        }
        let data = envelope.data.unwrap_or(serde_json::Value::Null);
        Ok(serde_json::from_value(data)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> ClientResult<T> {
        let url = self.url_with_query(path, query);
        tracing::debug!("GET {}", url);
        let response = self.http.get(&url, &self.headers()).await?;
        Self::unwrap_envelope(response)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.url(path);
        let body = serde_json::to_string(body)?;
        tracing::debug!("POST {}", url);
        let response = self.http.post(&url, &body, &self.headers()).await?;
        Self::unwrap_envelope(response)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.url(path);
        let body = serde_json::to_string(body)?;
        tracing::debug!("PUT {}", url);
        let response = self.http.put(&url, &body, &self.headers()).await?;
        Self::unwrap_envelope(response)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.config.url(path);
        tracing::debug!("DELETE {}", url);
        let response = self.http.delete(&url, None, &self.headers()).await?;
        Self::unwrap_envelope(response)
    }

    /// DELETE with a JSON body, e.g. a list of ids.
    pub async fn delete_with<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.url(path);
        let body = serde_json::to_string(body)?;
        tracing::debug!("DELETE {}", url);
        let response = self.http.delete(&url, Some(&body), &self.headers()).await?;
        Self::unwrap_envelope(response)
    }

    /// POST a validated search request to a paged endpoint.
    pub async fn page<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &SearchRequest,
    ) -> ClientResult<PageResult<T>> {
        request.validate()?;
        self.post(path, request).await
    }

    /// POST a validated search request to an unpaged list endpoint.
    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &SearchRequest,
    ) -> ClientResult<Vec<T>> {
        request.validate()?;
        self.post(path, request).await
    }

    /// SSE config for `path` carrying the auth header.
    pub fn sse_config(
        &self,
        path: &str,
        on_message: impl FnMut(&str, &str) + Send + 'static,
    ) -> SseConfig {
        let mut config = SseConfig::new(self.config.url(path)).on_message(on_message);
        if let Some(auth) = self.config.authorization() {
            config = config.with_header("Authorization", auth);
        }
        config
    }

    /// Open an SSE connection to `path` over this client's stream transport.
    pub fn connect_sse<H: SseHandler>(&self, path: &str, handler: H) -> SseConnection {
        let mut headers = Headers::new();
        if let Some(auth) = self.config.authorization() {
            headers.insert("Authorization".to_string(), auth);
        }
        subscribe(self.stream_http.clone(), self.config.url(path), headers, handler)
    }
}
