//! Client configuration.
//!
//! Built with the builder pattern or loaded from the environment.

use std::time::Duration;

use crate::query::DEFAULT_PAGE_SIZE;

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

pub const ENV_BASE_URL: &str = "CONSOLE_API_BASE_URL";
pub const ENV_TOKEN: &str = "CONSOLE_API_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "CONSOLE_API_TIMEOUT_SECS";
pub const ENV_PAGE_SIZE: &str = "CONSOLE_API_PAGE_SIZE";

/// Configuration for [`ApiClient`](crate::api::ApiClient) and the HTTP
/// transport.
///
/// # Example
///
/// ```
/// use console_client::config::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_base_url("https://console.example.com/api")
///     .with_token("secret")
///     .with_connect_timeout(Duration::from_secs(5));
/// assert_eq!(config.url("/user/page"), "https://console.example.com/api/user/page");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL that relative paths are joined to
    pub base_url: String,
    /// Bearer token sent with every request, if set
    pub token: Option<String>,
    /// TCP connect timeout (default: none)
    pub connect_timeout: Option<Duration>,
    /// Whole-request timeout for buffered requests; SSE streams ignore it (default: none)
    pub request_timeout: Option<Duration>,
    /// Page size for requests built by the client (default: 20)
    pub default_page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            connect_timeout: None,
            request_timeout: None,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size;
        self
    }

    /// Load from `CONSOLE_API_*` environment variables on top of the
    /// defaults.
    pub fn from_env() -> Self {
        Self::default().merge_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Unparseable numbers are logged and
    /// ignored.
    pub fn merge_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = non_empty(ENV_BASE_URL) {
            self = self.with_base_url(url);
        }
        if let Some(token) = non_empty(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(raw) = non_empty(ENV_TIMEOUT_SECS) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => {
                    self.request_timeout = Some(Duration::from_secs(secs));
                }
                _ => tracing::warn!("Ignoring invalid {}={:?}", ENV_TIMEOUT_SECS, raw),
            }
        }
        if let Some(raw) = non_empty(ENV_PAGE_SIZE) {
            match raw.parse::<u32>() {
                Ok(size) if size > 0 => self.default_page_size = size,
                _ => tracing::warn!("Ignoring invalid {}={:?}", ENV_PAGE_SIZE, raw),
            }
        }
        self
    }

    /// Resolve `path` against the base URL. Absolute URLs pass through.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if path.is_empty() {
            return base.to_string();
        }
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// `Authorization` header value, if a token is configured.
    pub fn authorization(&self) -> Option<String> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("Bearer {}", t))
    }
}
