//! Wistia API client.
//!
//! Low-level HTTP transport that handles authentication and raw requests.
//! Entity types call back into it for lookups, saves and deletes.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{Result, WistiaError};

pub(crate) const DEFAULT_API_URL: &str = "https://api.wistia.com/v1/";
const USER_AGENT: &str = concat!("wistia/", env!("CARGO_PKG_VERSION"));

/// Username sent with every request; the API key is the password.
const API_USERNAME: &str = "api";

/// Low-level Wistia API client.
///
/// Sends authenticated requests (HTTP basic auth, username `api`, password
/// = API key) and decodes JSON response bodies. Entities such as
/// [`Project`](crate::Project) and [`Media`](crate::Media) keep a clone of
/// the client so they can complete themselves lazily.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use wistia::WistiaClient;
///
/// # fn example() -> wistia::Result<()> {
/// // Create from environment variables
/// let client = WistiaClient::from_env()?;
///
/// // Or configure manually
/// let client = WistiaClient::new("your-api-key", "https://api.wistia.com/v1")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct WistiaClient {
    http: Client,
    base_url: Arc<Url>,
    api_key: Arc<str>,
}

impl std::fmt::Debug for WistiaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WistiaClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl WistiaClient {
    /// Create a client from environment variables.
    ///
    /// Uses `WISTIA_API_KEY` for authentication and optionally `WISTIA_API_URL`
    /// for the base URL (defaults to `https://api.wistia.com/v1/`).
    ///
    /// # Errors
    ///
    /// Returns an error if `WISTIA_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("WISTIA_API_KEY").map_err(|_| {
            WistiaError::ConfigMissing("WISTIA_API_KEY environment variable not set".to_string())
        })?;

        let base_url =
            env::var("WISTIA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&api_key, &base_url)
    }

    /// Create a client against the public Wistia API.
    pub fn with_api_key(api_key: &str) -> Result<Self> {
        Self::new(api_key, DEFAULT_API_URL)
    }

    /// Create a new client with the provided API key and base URL.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Wistia API password
    /// * `base_url` - Base URL for the Wistia API (e.g., `https://api.wistia.com/v1`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(WistiaError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            api_key: Arc::from(api_key),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the API key this client authenticates with.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Make a request and decode its JSON body.
    ///
    /// `path` is relative to the API root (e.g. `projects.json`). Parameters
    /// go into the query string for GET and DELETE, and into a
    /// form-url-encoded body for POST and PUT.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses and undecodable bodies are
    /// reported as [`WistiaError::HttpError`], [`WistiaError::ApiError`] and
    /// [`WistiaError::ParseError`] respectively.
    #[tracing::instrument(skip(self, params))]
    pub async fn call<P: Serialize + ?Sized>(
        &self,
        path: &str,
        method: Method,
        params: Option<&P>,
    ) -> Result<Value> {
        let url = self.base_url.join(path)?;
        let sends_body = method == Method::POST || method == Method::PUT;

        let mut request = self
            .http
            .request(method, url)
            .basic_auth(API_USERNAME, Some(&*self.api_key));

        if let Some(params) = params {
            request = if sends_body {
                request.form(params)
            } else {
                request.query(params)
            };
        }

        let response = request.send().await.map_err(WistiaError::HttpError)?;
        let response = Self::check_response(response).await?;

        let body = response.text().await.map_err(WistiaError::HttpError)?;
        let value = serde_json::from_str(&body)?;
        Ok(value)
    }

    /// Make a GET request.
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.call::<()>(path, Method::GET, None).await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Value> {
        self.call(path, Method::GET, Some(query)).await
    }

    /// Make a POST request with a form body.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.call(path, Method::POST, Some(body)).await
    }

    /// Make a PUT request with a form body.
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.call(path, Method::PUT, Some(body)).await
    }

    /// Make a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.call::<()>(path, Method::DELETE, None).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(WistiaError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        tracing::debug!(status = status.as_u16(), %message, "Wistia API request failed");
        Err(WistiaError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // Try to parse as JSON and extract message field
        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            if let Some(msg) = json.get("error").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = WistiaClient::new("test-key", "https://api.wistia.com/v1").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("WistiaClient"));
        assert!(debug.contains("base_url"));
        // Key should not be in debug output
        assert!(!debug.contains("test-key"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = WistiaClient::new("key", "https://api.wistia.com/v1").unwrap();
        let client2 = WistiaClient::new("key", "https://api.wistia.com/v1/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_default_base_url() {
        let client = WistiaClient::with_api_key("key").unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.wistia.com/v1/");
        assert_eq!(
            client.base_url().join("projects.json").unwrap().as_str(),
            "https://api.wistia.com/v1/projects.json"
        );
    }
}
