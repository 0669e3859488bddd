use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{keys, ConfigStore};
use crate::{Result, TestkitError};

/// Thin HTTP helper for API-level assertions alongside browser tests.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// A fully-read HTTP response: status plus body text.
///
/// The body is read eagerly so decode failures can quote it.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    status: u16,
    body: String,
}

impl ApiClient {
    /// Creates a client rooted at `base_url`. A trailing slash is trimmed so
    /// paths like `/users` join cleanly.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Creates a client rooted at the configured `API_URL`.
    pub fn from_config(config: &ConfigStore) -> Result<Self> {
        Ok(Self::new(config.get(keys::API_URL)?))
    }

    /// Sends a GET request to `path`.
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(Method::GET, path, None::<&()>).await
    }

    /// Sends a POST request with a JSON body.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// Sends a PUT request with a JSON body.
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.send(Method::PUT, path, Some(body)).await
    }

    /// Sends a PATCH request with a JSON body.
    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.send(Method::PATCH, path, Some(body)).await
    }

    /// Sends a DELETE request to `path`.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.send(Method::DELETE, path, None::<&()>).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse> {
        let url = format!("{}{path}", self.base_url);
        info!("{method} {url}");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(TestkitError::Transport)?;
        let status = response.status().as_u16();
        debug!("response status: {status}");
        let body = response.text().await.map_err(TestkitError::Transport)?;

        Ok(ApiResponse { status, body })
    }
}

impl ApiResponse {
    /// HTTP status code of the response.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Asserts the status code, failing with
    /// [`TestkitError::StatusMismatch`] otherwise.
    pub fn ensure_status(&self, expected: u16) -> Result<&Self> {
        if self.status != expected {
            return Err(TestkitError::StatusMismatch {
                expected,
                actual: self.status,
            });
        }
        Ok(self)
    }

    /// Decodes the body as JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|err| {
            TestkitError::Decode(format!("invalid JSON body: {err}; body: {}", self.body))
        })
    }

    /// Raw body text.
    pub fn text(&self) -> &str {
        &self.body
    }
}
