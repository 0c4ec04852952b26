//! Shared HTTP client for the REST backend.

use std::sync::Arc;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use secrecy::ExposeSecret;
use serde_json::Value;
use url::Url;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// REST backend client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct RestClient {
    inner: Arc<RestClientInner>,
}

struct RestClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl RestClient {
    /// Create a new REST client.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.token {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| ApiError::InvalidRequest(format!("Invalid API token format: {e}")))?;
            auth_value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, auth_value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(RestClientInner {
                client: builder.build()?,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Base URL every path is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve a relative path against the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRequest` if the path does not form a valid URL.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidRequest(format!("Invalid path '{path}': {e}")))
    }

    /// Execute a GET request.
    pub(crate) async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.url(path)?;
        let response = self.inner.client.get(url).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = self.url(path)?;
        let response = self.inner.client.post(url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a PUT request with a JSON body.
    pub(crate) async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = self.url(path)?;
        let response = self.inner.client.put(url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a POST request with a multipart body.
    pub(crate) async fn post_multipart(&self, path: &str, form: Form) -> Result<Value, ApiError> {
        let url = self.url(path)?;
        let response = self.inner.client.post(url).multipart(form).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a DELETE request.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path)?;
        let response = self.inner.client.delete(url).send().await?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(Self::parse_error(response).await)
    }

    /// Handle API response and parse JSON. An empty body is `null`.
    async fn handle_response(response: reqwest::Response) -> Result<Value, ApiError> {
        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")))
    }

    /// Parse error response from the backend.
    async fn parse_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return ApiError::RateLimited(retry_after);
        }

        let body = response.text().await.unwrap_or_default();

        match status {
            401 | 403 => ApiError::Unauthorized { status, body },
            404 => ApiError::NotFound { body },
            _ => ApiError::Api { status, body },
        }
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Accept a bare array or a `{"data": [...]}` envelope. `null` is an empty list.
///
/// # Errors
///
/// Returns `ApiError::Parse` for any other shape.
pub fn unwrap_list(value: Value) -> Result<Vec<Value>, ApiError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(ApiError::Parse(
                "expected a JSON array or a {\"data\": [...]} envelope".to_string(),
            )),
        },
        other => Err(ApiError::Parse(format!(
            "expected a JSON array, got {}",
            kind_of(&other)
        ))),
    }
}

/// Accept a bare record or a `{"data": {...}}` envelope.
#[must_use]
pub fn unwrap_record(value: Value) -> Value {
    match value {
        Value::Object(mut map)
            if !map.contains_key("id") && matches!(map.get("data"), Some(Value::Object(_))) =>
        {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
