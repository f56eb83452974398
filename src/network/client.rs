//! HTTP client wrapper - executes GETs against the Oura proxy and decodes JSON

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::Settings;
use crate::error::TransportError;
use crate::params::QueryParams;

/// Something that can GET a path with query parameters and return JSON.
///
/// Only GET with a flat string mapping is ever issued; there is no body.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn get(&self, path: &str, params: &QueryParams) -> Result<Value, TransportError>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    path_prefix: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(settings: &Settings) -> Self {
        HttpTransport {
            client: create_client(Duration::from_millis(settings.timeout_ms)),
            base_url: settings.base_url.clone(),
            path_prefix: settings.path_prefix.clone(),
            token: settings.token.clone(),
        }
    }

    /// `{base_url}{path_prefix}{path}` with exactly one slash at each join
    pub fn url_for(&self, path: &str) -> String {
        let mut url = self.base_url.trim_end_matches('/').to_string();
        for segment in [self.path_prefix.as_str(), path] {
            let segment = segment.trim_matches('/');
            if !segment.is_empty() {
                url.push('/');
                url.push_str(segment);
            }
        }
        url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, params: &QueryParams) -> Result<Value, TransportError> {
        let url = self.url_for(path);
        let mut req_builder = self.client.get(&url).query(params);
        if let Some(token) = &self.token {
            req_builder = req_builder.bearer_auth(token);
        }

        let resp = req_builder.send().await.map_err(classify_error)?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Request(format!("Error reading body: {}", e)))?;

        if !(200..300).contains(&status) {
            return Err(TransportError::Status {
                status,
                message: failure_message(status, &body),
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Human-readable message for a non-2xx answer.
///
/// Prefers the `detail` field the proxy puts in its error bodies.
pub fn failure_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("detail").cloned());

    match detail {
        Some(Value::String(text)) if !text.is_empty() => text,
        Some(Value::Null) | Some(Value::String(_)) | None => {
            format!("Request failed with status {}", status)
        }
        Some(other) => other.to_string(),
    }
}

fn classify_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}

/// Create an HTTP client with the configured timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
