//! HTTP client for the campus upload store.
//!
//! The client is constructed explicitly with its base URL and auth, then shared
//! by reference (usually `Arc<ApiClient>`) with whatever needs it. It implements
//! [`campus_core::UploadTransport`], so the upload orchestrator never sees HTTP.

pub mod api;
pub mod urls;

use std::time::Duration;

use anyhow::{Context, Result};
use campus_core::{ClientConfig, TransportError};
use reqwest::Client;
use serde::de::DeserializeOwned;

pub use api::UploadResponse;
pub use urls::FileUrlResolver;

/// Authentication strategy for the API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// No credentials
    None,
}

impl Auth {
    pub fn from_token(token: Option<String>) -> Self {
        match token {
            Some(token) => Auth::Bearer(token),
            None => Auth::None,
        }
    }
}

/// HTTP client for the upload API with configurable auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Auth,
}

impl ApiClient {
    pub fn new(base_url: String, auth: Auth, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            Auth::from_token(config.api_token.clone()),
            Duration::from_secs(config.upload_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
            Auth::None => request,
        }
    }

    /// POST multipart form and deserialize the JSON response.
    ///
    /// Errors are classified per [`TransportError`] so callers can report them
    /// per file without aborting anything else.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, TransportError> {
        let url = self.build_url(path);
        let request = self.client.post(&url).multipart(form);
        let request = self.apply_auth(request);

        let response = request.send().await.map_err(classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected {
                status: Some(status.as_u16()),
                message: error_message_from_body(&body)
                    .unwrap_or_else(|| format!("Upload failed with HTTP {}", status)),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }
}

fn classify_send_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}

/// Pull a human-readable message out of an error body: `{"message": ...}` or
/// `{"error": ...}` JSON, else short plain text.
fn error_message_from_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return ["message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string);
    }

    if trimmed.len() <= 200 && !trimmed.starts_with('<') {
        return Some(trimmed.to_string());
    }

    None
}
