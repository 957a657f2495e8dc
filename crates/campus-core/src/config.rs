//! Configuration module
//!
//! Client-side settings for reaching the remote upload store and building
//! retrieval URLs. Values come from the environment (a `.env` file is loaded
//! by the binaries before this runs).

use std::env;
use std::str::FromStr;

use crate::constants::{DEFAULT_API_URL, DEFAULT_PLACEHOLDER_URL, DEFAULT_UPLOAD_TIMEOUT_SECS};

/// How retrieval URLs for stored files are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlMode {
    /// `{uploads_url}/uploads/{category}/{filename}`
    Direct,
    /// `{api_url}/upload/file/{category}/{filename}`
    ApiProxy,
}

impl FromStr for UrlMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(UrlMode::Direct),
            "proxy" | "api" | "api_proxy" => Ok(UrlMode::ApiProxy),
            other => Err(anyhow::anyhow!(
                "Invalid URL mode '{}'. Must be 'direct' or 'proxy'",
                other
            )),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the REST API, e.g. `https://school.example/api`
    pub api_url: String,
    /// Base URL under which `/uploads/...` is served
    pub uploads_url: String,
    /// Bearer token sent with upload calls
    pub api_token: Option<String>,
    pub upload_timeout_secs: u64,
    pub url_mode: UrlMode,
    pub placeholder_url: String,
}

impl ClientConfig {
    /// Configuration for an API base URL with every other value at its default.
    pub fn for_api_url(api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            uploads_url: derive_uploads_url(&api_url),
            api_url,
            api_token: None,
            upload_timeout_secs: DEFAULT_UPLOAD_TIMEOUT_SECS,
            url_mode: UrlMode::Direct,
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
        }
    }

    /// Load from CAMPUS_* environment variables and validate.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get("CAMPUS_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let uploads_url = get("CAMPUS_UPLOADS_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| derive_uploads_url(&api_url));

        let url_mode = match get("CAMPUS_URL_MODE") {
            Some(mode) => mode.parse()?,
            None => UrlMode::Direct,
        };

        let config = ClientConfig {
            api_url,
            uploads_url,
            api_token: get("CAMPUS_API_TOKEN"),
            upload_timeout_secs: get("CAMPUS_UPLOAD_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_UPLOAD_TIMEOUT_SECS),
            url_mode,
            placeholder_url: get("CAMPUS_PLACEHOLDER_URL")
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER_URL.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !is_http_url(&self.api_url) {
            return Err(anyhow::anyhow!(
                "CAMPUS_API_URL must be an http(s) URL, got '{}'",
                self.api_url
            ));
        }

        if !is_http_url(&self.uploads_url) {
            return Err(anyhow::anyhow!(
                "CAMPUS_UPLOADS_URL must be an http(s) URL, got '{}'",
                self.uploads_url
            ));
        }

        if self.upload_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "CAMPUS_UPLOAD_TIMEOUT_SECS must be greater than zero"
            ));
        }

        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Uploads are served from the site root, next to the `/api` prefix.
fn derive_uploads_url(api_url: &str) -> String {
    api_url
        .strip_suffix("/api")
        .unwrap_or(api_url)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.uploads_url, "http://localhost:5000");
        assert_eq!(config.api_token, None);
        assert_eq!(config.upload_timeout_secs, 300);
        assert_eq!(config.url_mode, UrlMode::Direct);
        assert_eq!(config.placeholder_url, "/images/placeholder.jpg");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("CAMPUS_API_URL", "https://school.example/api/"),
            ("CAMPUS_UPLOADS_URL", "https://cdn.school.example/"),
            ("CAMPUS_API_TOKEN", "secret"),
            ("CAMPUS_UPLOAD_TIMEOUT_SECS", "90"),
            ("CAMPUS_URL_MODE", "proxy"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://school.example/api");
        assert_eq!(config.uploads_url, "https://cdn.school.example");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.upload_timeout_secs, 90);
        assert_eq!(config.url_mode, UrlMode::ApiProxy);
    }

    #[test]
    fn blank_token_is_treated_as_missing() {
        let config = ClientConfig::from_lookup(lookup(&[("CAMPUS_API_TOKEN", "  ")])).unwrap();
        assert_eq!(config.api_token, None);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(ClientConfig::from_lookup(lookup(&[("CAMPUS_API_URL", "ftp://x")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[("CAMPUS_URL_MODE", "cdn")])).is_err());
        assert!(
            ClientConfig::from_lookup(lookup(&[("CAMPUS_UPLOAD_TIMEOUT_SECS", "0")])).is_err()
        );
    }

    #[test]
    fn for_api_url_derives_uploads_base() {
        let config = ClientConfig::for_api_url("http://127.0.0.1:8080/api/");
        assert_eq!(config.api_url, "http://127.0.0.1:8080/api");
        assert_eq!(config.uploads_url, "http://127.0.0.1:8080");
        assert!(config.validate().is_ok());
    }
}
