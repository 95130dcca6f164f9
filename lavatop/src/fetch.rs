//! HTTP client for the Lavalink REST endpoints.
//!
//! Each request is a single GET. Bodies are checked in a fixed order
//! (transport, status, empty, shape, parse) and every failure comes back as
//! a [`FetchError`]; retrying is left to the caller.

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client};
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::Endpoints;
use crate::types::{Info, Stats};

const SNIPPET_LEN: usize = 60;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error requesting {endpoint}: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status}: {status_text}")]
    HttpStatus { status: u16, status_text: String },
    #[error("Empty response from {endpoint}")]
    EmptyResponse { endpoint: String },
    #[error("Non-JSON response from {endpoint}: {snippet}")]
    NonJson { endpoint: String, snippet: String },
    #[error("invalid JSON from {endpoint}: {source}")]
    Parse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn is_json_media(mt: &str) -> bool {
    mt == "application/json" || mt.ends_with("+json")
}

fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_LEN).collect()
}

/// Validate and parse a response body.
///
/// A JSON `Content-Type` is trusted and `text/html` is rejected outright;
/// without a usable header the body must start with `{` or `[`. Bodies
/// starting with `<` are always treated as HTML error pages.
pub fn decode_body(
    endpoint: &str,
    content_type: Option<&str>,
    body: &str,
) -> Result<Value, FetchError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(FetchError::EmptyResponse {
            endpoint: endpoint.to_string(),
        });
    }

    let mt = content_type.map(media_type);
    let accepted = if trimmed.starts_with('<') {
        false
    } else {
        match mt.as_deref() {
            Some(m) if is_json_media(m) => true,
            Some("text/html") => false,
            _ => trimmed.starts_with('{') || trimmed.starts_with('['),
        }
    };
    if !accepted {
        return Err(FetchError::NonJson {
            endpoint: endpoint.to_string(),
            snippet: snippet(trimmed),
        });
    }

    serde_json::from_str(trimmed).map_err(|source| FetchError::Parse {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Normalize the `/version` body: bare text or `{"semver": ..}` /
/// `{"version": ..}`, surrounding quotes stripped, `v` prefixed.
pub fn parse_version(endpoint: &str, body: &str) -> Result<String, FetchError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(FetchError::EmptyResponse {
            endpoint: endpoint.to_string(),
        });
    }
    if trimmed.starts_with('<') {
        return Err(FetchError::NonJson {
            endpoint: endpoint.to_string(),
            snippet: snippet(trimmed),
        });
    }

    let raw = if trimmed.starts_with('{') {
        let value = decode_body(endpoint, None, trimmed)?;
        value
            .get("semver")
            .or_else(|| value.get("version"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| FetchError::Parse {
                endpoint: endpoint.to_string(),
                source: serde_json::Error::custom("missing `semver`/`version` field"),
            })?
    } else {
        trimmed.to_string()
    };

    let unquoted = raw.strip_prefix('"').unwrap_or(&raw);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted).trim();
    if unquoted.is_empty() {
        return Err(FetchError::EmptyResponse {
            endpoint: endpoint.to_string(),
        });
    }
    if unquoted.starts_with('v') {
        Ok(unquoted.to_string())
    } else {
        Ok(format!("v{unquoted}"))
    }
}

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    base: Url,
    endpoints: Endpoints,
}

impl Fetcher {
    pub fn new(base: Url, endpoints: Endpoints, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            endpoints,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    // Paths are appended to the base as-is so a base like http://host/lavalink keeps its prefix.
    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base.as_str().trim_end_matches('/'), path)
    }

    /// GET `path`, returning (content-type, body) for any 2xx response.
    async fn get_text(&self, path: &str) -> Result<(Option<String>, String), FetchError> {
        let url = self.url_for(path);
        debug!(%url, "GET");
        let network = |source| FetchError::Network {
            endpoint: path.to_string(),
            source,
        };

        let resp = self.client.get(&url).send().await.map_err(network)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.text().await.map_err(network)?;
        Ok((content_type, body))
    }

    pub async fn fetch_json(&self, path: &str) -> Result<Value, FetchError> {
        let (content_type, body) = self.get_text(path).await?;
        decode_body(path, content_type.as_deref(), &body)
    }

    async fn fetch_typed<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let value = self.fetch_json(path).await?;
        serde_json::from_value(value).map_err(|source| FetchError::Parse {
            endpoint: path.to_string(),
            source,
        })
    }

    pub async fn stats(&self) -> Result<Stats, FetchError> {
        self.fetch_typed(&self.endpoints.stats).await
    }

    pub async fn info(&self) -> Result<Info, FetchError> {
        self.fetch_typed(&self.endpoints.info).await
    }

    pub async fn version(&self) -> Result<String, FetchError> {
        let path = &self.endpoints.version;
        let (_, body) = self.get_text(path).await?;
        parse_version(path, &body)
    }
}
