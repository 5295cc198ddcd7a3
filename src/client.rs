//! The Elsevier Scopus API client.

use crate::error::{Result, ScopusError};
use reqwest::Client;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Async client for the Elsevier Scopus Content APIs.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> scopus_client::error::Result<()> {
/// let client = scopus_client::ScopusClient::from_env()?;
/// let results = client.search("TITLE-ABS-KEY(neuromodulation)").await?;
/// for entry in results.entries() {
///     println!(
///         "{} ({})",
///         entry.title().unwrap_or_default(),
///         entry.cover_date().unwrap_or_default()
///     );
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ScopusClient {
    pub(crate) http: Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
}

impl ScopusClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_key: api_key.into(),
            base_url: "https://api.elsevier.com/content".to_string(),
        }
    }

    /// Create a client from the `SCOPUS_API_KEY` (or `ELSEVIER_API_KEY`)
    /// environment variable.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var("SCOPUS_API_KEY")
            .or_else(|_| std::env::var("ELSEVIER_API_KEY"))
            .map_err(|_| {
                ScopusError::Config(
                    "no API key: set SCOPUS_API_KEY (or ELSEVIER_API_KEY), or use from_key_file()"
                        .to_string(),
                )
            })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ScopusError::Config("API key is empty".to_string()));
        }
        Ok(Self::new(key))
    }

    /// Create a client from a file holding the API key, surrounding
    /// whitespace ignored.
    pub fn from_key_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let key = std::fs::read_to_string(path).map_err(|e| {
            ScopusError::Config(format!("cannot read API key file {}: {}", path.display(), e))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ScopusError::Config(format!(
                "API key file {} is empty",
                path.display()
            )));
        }
        Ok(Self::new(key))
    }

    /// Override the base URL (useful for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Make an authenticated GET request to the Scopus API.
    pub(crate) async fn get(&self, segments: &[&str], params: &[(&str, &str)]) -> Result<Value> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ScopusError::Config(format!("invalid base URL: {e}")))?;
        // Extending per segment percent-encodes '?' or '#' inside
        // identifier values instead of letting them split the URL.
        url.path_segments_mut()
            .map_err(|_| {
                ScopusError::Config(format!(
                    "base URL {} does not accept request paths",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        debug!(path = %url.path(), "GET request");

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .header("X-ELS-APIKey", &self.api_key)
            .header("User-Agent", "scopus-client/0.1.0")
            .query(params)
            .send()
            .await?;

        handle_response(response).await
    }
}

// api_key stays out of debug output.
impl std::fmt::Debug for ScopusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopusClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Handle the HTTP response, mapping status codes to errors.
async fn handle_response(response: reqwest::Response) -> Result<Value> {
    let status = response.status().as_u16();

    match status {
        200..=299 => {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| ScopusError::Parse(format!("invalid JSON from API: {e}")))
        }
        // Elsevier answers 401 for bad keys and 403 for keys used outside
        // their registered IP range.
        401 | 403 => {
            warn!(status, "authentication rejected");
            Err(ScopusError::AuthDenied)
        }
        404 => Err(ScopusError::NotFound(
            "no Scopus document for the requested identifier".to_string(),
        )),
        _ => {
            let body = response.text().await.unwrap_or_default();
            warn!(status, "API error");
            Err(ScopusError::Api {
                status,
                message: body,
            })
        }
    }
}

/// Strip the single-key envelope Scopus wraps every response body in.
pub(crate) fn unwrap_envelope(mut body: Value, key: &str) -> Result<Value> {
    match body.get_mut(key).map(Value::take) {
        Some(inner) if !inner.is_null() => Ok(inner),
        _ => Err(ScopusError::Parse(format!(
            "response has no '{key}' envelope"
        ))),
    }
}
