//! Error types for the Scopus client.

/// Errors that can occur when interacting with the Scopus API.
#[derive(Debug, thiserror::Error)]
pub enum ScopusError {
    /// HTTP request failed (network, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Scopus API returned an error status code not covered by a
    /// more specific variant.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Authentication rejected (HTTP 401/403). Elsevier keys are bound to
    /// registered IP ranges, so this also fires on unregistered networks.
    #[error("authentication rejected: API key invalid or client IP address does not resolve to a registered Elsevier account")]
    AuthDenied,

    /// Full-text retrieval refused (HTTP 400 on the article endpoint).
    /// The document exists but the account is not entitled to its body.
    #[error("full article access limited by Scopus; the text may be available elsewhere")]
    AccessLimited,

    /// Resource not found (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The document's bibliography declares a reference count of zero.
    #[error("no references found; the document declares a reference count of zero")]
    NoReferences,

    /// A field name outside the model's declared and renamed sets.
    #[error("{model} has no field named '{field}'")]
    UnknownField { model: &'static str, field: String },

    /// A retrieval was attempted with an empty identifier value.
    #[error("identifier value is empty")]
    EmptyIdentifier,

    /// Failed to parse API response.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Configuration error (credentials, base URL).
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias for Results using [`ScopusError`].
pub type Result<T> = std::result::Result<T, ScopusError>;
