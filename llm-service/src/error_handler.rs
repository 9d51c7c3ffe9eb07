//! Unified error handling for `llm-service`.
//!
//! One top-level [`LlmError`] covers transport failures, non-2xx provider
//! responses, undecodable payloads, and empty completions. All messages
//! include the suffix `[LLM Service]` to simplify attribution in logs.

use reqwest::StatusCode;
use thiserror::Error;

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Top-level error for the `llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LlmError {
    /// The configured endpoint is empty or does not start with http/https.
    #[error("[LLM Service] invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The API key could not be encoded as an HTTP header value.
    #[error("[LLM Service] invalid API key header: {0}")]
    InvalidApiKey(String),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Upstream returned a non-successful HTTP status.
    #[error("[LLM Service] HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body (trimmed).
        snippet: String,
    },

    /// Response payload could not be decoded as expected.
    #[error("[LLM Service] decode error: {0}")]
    Decode(String),

    /// The completion response carried no usable `choices` content.
    #[error("[LLM Service] empty `choices` in completion response")]
    EmptyChoices,
}

/// Trims an upstream body to a short, single-line snippet for error messages.
pub(crate) fn make_snippet(body: &str) -> String {
    const MAX: usize = 200;
    let line = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() > MAX {
        let mut s: String = line.chars().take(MAX).collect();
        s.push('…');
        s
    } else {
        line
    }
}
