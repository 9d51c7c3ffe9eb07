//! Inference provider configuration loaded from environment variables.
//!
//! # Environment variables
//!
//! - `GROQ_API_KEY` = API key for the inference provider. A missing key is a
//!   startup warning, not an error: the first real generation call fails instead.
//! - `GROQ_URL`     = optional endpoint override (default `https://api.groq.com/openai`).
//!
//! Model and temperature are deliberately NOT configurable: answers should be
//! reproducible given identical context, so temperature stays at zero and the
//! model identifier is fixed.

/// Configuration for the chat-completions provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model identifier string.
    pub model: String,

    /// Inference endpoint (remote API URL, without the `/v1/...` suffix).
    pub endpoint: String,

    /// Optional API key for authentication.
    pub api_key: Option<String>,

    /// Sampling temperature. Zero favors reproducibility over creativity.
    pub temperature: f32,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

/// Fixed model used for answer generation.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Default inference endpoint (Groq's OpenAI-compatible API base).
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai";

impl LlmConfig {
    /// Loads the inference configuration strictly from the environment.
    ///
    /// An absent or empty `GROQ_API_KEY` logs a warning and leaves the key
    /// unset; the provider will reject the first real call instead.
    pub fn from_env() -> Self {
        let api_key = match std::env::var("GROQ_API_KEY") {
            Ok(v) if !v.trim().is_empty() => Some(v),
            _ => {
                tracing::warn!("GROQ_API_KEY is missing; generation calls will fail");
                None
            }
        };

        let endpoint = std::env::var("GROQ_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.into());

        Self {
            model: DEFAULT_MODEL.into(),
            endpoint,
            api_key,
            temperature: 0.0,
            timeout_secs: Some(60),
        }
    }
}
