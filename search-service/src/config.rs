//! Search provider configuration loaded from environment variables.
//!
//! # Environment variables
//!
//! - `TAVILY_API_KEY` = API key for the search provider. A missing key is a
//!   startup warning, not an error: the first real search call fails instead.
//! - `TAVILY_URL`     = optional endpoint override (default `https://api.tavily.com`).

/// Configuration for the web-search provider.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Search API endpoint (remote API URL).
    pub endpoint: String,

    /// Optional API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of results requested per query.
    pub max_results: u8,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

/// Default search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.tavily.com";

/// Result cap per query. Kept small: only the top snippets are worth
/// forwarding to the model as context.
pub const DEFAULT_MAX_RESULTS: u8 = 3;

impl SearchConfig {
    /// Loads the search configuration strictly from the environment.
    ///
    /// An absent or empty `TAVILY_API_KEY` logs a warning and leaves the key
    /// unset; the provider will reject the first real call instead.
    pub fn from_env() -> Self {
        let api_key = match std::env::var("TAVILY_API_KEY") {
            Ok(v) if !v.trim().is_empty() => Some(v),
            _ => {
                tracing::warn!("TAVILY_API_KEY is missing; search calls will fail");
                None
            }
        };

        let endpoint = std::env::var("TAVILY_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.into());

        Self {
            endpoint,
            api_key,
            max_results: DEFAULT_MAX_RESULTS,
            timeout_secs: Some(60),
        }
    }
}
