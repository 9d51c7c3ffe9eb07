use std::sync::Arc;

use llm_service::{GroqService, LlmConfig};
use search_service::{SearchConfig, SearchService};

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
///
/// Both provider clients are built once at startup and reused read-only
/// across concurrent requests; neither carries per-request data.
#[derive(Clone)]
pub struct AppState {
    /// Web-search provider used to fetch grounding context.
    pub search: Arc<SearchService>,
    /// Chat-completions provider used to generate the answer.
    pub llm: Arc<GroqService>,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// Missing provider credentials are warnings, not errors (the first real
    /// provider call fails instead); only a malformed endpoint or an
    /// unbuildable HTTP client aborts startup.
    pub fn from_env() -> Result<Self, AppError> {
        let search = SearchService::new(SearchConfig::from_env())
            .map_err(|e| AppError::Startup(e.to_string()))?;
        let llm = GroqService::new(LlmConfig::from_env())
            .map_err(|e| AppError::Startup(e.to_string()))?;

        Ok(Self {
            search: Arc::new(search),
            llm: Arc::new(llm),
        })
    }
}
