use search_service::SearchResult;
use serde::Serialize;

/// Response payload for /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Final model answer (plain text).
    pub answer: String,
    /// Sources backing the answer, in provider rank order, one per search
    /// result (no filtering or deduplication).
    pub sources: Vec<SourceSummary>,
}

/// Display-truncated pointer to one search result.
#[derive(Debug, Serialize, PartialEq)]
pub struct SourceSummary {
    /// First 40 characters of the result body plus an ellipsis marker.
    pub title: String,
    /// Source URL, verbatim.
    pub url: String,
}

/// Number of result-body characters shown in a source title.
const TITLE_CHARS: usize = 40;

impl From<&SearchResult> for SourceSummary {
    fn from(res: &SearchResult) -> Self {
        // Character-wise, not byte-wise: result bodies are arbitrary UTF-8.
        let mut title: String = res.content.chars().take(TITLE_CHARS).collect();
        title.push_str("...");
        Self {
            title,
            url: res.url.clone(),
        }
    }
}
