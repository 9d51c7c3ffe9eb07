//! Tavily search client and context assembly.
//!
//! Minimal, non-streaming client around the Tavily REST API:
//! - POST {endpoint}/search — ranked web-search results for a raw query
//!
//! Constructor validation:
//! - `cfg.endpoint` must start with http:// or https://
//! - a missing API key is tolerated (logged at construction); the provider
//!   rejects the first real call instead
//!
//! Errors are normalized via the unified types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::SearchConfig;
use crate::error_handler::{Result, SearchError, make_snippet};

/// Long-lived handle over the search provider.
///
/// Holds a preconfigured `reqwest::Client` (timeout and default headers) and
/// carries no per-request state, so it is safe to share across concurrent
/// requests behind an `Arc`.
#[derive(Debug)]
pub struct SearchService {
    client: reqwest::Client,
    cfg: SearchConfig,
    url_search: String,
}

impl SearchService {
    /// Creates a new [`SearchService`] from the given config.
    ///
    /// # Errors
    /// - [`SearchError::InvalidEndpoint`] if `cfg.endpoint` lacks an http scheme
    /// - [`SearchError::InvalidApiKey`] if the key cannot form a header value
    /// - [`SearchError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: SearchConfig) -> Result<Self> {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(SearchError::InvalidEndpoint(cfg.endpoint.clone()));
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(key) = &cfg.api_key {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {key}"))
                    .map_err(|e| SearchError::InvalidApiKey(e.to_string()))?,
            );
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let url_search = format!("{}/search", endpoint.trim_end_matches('/'));

        info!(
            endpoint = %cfg.endpoint,
            max_results = cfg.max_results,
            has_api_key = cfg.api_key.is_some(),
            "SearchService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_search,
        })
    }

    /// Runs one search for `query` and returns results in provider rank order.
    ///
    /// At most `cfg.max_results` results are requested. Zero results is a
    /// valid outcome, not an error.
    ///
    /// # Errors
    /// - [`SearchError::HttpStatus`] for non-2xx responses
    /// - [`SearchError::HttpTransport`] for client/network failures
    /// - [`SearchError::Decode`] if the JSON cannot be parsed
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let started = Instant::now();
        let body = SearchRequest {
            query,
            max_results: self.cfg.max_results,
        };

        debug!(
            query_len = query.len(),
            max_results = self.cfg.max_results,
            "POST {}", self.url_search
        );

        let resp = self.client.post(&self.url_search).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_search.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "search endpoint returned non-success status"
            );

            return Err(SearchError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: SearchResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode search response"
                );
                return Err(SearchError::Decode(format!(
                    "serde error: {e}; expected `results[].content` and `results[].url`"
                )));
            }
        };

        info!(
            results = out.results.len(),
            latency_ms = started.elapsed().as_millis(),
            "search completed"
        );

        Ok(out.results)
    }
}

/// Joins result bodies into one context block for the model prompt.
///
/// Entries are separated by a blank line, in provider order. Zero results
/// produce the empty string.
pub fn context_block(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `/search`.
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: u8,
}

/// Response body for `/search`. Provider fields beyond these are ignored.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// One ranked search result.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchResult {
    /// Page title as reported by the provider.
    #[serde(default)]
    pub title: String,
    /// Source URL.
    pub url: String,
    /// Extracted page snippet used as grounding context.
    pub content: String,
    /// Provider relevance score.
    #[serde(default)]
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(content: &str, url: &str) -> SearchResult {
        SearchResult {
            title: String::new(),
            url: url.into(),
            content: content.into(),
            score: 0.0,
        }
    }

    #[test]
    fn context_block_joins_with_blank_line() {
        let results = vec![
            result("first snippet", "https://a.example"),
            result("second snippet", "https://b.example"),
            result("third snippet", "https://c.example"),
        ];
        assert_eq!(
            context_block(&results),
            "first snippet\n\nsecond snippet\n\nthird snippet"
        );
    }

    #[test]
    fn context_block_empty_for_no_results() {
        assert_eq!(context_block(&[]), "");
    }

    #[test]
    fn context_block_single_result_has_no_separator() {
        let results = vec![result("only one", "https://a.example")];
        assert_eq!(context_block(&results), "only one");
    }

    #[test]
    fn search_request_serializes_query_and_cap() {
        let body = SearchRequest {
            query: "rust async runtimes",
            max_results: 3,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["query"], "rust async runtimes");
        assert_eq!(json["max_results"], 3);
    }

    #[test]
    fn search_response_decodes_and_ignores_extra_fields() {
        let raw = r#"{
            "query": "rust async runtimes",
            "response_time": 1.23,
            "results": [
                {"title": "Tokio", "url": "https://tokio.rs", "content": "An async runtime", "score": 0.97, "raw_content": null},
                {"url": "https://async.rs", "content": "Another runtime"}
            ]
        }"#;
        let out: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(out.results.len(), 2);
        assert_eq!(out.results[0].title, "Tokio");
        assert_eq!(out.results[0].url, "https://tokio.rs");
        assert_eq!(out.results[1].content, "Another runtime");
        // Absent optional fields fall back to defaults.
        assert_eq!(out.results[1].title, "");
        assert_eq!(out.results[1].score, 0.0);
    }

    #[test]
    fn search_response_tolerates_missing_results_field() {
        let out: SearchResponse = serde_json::from_str(r#"{"query": "x"}"#).unwrap();
        assert!(out.results.is_empty());
    }

    #[test]
    fn new_rejects_non_http_endpoint() {
        let cfg = SearchConfig {
            endpoint: "ftp://api.example".into(),
            api_key: None,
            max_results: 3,
            timeout_secs: None,
        };
        assert!(matches!(
            SearchService::new(cfg),
            Err(SearchError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn new_accepts_missing_api_key() {
        let cfg = SearchConfig {
            endpoint: "https://api.tavily.com".into(),
            api_key: None,
            max_results: 3,
            timeout_secs: Some(5),
        };
        assert!(SearchService::new(cfg).is_ok());
    }
}
