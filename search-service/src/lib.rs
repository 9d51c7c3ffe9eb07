//! Web-search client for grounding answers in live context.
//!
//! Wraps the Tavily search API behind a small, long-lived service handle.
//! Construct one [`SearchService`] at startup, wrap it in `Arc`, and reuse it
//! across requests; it holds no per-request state.

pub mod config;
pub mod error_handler;
pub mod search;

pub use config::SearchConfig;
pub use error_handler::SearchError;
pub use search::{SearchResult, SearchService, context_block};
