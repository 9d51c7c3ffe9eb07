//! Chat-completions client for the inference provider.
//!
//! Wraps an OpenAI-compatible chat endpoint (Groq) behind a small, long-lived
//! service handle. Construct one [`GroqService`] at startup, wrap it in `Arc`,
//! and reuse it across requests; it holds no per-request state.
//!
//! Generation is configured for reproducibility: a fixed model identifier and
//! temperature pinned to zero.

pub mod chat;
pub mod config;
pub mod error_handler;

pub use chat::{ChatMessage, ChatRole, GroqService};
pub use config::LlmConfig;
pub use error_handler::LlmError;
