use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Public application error type.
///
/// Provider failures are deliberately NOT classified further: every search or
/// generation error degrades the single request to one generic 500 whose
/// `detail` carries the original provider message. Startup variants never
/// reach a response; they abort the process from `main`.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("failed to initialize provider clients: {0}")]
    Startup(String),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request boundary ---
    /// Any provider-call failure (network, auth, quota, malformed response).
    #[error("{0}")]
    Upstream(String),
}

impl From<search_service::SearchError> for AppError {
    fn from(err: search_service::SearchError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl From<llm_service::LlmError> for AppError {
    fn from(err: llm_service::LlmError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        tracing::error!(error = %detail, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody { detail }),
        )
            .into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
