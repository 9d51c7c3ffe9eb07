//! HTTP surface of the grounded-QA relay.
//!
//! Two routes: `POST /chat` (search-grounded question answering) and `GET /`
//! (liveness). The service is stateless per request; the only shared state is
//! a pair of long-lived provider clients.

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tower_http::cors::CorsLayer;

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    routes::{chat::chat_route::chat, home_route::home},
};

/// Builds the application router over the given shared state.
pub fn router(state: Arc<AppState>) -> Router {
    // Frontends are served from arbitrary origins; mirror the request origin
    // so all origins, methods, and headers pass with credentials allowed.
    let cors = CorsLayer::very_permissive();

    Router::new()
        .route("/", get(home))
        .route("/chat", post(chat))
        .layer(cors)
        .with_state(state)
}

/// Starts the relay: load provider clients from the environment, bind the
/// listener, and serve until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".into());

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;

    tracing::info!(addr = %host_url, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use llm_service::{GroqService, LlmConfig};
    use search_service::{SearchConfig, SearchService};
    use tower::ServiceExt;

    /// State whose providers point at an unroutable local port, so any
    /// provider call fails fast with a transport error and no network I/O
    /// leaves the machine.
    fn unreachable_state() -> Arc<AppState> {
        let search = SearchService::new(SearchConfig {
            endpoint: "http://127.0.0.1:9".into(),
            api_key: Some("test-key".into()),
            max_results: 3,
            timeout_secs: Some(2),
        })
        .expect("search client should build");

        let llm = GroqService::new(LlmConfig {
            model: "llama-3.3-70b-versatile".into(),
            endpoint: "http://127.0.0.1:9".into(),
            api_key: Some("test-key".into()),
            temperature: 0.0,
            timeout_secs: Some(2),
        })
        .expect("llm client should build");

        Arc::new(AppState {
            search: Arc::new(search),
            llm: Arc::new(llm),
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    #[tokio::test]
    async fn home_returns_fixed_liveness_message() {
        let app = router(unreachable_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Perplex-Mini Backend is Running!");
    }

    #[tokio::test]
    async fn chat_with_failing_search_returns_500_detail() {
        let app = router(unreachable_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/chat")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"query":"anything"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["detail"].as_str().is_some_and(|d| !d.is_empty()));
        assert!(json.get("answer").is_none());
    }

    #[tokio::test]
    async fn chat_rejects_malformed_body_before_handler() {
        let app = router(unreachable_state());

        // `query` missing entirely: the Json extractor rejects the request,
        // so neither provider is ever contacted.
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/chat")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"history":[]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn chat_accepts_omitted_history() {
        // History defaults to empty; the request is well-formed and reaches
        // the handler (which then fails on the unreachable provider).
        let app = router(unreachable_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/chat")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"query":"no history sent"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
