//! POST /chat — answers a question grounded in live web-search context.

use std::sync::Arc;

use axum::{Json, extract::State};
use search_service::context_block;
use tracing::debug;

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::chat::{
        chat_request::ChatRequest,
        chat_response::{ChatResponse, SourceSummary},
        prompt,
    },
};

/// Handler: POST /chat
///
/// Stateless per request: search for context, adapt the client history, ask
/// the model, and return the answer with one source per search result. Both
/// provider calls are sequential (generation needs the fetched context); any
/// provider failure surfaces as a single generic 500 with the original
/// message as `detail`, and a failed search means the model is never invoked.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/chat \
///   -H 'content-type: application/json' \
///   -d '{"query":"Who wrote The Left Hand of Darkness?","history":[]}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    // A. Search the web for grounding context.
    let results = state.search.search(&body.query).await?;
    let context = context_block(&results);

    debug!(
        results = results.len(),
        history_turns = body.history.len(),
        "assembling prompt"
    );

    // B. Assemble the prompt: instruction + history + new question.
    let messages = prompt::build_messages(&context, &body.history, &body.query);

    // C. Generate the answer.
    let answer = state.llm.chat(&messages).await?;

    // D. Derive the display source list from the same raw results.
    let sources = results.iter().map(SourceSummary::from).collect();

    Ok(Json(ChatResponse { answer, sources }))
}
