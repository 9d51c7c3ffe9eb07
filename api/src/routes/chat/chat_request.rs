use serde::Deserialize;

/// Request payload for /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Natural language question.
    pub query: String,
    /// Prior conversation turns in conversational order. The client resends
    /// the full history on every call; nothing is stored server-side.
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// One prior conversation turn as supplied by the client.
///
/// `role` is free text. Classification is two-way: exactly `"user"` maps to a
/// human turn, every other value falls into the assistant branch.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}
