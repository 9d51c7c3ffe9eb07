//! Prompt assembly: instruction template, history adaptation, message order.
//!
//! Everything here is a pure function of its input, so the full prompt for a
//! request is deterministic given identical search results and history.

use llm_service::ChatMessage;

use crate::routes::chat::chat_request::ChatTurn;

/// Fixed system instruction. `{context}` is replaced with the concatenated
/// search-result bodies before the prompt is submitted.
pub const SYSTEM_TEMPLATE: &str = "\
You are a helpful research assistant.
Answer the user's question based on the following context.
If the context doesn't contain the answer, say \"I couldn't find that information.\"

Context:
{context}";

/// Renders the system instruction with the given context block.
pub fn system_instruction(context: &str) -> String {
    SYSTEM_TEMPLATE.replace("{context}", context)
}

/// Maps client-supplied turns onto provider turns, preserving order.
///
/// Classification is deliberately two-way: exactly `"user"` becomes a human
/// turn; every other role (including `"assistant"`, typos, and casing
/// variants) becomes an assistant turn. This mirrors the client contract and
/// is pinned by tests rather than tightened.
pub fn adapt_history(turns: &[ChatTurn]) -> Vec<ChatMessage> {
    turns
        .iter()
        .map(|turn| match turn.role.as_str() {
            "user" => ChatMessage::user(turn.content.clone()),
            _ => ChatMessage::assistant(turn.content.clone()),
        })
        .collect()
}

/// Builds the full ordered message sequence for one request:
/// system instruction with context, prior turns in order, then the new
/// question as the final human turn.
pub fn build_messages(context: &str, history: &[ChatTurn], query: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system_instruction(context)));
    messages.extend(adapt_history(history));
    messages.push(ChatMessage::user(query));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_service::ChatRole;

    fn turn(role: &str, content: &str) -> ChatTurn {
        ChatTurn {
            role: role.into(),
            content: content.into(),
        }
    }

    #[test]
    fn adapted_history_preserves_length_and_order() {
        let history = vec![
            turn("user", "first question"),
            turn("assistant", "first answer"),
            turn("user", "second question"),
        ];
        let adapted = adapt_history(&history);
        assert_eq!(adapted.len(), 3);
        assert_eq!(adapted[0], ChatMessage::user("first question"));
        assert_eq!(adapted[1], ChatMessage::assistant("first answer"));
        assert_eq!(adapted[2], ChatMessage::user("second question"));
    }

    #[test]
    fn only_exact_user_role_maps_to_human_turn() {
        // Contract property: anything but the exact string "user" falls into
        // the assistant branch, including casing variants and typos.
        let history = vec![
            turn("user", "a"),
            turn("User", "b"),
            turn("USER", "c"),
            turn("usr", "d"),
            turn("system", "e"),
            turn("", "f"),
        ];
        let adapted = adapt_history(&history);
        assert_eq!(adapted[0].role, ChatRole::User);
        for msg in &adapted[1..] {
            assert_eq!(msg.role, ChatRole::Assistant);
        }
    }

    #[test]
    fn empty_history_adapts_to_empty() {
        assert!(adapt_history(&[]).is_empty());
    }

    #[test]
    fn system_instruction_interpolates_context() {
        let rendered = system_instruction("Rust is a systems language.");
        assert!(rendered.contains("Context:\nRust is a systems language."));
        assert!(rendered.starts_with("You are a helpful research assistant."));
        assert!(!rendered.contains("{context}"));
    }

    #[test]
    fn system_instruction_with_empty_context() {
        let rendered = system_instruction("");
        assert!(rendered.ends_with("Context:\n"));
    }

    #[test]
    fn messages_are_system_then_history_then_query() {
        let history = vec![turn("user", "hi"), turn("assistant", "hello")];
        let messages = build_messages("some context", &history, "what now?");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, ChatRole::System);
        assert!(messages[0].content.contains("some context"));
        assert_eq!(messages[1], ChatMessage::user("hi"));
        assert_eq!(messages[2], ChatMessage::assistant("hello"));
        assert_eq!(messages[3], ChatMessage::user("what now?"));
    }

    #[test]
    fn no_history_yields_system_and_query_only() {
        let messages = build_messages("", &[], "lone question");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1], ChatMessage::user("lone question"));
    }
}
