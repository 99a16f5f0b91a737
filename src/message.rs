// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One message of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// Body the client sends to the relay.
#[derive(Debug, Serialize)]
pub struct RelayPayload<'a> {
    pub messages: &'a [Turn],
}

/// Exactly one of `reply` or `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayResponse {
    Reply { reply: String },
    Error { error: String },
}

/// Outbound chat completions request.
#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<Value>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Text of the first completion choice, if the upstream body carries a
/// non-empty one. Any other shape yields `None`.
pub fn first_choice_content(body: &Value) -> Option<&str> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn turn_uses_lowercase_roles() {
        let value = serde_json::to_value(Turn::assistant("hi")).unwrap();
        assert_eq!(value, json!({"role": "assistant", "content": "hi"}));
    }

    #[test]
    fn relay_response_serializes_one_field() {
        let ok = serde_json::to_value(RelayResponse::Reply { reply: "x".into() }).unwrap();
        assert_eq!(ok, json!({"reply": "x"}));
        let err: RelayResponse = serde_json::from_value(json!({"error": "nope"})).unwrap();
        assert_eq!(err, RelayResponse::Error { error: "nope".into() });
    }

    #[test]
    fn first_choice_content_tolerates_odd_shapes() {
        assert_eq!(first_choice_content(&json!({})), None);
        assert_eq!(first_choice_content(&json!({"choices": null})), None);
        assert_eq!(first_choice_content(&json!({"choices": []})), None);
        assert_eq!(
            first_choice_content(&json!({"choices": [{"message": {"content": null}}]})),
            None
        );
        assert_eq!(
            first_choice_content(&json!({"choices": [{"message": {"content": ""}}]})),
            None
        );
        assert_eq!(
            first_choice_content(&json!({"choices": [{"message": {"content": "hello"}}]})),
            Some("hello")
        );
    }
}
