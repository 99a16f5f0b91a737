// src/services/relay.rs
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::completion::CompletionClient;
use crate::services::prompt::{RELAY_SYSTEM_PROMPT, with_system_turn};

pub const MESSAGES_REQUIRED: &str = "Messages array required";
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't generate a response.";

/// Pull the `messages` array out of a raw request body. Anything that is
/// not a JSON object with an array under `messages` is a bad request.
pub fn parse_messages(body: &[u8]) -> Result<Vec<Value>, AppError> {
    let mut request: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    match request.get_mut("messages").map(Value::take) {
        Some(Value::Array(messages)) => Ok(messages),
        _ => Err(AppError::BadRequest(MESSAGES_REQUIRED.to_string())),
    }
}

/// Prepend the persona, forward once, and hand back the reply text.
pub async fn relay(client: &CompletionClient, messages: Vec<Value>) -> Result<String, AppError> {
    let span = tracing::info_span!(
        "relay",
        request_id = %Uuid::new_v4(),
        turns = messages.len()
    );

    async move {
        let outbound = with_system_turn(RELAY_SYSTEM_PROMPT, messages);
        let reply = client.complete(outbound).await?;

        Ok::<_, AppError>(match reply {
            Some(text) => {
                tracing::info!(chars = text.len(), "reply relayed");
                text
            }
            None => {
                tracing::warn!("completion had no choice content, using fallback reply");
                FALLBACK_REPLY.to_string()
            }
        })
    }
    .instrument(span)
    .await
}
