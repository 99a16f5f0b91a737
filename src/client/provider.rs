// src/client/provider.rs
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::{Config, ReplyStrategy};
use crate::message::{RelayPayload, RelayResponse, Turn};
use crate::services::completion::{CompletionClient, CompletionError};
use crate::services::prompt::{DIRECT_SYSTEM_PROMPT, with_system_turn};

/// Output bound used when the client calls the completion service itself.
pub const DIRECT_MAX_TOKENS: u32 = 500;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("relay answered {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed reply")]
    Malformed,

    #[error("encode: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("OpenAI API key not configured")]
    MissingApiKey,
}

/// Turns a transcript into the assistant's next reply.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    async fn reply(&self, transcript: &[Turn]) -> Result<String, ProviderError>;
}

/// Goes through the relay endpoint; the persona lives on the server.
#[derive(Debug, Clone)]
pub struct RelayProvider {
    http: reqwest::Client,
    url: String,
}

impl RelayProvider {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self { http, url: url.into() }
    }
}

#[async_trait]
impl ReplyProvider for RelayProvider {
    async fn reply(&self, transcript: &[Turn]) -> Result<String, ProviderError> {
        let response = self
            .http
            .post(&self.url)
            .json(&RelayPayload { messages: transcript })
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let parsed: Option<RelayResponse> = serde_json::from_slice(&bytes).ok();

        match (status.is_success(), parsed) {
            (true, Some(RelayResponse::Reply { reply })) => Ok(reply),
            (_, Some(RelayResponse::Error { error })) => Err(ProviderError::Status {
                status: status.as_u16(),
                message: error,
            }),
            (false, _) => Err(ProviderError::Status {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            }),
            (true, _) => Err(ProviderError::Malformed),
        }
    }
}

/// Calls the completion service straight from the client, carrying its own
/// persona and credential.
#[derive(Debug, Clone)]
pub struct DirectProvider {
    client: CompletionClient,
}

impl DirectProvider {
    pub fn from_config(http: reqwest::Client, config: &Config) -> Result<Self, ProviderError> {
        let client = CompletionClient::from_config(http, config)
            .ok_or(ProviderError::MissingApiKey)?
            .with_max_tokens(DIRECT_MAX_TOKENS);
        Ok(Self { client })
    }
}

#[async_trait]
impl ReplyProvider for DirectProvider {
    async fn reply(&self, transcript: &[Turn]) -> Result<String, ProviderError> {
        let turns = transcript
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()?;

        self.client
            .complete(with_system_turn(DIRECT_SYSTEM_PROMPT, turns))
            .await?
            .ok_or(ProviderError::Malformed)
    }
}

/// Pick the reply strategy named in the config.
pub fn provider_from_config(
    http: reqwest::Client,
    config: &Config,
) -> Result<Box<dyn ReplyProvider>, ProviderError> {
    match config.reply_strategy {
        ReplyStrategy::Relay => Ok(Box::new(RelayProvider::new(http, config.relay_url.clone()))),
        ReplyStrategy::Direct => Ok(Box::new(DirectProvider::from_config(http, config)?)),
    }
}
