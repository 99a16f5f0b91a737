// src/services/completion.rs
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;
use crate::message::{CompletionRequest, first_choice_content};

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Thin client for an OpenAI-compatible chat completions endpoint.
/// One call, no retries, no streaming.
#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl CompletionClient {
    /// `None` when no credential is configured.
    pub fn from_config(http: reqwest::Client, config: &Config) -> Option<Self> {
        let api_key = config.openai_api_key.clone()?;
        Some(Self {
            http,
            url: config.completions_url(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Send `messages` as-is and return the first choice's text, or `None`
    /// when the response carries none.
    pub async fn complete(&self, messages: Vec<Value>) -> Result<Option<String>, CompletionError> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        tracing::debug!(
            url = %self.url,
            model = %self.model,
            messages = request.messages.len(),
            "calling completion service"
        );

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status: status.as_u16(), body });
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        Ok(first_choice_content(&body).map(str::to_string))
    }
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("url", &self.url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CompletionClient {
        let config = Config {
            openai_api_key: Some("sk-test".into()),
            openai_base_url: format!("{}/v1", server.uri()),
            ..Config::default()
        };
        CompletionClient::from_config(reqwest::Client::new(), &config).unwrap()
    }

    #[test]
    fn no_key_no_client() {
        assert!(CompletionClient::from_config(reqwest::Client::new(), &Config::default()).is_none());
    }

    #[tokio::test]
    async fn sends_model_limits_and_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "max_tokens": 300,
                "temperature": 0.7
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Hi there"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server)
            .complete(vec![json!({"role": "user", "content": "hi"})])
            .await
            .unwrap();
        assert_eq!(reply.as_deref(), Some("Hi there"));
    }

    #[tokio::test]
    async fn non_success_status_keeps_body_for_logs() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = client_for(&server).complete(vec![]).await.unwrap_err();
        match err {
            CompletionError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_success_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).complete(vec![]).await.unwrap_err();
        assert!(matches!(err, CompletionError::Decode(_)));
    }
}
