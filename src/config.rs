// src/config.rs
use std::env;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_CONTACT_EMAIL: &str = "muayadabduwani@gmail.com";

/// Which path the chat client takes to obtain a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStrategy {
    /// Through the server relay endpoint.
    Relay,
    /// Straight to the completion service with a client-held credential.
    Direct,
}

impl ReplyStrategy {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "direct" => ReplyStrategy::Direct,
            _ => ReplyStrategy::Relay,
        }
    }
}

/// Everything read from the environment, built once at startup and passed
/// down by reference.
#[derive(Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub bind_addr: String,
    pub static_dir: String,
    pub relay_url: String,
    pub reply_strategy: ReplyStrategy,
    pub chatbase_chatbot_id: Option<String>,
    pub formspree_id: Option<String>,
    pub contact_email: String,
}

// Manual impl so the credential never ends up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_base_url", &self.openai_base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("bind_addr", &self.bind_addr)
            .field("static_dir", &self.static_dir)
            .field("relay_url", &self.relay_url)
            .field("reply_strategy", &self.reply_strategy)
            .field("chatbase_chatbot_id", &self.chatbase_chatbot_id)
            .field("formspree_id", &self.formspree_id)
            .field("contact_email", &self.contact_email)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 300,
            temperature: 0.7,
            bind_addr: "0.0.0.0:3000".to_string(),
            static_dir: "public".to_string(),
            relay_url: "http://localhost:3000/api/chat".to_string(),
            reply_strategy: ReplyStrategy::Relay,
            chatbase_chatbot_id: None,
            formspree_id: None,
            contact_email: DEFAULT_CONTACT_EMAIL.to_string(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment. Call `dotenvy::dotenv()`
    /// first if a `.env` file should be honoured.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.openai_base_url),
            model: get("OPENAI_MODEL").unwrap_or(defaults.model),
            max_tokens: get("RELAY_MAX_TOKENS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_tokens),
            temperature: get("RELAY_TEMPERATURE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.temperature),
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: get("STATIC_DIR").unwrap_or(defaults.static_dir),
            relay_url: get("CHAT_RELAY_URL").unwrap_or(defaults.relay_url),
            reply_strategy: get("CHAT_REPLY_STRATEGY")
                .map(|s| ReplyStrategy::parse(&s))
                .unwrap_or(defaults.reply_strategy),
            chatbase_chatbot_id: get("CHATBASE_CHATBOT_ID"),
            formspree_id: get("FORMSPREE_ID").map(|s| s.trim().to_string()),
            contact_email: get("CONTACT_EMAIL").unwrap_or(defaults.contact_email),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.openai_api_key.is_some()
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.openai_base_url)
    }
}
