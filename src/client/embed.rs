// src/client/embed.rs
use crate::config::Config;

pub const CHATBASE_DOMAIN: &str = "www.chatbase.co";

/// The third-party chatbot id, if one is configured. Blank values and
/// template placeholders (`your_...`) count as unset.
pub fn chatbot_id(config: &Config) -> Option<&str> {
    config
        .chatbase_chatbot_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty() && !id.contains("your_"))
}

pub fn script_url(chatbot_id: &str) -> String {
    format!(
        "https://{CHATBASE_DOMAIN}/embed.min.js?chatbotId={}&domain={CHATBASE_DOMAIN}",
        urlencoding::encode(chatbot_id)
    )
}
