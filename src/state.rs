// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::completion::CompletionClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    /// Absent when the credential was not set at startup.
    pub completions: Option<CompletionClient>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let completions = CompletionClient::from_config(reqwest::Client::new(), &config);
        Self { config, completions }
    }
}
