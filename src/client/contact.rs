// src/client/contact.rs
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;

use crate::config::Config;

pub const FORM_RELAY_BASE: &str = "https://formspree.io/f";
pub const STATUS_RESET_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn subject(&self) -> String {
        format!("Contact from {}", self.name)
    }

    fn draft_body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        )
    }
}

#[derive(Serialize)]
struct FormRelayPayload<'a> {
    #[serde(flatten)]
    form: &'a ContactForm,
    #[serde(rename = "_subject")]
    subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Accepted by the form relay service.
    Delivered,
    /// No relay configured; open this `mailto:` URL instead.
    MailDraft(String),
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("form relay rejected submission with status {0}")]
    Rejected(u16),
}

pub fn mailto_url(recipient: &str, form: &ContactForm) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        urlencoding::encode(&form.subject()),
        urlencoding::encode(&form.draft_body())
    )
}

#[derive(Debug, Clone)]
pub struct ContactClient {
    http: reqwest::Client,
    endpoint: Option<String>,
    recipient: String,
}

impl ContactClient {
    pub fn new(http: reqwest::Client, endpoint: Option<String>, recipient: impl Into<String>) -> Self {
        Self { http, endpoint, recipient: recipient.into() }
    }

    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        let endpoint = config
            .formspree_id
            .as_ref()
            .map(|id| format!("{FORM_RELAY_BASE}/{id}"));
        Self::new(http, endpoint, config.contact_email.clone())
    }

    pub async fn submit(&self, form: &ContactForm) -> Result<ContactOutcome, ContactError> {
        let Some(endpoint) = &self.endpoint else {
            return Ok(ContactOutcome::MailDraft(mailto_url(&self.recipient, form)));
        };

        let payload = FormRelayPayload { form, subject: form.subject() };
        let response = self.http.post(endpoint).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "contact form submission rejected");
            return Err(ContactError::Rejected(status.as_u16()));
        }

        tracing::info!("contact form delivered");
        Ok(ContactOutcome::Delivered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

/// Contact form with its submission status. A finished status falls back to
/// `Idle` once [`STATUS_RESET_DELAY`] has passed.
#[derive(Debug)]
pub struct ContactFormState {
    pub form: ContactForm,
    status: FormStatus,
    finished_at: Option<Instant>,
}

impl Default for ContactFormState {
    fn default() -> Self {
        Self { form: ContactForm::default(), status: FormStatus::Idle, finished_at: None }
    }
}

impl ContactFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FormStatus {
        self.status_at(Instant::now())
    }

    pub fn status_at(&self, now: Instant) -> FormStatus {
        match self.finished_at {
            Some(at) if now.saturating_duration_since(at) >= STATUS_RESET_DELAY => FormStatus::Idle,
            _ => self.status,
        }
    }

    /// Submit the current form. The form is cleared only on success.
    pub async fn submit(&mut self, client: &ContactClient) -> Result<ContactOutcome, ContactError> {
        self.status = FormStatus::Submitting;
        self.finished_at = None;

        let result = client.submit(&self.form).await;
        self.status = match &result {
            Ok(_) => {
                self.form = ContactForm::default();
                FormStatus::Success
            }
            Err(_) => FormStatus::Error,
        };
        self.finished_at = Some(Instant::now());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample() -> ContactForm {
        ContactForm {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            message: "Hello & welcome".into(),
        }
    }

    #[test]
    fn mailto_draft_is_percent_encoded() {
        let url = mailto_url("me@example.com", &sample());
        assert_eq!(
            url,
            "mailto:me@example.com?subject=Contact%20from%20Ada%20Lovelace\
             &body=Name%3A%20Ada%20Lovelace%0AEmail%3A%20ada%40example.com%0A%0AMessage%3A%0AHello%20%26%20welcome"
        );
    }

    #[test]
    fn endpoint_comes_from_form_relay_id() {
        let config = Config { formspree_id: Some("xyz".into()), ..Config::default() };
        let client = ContactClient::from_config(reqwest::Client::new(), &config);
        assert_eq!(client.endpoint.as_deref(), Some("https://formspree.io/f/xyz"));
    }

    #[tokio::test]
    async fn without_relay_falls_back_to_mail_draft() {
        let client = ContactClient::new(reqwest::Client::new(), None, "me@example.com");
        let mut state = ContactFormState::new();
        state.form = sample();

        let outcome = state.submit(&client).await.unwrap();
        assert!(matches!(outcome, ContactOutcome::MailDraft(ref url) if url.starts_with("mailto:me@example.com?")));
        assert_eq!(state.status(), FormStatus::Success);
        assert_eq!(state.form, ContactForm::default());
    }

    #[tokio::test]
    async fn posts_to_form_relay_with_subject() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/f/abc"))
            .and(body_json(json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "message": "Hello & welcome",
                "_subject": "Contact from Ada Lovelace"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ContactClient::new(
            reqwest::Client::new(),
            Some(format!("{}/f/abc", server.uri())),
            "me@example.com",
        );
        assert_eq!(client.submit(&sample()).await.unwrap(), ContactOutcome::Delivered);
    }

    #[tokio::test]
    async fn rejection_keeps_form_and_resets_later() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let client = ContactClient::new(reqwest::Client::new(), Some(server.uri()), "me@example.com");
        let mut state = ContactFormState::new();
        state.form = sample();

        let err = state.submit(&client).await.unwrap_err();
        assert!(matches!(err, ContactError::Rejected(422)));
        assert_eq!(state.status(), FormStatus::Error);
        assert_eq!(state.form, sample());

        let later = Instant::now() + STATUS_RESET_DELAY;
        assert_eq!(state.status_at(later), FormStatus::Idle);
    }
}
