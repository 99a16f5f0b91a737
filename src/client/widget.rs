// src/client/widget.rs
//! Chat widget state machine.
//!
//! The widget is either `Closed`, `Open`, or `AwaitingReply`. A send is split
//! into two phases so the transcript contract can be driven without a
//! network: [`ChatWidget::begin_send`] appends the user turn and hands back
//! the snapshot to transmit, [`ChatWidget::reconcile`] appends whatever came
//! back. [`ChatWidget::send`] does both around a [`ReplyProvider`].

use crate::client::provider::{ProviderError, ReplyProvider};
use crate::message::Turn;

/// Assistant turn recorded when a reply could not be obtained.
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Shown while the transcript is empty.
pub static GREETING: [&str; 2] = [
    "Hi! I'm here to answer questions about Muayad.",
    "Try asking about his experience or skills!",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Closed,
    Open,
    AwaitingReply,
}

/// Transcript snapshot for one outbound call: every prior turn plus the new
/// user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    messages: Vec<Turn>,
}

impl PendingSend {
    pub fn messages(&self) -> &[Turn] {
        &self.messages
    }
}

#[derive(Debug, Default)]
pub struct ChatWidget {
    transcript: Vec<Turn>,
    input: String,
    open: bool,
    pending: bool,
    scroll_anchor: Option<usize>,
}

impl ChatWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WidgetState {
        match (self.open, self.pending) {
            (false, _) => WidgetState::Closed,
            (true, true) => WidgetState::AwaitingReply,
            (true, false) => WidgetState::Open,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Collapses the panel. An in-flight send is not cancelled.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Index of the turn the view should be scrolled to.
    pub fn scroll_anchor(&self) -> Option<usize> {
        self.scroll_anchor
    }

    pub fn greeting(&self) -> Option<&'static [&'static str]> {
        self.transcript.is_empty().then_some(&GREETING[..])
    }

    /// Can the user send right now?
    pub fn can_send(&self) -> bool {
        self.open && !self.pending && !self.input.trim().is_empty()
    }

    /// First phase of a send. Appends the user turn, clears the input and
    /// enters `AwaitingReply`. Returns `None` and changes nothing when the
    /// input is blank, a reply is already pending, or the panel is closed.
    pub fn begin_send(&mut self) -> Option<PendingSend> {
        if !self.can_send() {
            return None;
        }

        let content = std::mem::take(&mut self.input);
        self.push(Turn::user(content));
        self.pending = true;

        Some(PendingSend { messages: self.transcript.clone() })
    }

    /// Second phase of a send. Any failure becomes an assistant turn holding
    /// [`ERROR_REPLY`]. Applies even if the widget was closed meanwhile.
    pub fn reconcile(&mut self, result: Result<String, ProviderError>) {
        let turn = match result {
            Ok(reply) => Turn::assistant(reply),
            Err(e) => {
                tracing::warn!(error = %e, "chat reply failed");
                Turn::assistant(ERROR_REPLY)
            }
        };
        self.push(turn);
        self.pending = false;
    }

    /// Run a full round trip. Returns `false` if the send was a no-op.
    pub async fn send(&mut self, provider: &dyn ReplyProvider) -> bool {
        let Some(pending) = self.begin_send() else {
            return false;
        };
        let result = provider.reply(pending.messages()).await;
        self.reconcile(result);
        true
    }

    fn push(&mut self, turn: Turn) {
        self.transcript.push(turn);
        self.scroll_anchor = Some(self.transcript.len() - 1);
    }
}
