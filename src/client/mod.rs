//! Client side of the chat: the widget state machine, the strategies it
//! uses to get replies, and the other browser-side integrations of the site.

pub mod contact;
pub mod embed;
pub mod provider;
pub mod widget;
