//! Chat overlay
//!
//! Mounted once by the shell next to (not under) the routed dashboard, so
//! navigation never touches it. Reads and writes only the chat slice of the
//! session.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::session::{Action, ChatMessage, SharedStore};

/// Default upper bound on message length, in characters
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message is empty")]
    Empty,
    #[error("message is {len} characters, limit is {max}")]
    TooLong { len: usize, max: usize },
}

pub struct ChatOverlay {
    store: SharedStore,
    max_message_len: usize,
}

impl ChatOverlay {
    pub fn new(store: SharedStore, max_message_len: usize) -> Self {
        Self {
            store,
            max_message_len,
        }
    }

    pub fn open(&self) {
        self.store.dispatch(Action::ChatOpened);
    }

    pub fn close(&self) {
        self.store.dispatch(Action::ChatClosed);
    }

    /// Flip visibility, returning the new state
    pub fn toggle(&self) -> bool {
        self.store.dispatch(Action::ChatToggled).chat.is_open
    }

    pub fn is_open(&self) -> bool {
        self.store.with_state(|s| s.chat.is_open)
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.store.with_state(|s| s.chat.messages.clone())
    }

    /// Validate and append a message from the active role
    pub fn send(&self, text: &str) -> Result<ChatMessage, ChatError> {
        self.send_at(text, Utc::now())
    }

    /// [`send`](Self::send) with an explicit timestamp
    pub fn send_at(&self, text: &str, timestamp: DateTime<Utc>) -> Result<ChatMessage, ChatError> {
        let text = self.validate(text).inspect_err(|e| {
            warn!(error = %e, "Rejected chat message");
        })?;

        let message = ChatMessage {
            sender: self
                .store
                .with_state(|s| s.active_view.role_name().to_string()),
            text: text.to_string(),
            timestamp,
        };
        debug!(
            sender = %message.sender,
            len = message.text.len(),
            "Sending chat message"
        );
        self.store.dispatch(Action::MessagePosted {
            message: message.clone(),
        });
        Ok(message)
    }

    fn validate<'a>(&self, text: &'a str) -> Result<&'a str, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::Empty);
        }
        let len = text.chars().count();
        if len > self.max_message_len {
            return Err(ChatError::TooLong {
                len,
                max: self.max_message_len,
            });
        }
        Ok(text)
    }

    /// Plain-text rendering for the console shell
    pub fn to_text(&self) -> String {
        self.store.with_state(|s| {
            let chat = &s.chat;
            if !chat.is_open {
                return format!("[chat closed, {} messages]\n", chat.messages.len());
            }

            let mut out = String::from("-- Chat --\n");
            if chat.messages.is_empty() {
                out.push_str("  (no messages yet)\n");
            }
            for m in &chat.messages {
                let _ = writeln!(
                    out,
                    "  {} {}: {}",
                    m.timestamp.format("%H:%M:%S"),
                    m.sender,
                    m.text
                );
            }
            out
        })
    }
}
