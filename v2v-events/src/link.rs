//! Link establishment events emitted by the V2V transport.
//!
//! The transport layer owns the actual handshake. The only thing it
//! tells the shell is whether the link came up, went down, or was reset.

use serde::{Deserialize, Serialize};

/// Link state change reported by the transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinkEvent {
    /// Handshake completed
    Connected,

    /// Link could not be established or was lost
    Disconnected {
        /// Human readable reason, if the transport gave one
        #[serde(default)]
        reason: Option<String>,
    },

    /// Transport restarted link establishment from scratch
    Reset,
}

impl LinkEvent {
    /// Get the event type as a string (for logging/filtering)
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected { .. } => "disconnected",
            Self::Reset => "reset",
        }
    }
}
