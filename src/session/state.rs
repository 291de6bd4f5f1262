//! Session state shared by every dashboard and the chat overlay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The three role dashboards the shell can show.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ViewVariant {
    #[default]
    Driver,
    FleetManager,
    EmergencyResponder,
}

impl ViewVariant {
    pub const ALL: [ViewVariant; 3] = [
        ViewVariant::Driver,
        ViewVariant::FleetManager,
        ViewVariant::EmergencyResponder,
    ];

    /// Canonical navigation path for this dashboard
    pub fn path(self) -> &'static str {
        match self {
            Self::Driver => "/driver",
            Self::FleetManager => "/fleet",
            Self::EmergencyResponder => "/emergency",
        }
    }

    /// Role name shown in headers and used as chat sender
    pub fn role_name(self) -> &'static str {
        match self {
            Self::Driver => "Driver",
            Self::FleetManager => "Fleet Manager",
            Self::EmergencyResponder => "Emergency Responder",
        }
    }
}

impl std::fmt::Display for ViewVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.role_name())
    }
}

/// Link establishment status of the session.
///
/// Connecting is the only non-terminal state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityStatus {
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectivityStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Connecting)
    }
}

impl std::fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connecting => write!(f, "Connecting..."),
            Self::Connected => write!(f, "Connected"),
            Self::Disconnected => write!(f, "Disconnected"),
        }
    }
}

/// One chat entry. Never modified after it is appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatSession {
    /// Append-only, in send order
    pub messages: Vec<ChatMessage>,
    pub is_open: bool,
}

/// Single source of truth for the shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    pub active_view: ViewVariant,
    pub connectivity: ConnectivityStatus,
    pub chat: ChatSession,
}
