//! Actions accepted by the session store.

use serde::{Deserialize, Serialize};

use super::state::{ChatMessage, ConnectivityStatus, ViewVariant};

/// Everything that can change the session.
///
/// Actions coming from outside the process are parsed with
/// [`Action::from_json`]; any kind this build does not know becomes
/// [`Action::Unrecognized`] and is ignored by the reducer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Switch the active dashboard
    Navigate { view: ViewVariant },

    /// Link establishment finished (only honoured while Connecting)
    ConnectivityChanged {
        status: ConnectivityStatus,
    },

    /// Explicit external reset back to Connecting
    ConnectivityReset,

    ChatOpened,
    ChatClosed,
    ChatToggled,

    /// Append a chat message (timestamp already stamped by the sender)
    MessagePosted {
        message: ChatMessage,
    },

    #[serde(other)]
    Unrecognized,
}

impl Action {
    /// Parse an action from its JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Get the action kind as a string (for logging)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "navigate",
            Self::ConnectivityChanged { .. } => "connectivity_changed",
            Self::ConnectivityReset => "connectivity_reset",
            Self::ChatOpened => "chat_opened",
            Self::ChatClosed => "chat_closed",
            Self::ChatToggled => "chat_toggled",
            Self::MessagePosted { .. } => "message_posted",
            Self::Unrecognized => "unrecognized",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_action_from_json() {
        let action = Action::from_json(r#"{"type":"navigate","view":"fleet_manager"}"#).unwrap();
        assert_eq!(
            action,
            Action::Navigate {
                view: ViewVariant::FleetManager
            }
        );
        assert_eq!(action.kind(), "navigate");
    }

    #[test]
    fn test_unknown_action_kind_is_unrecognized() {
        let action = Action::from_json(r#"{"type":"self_destruct"}"#).unwrap();
        assert_eq!(action, Action::Unrecognized);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Action::from_json("not json").is_err());
    }
}
