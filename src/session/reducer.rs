//! Pure reducer for [`SessionState`].
//!
//! No clock reads, no randomness, no logging: the same state and action
//! always produce the same result.

use super::action::Action;
use super::state::{ConnectivityStatus, SessionState};

pub fn reduce(state: &SessionState, action: &Action) -> SessionState {
    let mut next = state.clone();
    match action {
        Action::Navigate { view } => {
            next.active_view = *view;
        }
        Action::ConnectivityChanged { status } => {
            // Monotonic: only Connecting may move, and only to a terminal status
            if !state.connectivity.is_terminal() && status.is_terminal() {
                next.connectivity = *status;
            }
        }
        Action::ConnectivityReset => {
            next.connectivity = ConnectivityStatus::Connecting;
        }
        Action::ChatOpened => next.chat.is_open = true,
        Action::ChatClosed => next.chat.is_open = false,
        Action::ChatToggled => next.chat.is_open = !state.chat.is_open,
        Action::MessagePosted { message } => {
            next.chat.messages.push(message.clone());
        }
        Action::Unrecognized => {}
    }
    next
}
