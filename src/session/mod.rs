//! Session state store: state types, actions, the pure reducer and the
//! subscribable store that owns the single session instance.

mod action;
mod reducer;
mod state;
mod store;

pub use action::Action;
pub use reducer::reduce;
pub use state::{ChatMessage, ChatSession, ConnectivityStatus, SessionState, ViewVariant};
pub use store::{SessionStore, SharedStore, Subscription};
