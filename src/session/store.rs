//! SessionStore - owns the session state and fans out changes
//!
//! The store is single-threaded (`Rc`/`RefCell`). Every mutation goes
//! through [`SessionStore::dispatch`]; listeners are called synchronously
//! after each dispatch, in registration order.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use super::action::Action;
use super::reducer::reduce;
use super::state::SessionState;

type Listener = Rc<dyn Fn(&SessionState)>;

/// Shared store handle, cloned into every component that reads or writes the session
pub type SharedStore = Rc<SessionStore>;

#[derive(Default)]
struct Listeners {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Listener)>>,
}

impl Listeners {
    fn add(&self, listener: Listener) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, listener));
        id
    }

    fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    /// Copy of the current list, so listeners may (un)subscribe while being notified
    fn snapshot(&self) -> Vec<Listener> {
        self.entries
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect()
    }
}

/// Handle returned by [`SessionStore::subscribe`].
///
/// Dropping it does not unsubscribe; call [`Subscription::unsubscribe`].
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Subscription {
    /// Remove the listener. Calling it again is a no-op.
    pub fn unsubscribe(&self) {
        if let Some(listeners) = self.listeners.upgrade() {
            if listeners.remove(self.id) {
                trace!(id = self.id, "Listener unsubscribed");
            }
        }
    }
}

/// Ends a dispatch loop, even one unwound by a panicking listener.
///
/// Actions still queued at that point are dropped so the next dispatch
/// starts from an empty queue.
struct DispatchGuard<'a>(&'a SessionStore);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        let dropped = {
            let mut queue = self.0.queue.borrow_mut();
            let len = queue.len();
            queue.clear();
            len
        };
        if dropped > 0 {
            warn!(
                dropped,
                "Discarded queued actions after an aborted dispatch"
            );
        }
        self.0.dispatching.set(false);
    }
}

#[derive(Default)]
pub struct SessionStore {
    state: RefCell<SessionState>,
    listeners: Rc<Listeners>,
    queue: RefCell<VecDeque<Action>>,
    dispatching: Cell<bool>,
}

impl SessionStore {
    /// Create a store holding the default session (Driver, Connecting, empty chat)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared store handle
    pub fn shared() -> SharedStore {
        Rc::new(Self::new())
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Read the current state without cloning it
    pub fn with_state<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Apply an action and notify listeners.
    ///
    /// A dispatch issued from inside a listener is queued and applied once
    /// the current fan-out completes; the nested call returns the state as it
    /// was at that point.
    pub fn dispatch(&self, action: Action) -> SessionState {
        self.queue.borrow_mut().push_back(action);

        if self.dispatching.get() {
            trace!("Dispatch queued behind in-progress dispatch");
            return self.state();
        }

        self.dispatching.set(true);
        let _guard = DispatchGuard(self);

        loop {
            let Some(action) = self.queue.borrow_mut().pop_front() else {
                break;
            };

            let next = reduce(&self.state.borrow(), &action);
            if *self.state.borrow() == next {
                trace!(kind = action.kind(), "Dispatch left state unchanged");
            } else {
                debug!(kind = action.kind(), "Dispatched action");
            }
            *self.state.borrow_mut() = next.clone();

            for listener in self.listeners.snapshot() {
                listener(&next);
            }
        }

        self.state()
    }

    /// Register a listener called after every dispatch
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + 'static) -> Subscription {
        let id = self.listeners.add(Rc::new(listener));
        trace!(id, "Listener subscribed");
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.entries.borrow().len()
    }
}
