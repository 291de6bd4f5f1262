//! ConnectivityMonitor - drives the session's link status
//!
//! Until a real transport is wired in, link establishment is simulated by a
//! single deferred transition from Connecting to Connected. A transport can
//! report the real outcome through [`ConnectivityMonitor::on_link_event`],
//! which supersedes the simulated one.
//!
//! The deferred transition runs on the current `LocalSet`; `start` must be
//! called from inside one.

use std::cell::RefCell;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use v2v_events::LinkEvent;

use crate::session::{Action, ConnectivityStatus, SharedStore};

/// Handshake delay used when nothing else is configured
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_millis(2000);

struct PendingTransition {
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl PendingTransition {
    fn release(self) {
        self.shutdown.cancel();
        self.task.abort();
    }
}

pub struct ConnectivityMonitor {
    store: SharedStore,
    pending: RefCell<Option<PendingTransition>>,
}

impl ConnectivityMonitor {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            pending: RefCell::new(None),
        }
    }

    /// Schedule the Connecting -> Connected transition after `timeout`.
    ///
    /// Calling this while a transition is pending restarts the timer. Does
    /// nothing if the link status is already settled.
    pub fn start(&self, timeout: Duration) {
        if self.release_pending() {
            debug!("Rescheduling pending handshake transition");
        }

        let status = self.store.with_state(|s| s.connectivity);
        if status.is_terminal() {
            debug!(%status, "Link already settled, not scheduling handshake");
            return;
        }

        let shutdown = CancellationToken::new();
        let cancelled = shutdown.clone();
        let store = self.store.clone();

        let task = tokio::task::spawn_local(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    debug!("Handshake transition cancelled");
                }
                _ = tokio::time::sleep(timeout) => {
                    info!(
                        timeout_ms = timeout.as_millis() as u64,
                        "Handshake completed"
                    );
                    store.dispatch(Action::ConnectivityChanged {
                        status: ConnectivityStatus::Connected,
                    });
                }
            }
        });

        *self.pending.borrow_mut() = Some(PendingTransition { shutdown, task });
        debug!(
            timeout_ms = timeout.as_millis() as u64,
            "Handshake transition scheduled"
        );
    }

    /// Abort the pending transition. No-op if nothing is pending or it already fired.
    pub fn cancel(&self) {
        if self.release_pending() {
            debug!("Handshake transition released");
        }
    }

    /// Whether a transition is scheduled and has not fired yet
    pub fn is_pending(&self) -> bool {
        self.pending
            .borrow()
            .as_ref()
            .is_some_and(|p| !p.task.is_finished())
    }

    /// Apply a link event reported by the transport layer.
    ///
    /// Any simulated transition still pending is dropped first, so the
    /// transport's verdict is the one that lands.
    pub fn on_link_event(&self, event: LinkEvent) {
        debug!(event = event.event_type(), "Applying link event");
        self.cancel();

        let action = match event {
            LinkEvent::Connected => {
                info!("Transport reported link up");
                Action::ConnectivityChanged {
                    status: ConnectivityStatus::Connected,
                }
            }
            LinkEvent::Disconnected { reason } => {
                warn!(
                    reason = reason.as_deref().unwrap_or("unspecified"),
                    "Transport reported link down"
                );
                Action::ConnectivityChanged {
                    status: ConnectivityStatus::Disconnected,
                }
            }
            LinkEvent::Reset => {
                info!("Transport reset link establishment");
                Action::ConnectivityReset
            }
        };

        self.store.dispatch(action);
    }

    /// Returns true if there was something to release
    fn release_pending(&self) -> bool {
        match self.pending.borrow_mut().take() {
            Some(pending) => {
                let was_live = !pending.task.is_finished();
                pending.release();
                was_live
            }
            None => false,
        }
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.get_mut().take() {
            pending.release();
        }
    }
}
