//! View router: navigation path -> dashboard variant
//!
//! Routes:
//! - `/` redirects to `/driver`
//! - `/driver`, `/fleet`, `/emergency`
//!
//! Anything else falls back to the driver dashboard.

use tracing::{debug, warn};

use crate::session::{Action, SharedStore, ViewVariant};

/// Outcome of matching a path against the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch {
    /// Empty path or `/`
    Root,
    /// One of the dashboard paths
    Dashboard(ViewVariant),
    /// No route matched
    Unmatched,
}

impl RouteMatch {
    pub fn view(self) -> ViewVariant {
        match self {
            Self::Root | Self::Unmatched => ViewVariant::Driver,
            Self::Dashboard(view) => view,
        }
    }
}

/// Strip query, fragment and trailing slashes
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].trim_end_matches('/')
}

pub fn match_path(path: &str) -> RouteMatch {
    match normalize(path.trim()) {
        "" => RouteMatch::Root,
        "/driver" => RouteMatch::Dashboard(ViewVariant::Driver),
        "/fleet" => RouteMatch::Dashboard(ViewVariant::FleetManager),
        "/emergency" => RouteMatch::Dashboard(ViewVariant::EmergencyResponder),
        _ => RouteMatch::Unmatched,
    }
}

/// Resolve a navigation path to the dashboard it shows. Pure.
pub fn resolve(path: &str) -> ViewVariant {
    match_path(path).view()
}

/// Canonical path to display after navigating to `path`
pub fn redirect_target(path: &str) -> &'static str {
    resolve(path).path()
}

/// Applies navigation to the session store.
pub struct ViewRouter {
    store: SharedStore,
}

impl ViewRouter {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Resolve `path` and make it the active view (one dispatch)
    pub fn navigate(&self, path: &str) -> ViewVariant {
        let matched = match_path(path);
        let view = matched.view();
        match matched {
            RouteMatch::Unmatched => {
                warn!(
                    path,
                    fallback = view.path(),
                    "No route for path, showing default dashboard"
                )
            }
            RouteMatch::Root => debug!(path, target = view.path(), "Redirecting root"),
            RouteMatch::Dashboard(_) => debug!(path, "Navigating"),
        }

        self.store.dispatch(Action::Navigate { view });
        view
    }

    pub fn current(&self) -> ViewVariant {
        self.store.with_state(|s| s.active_view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ConnectivityStatus, SessionStore};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_root_resolves_to_driver() {
        assert_eq!(resolve("/"), ViewVariant::Driver);
        assert_eq!(resolve(""), ViewVariant::Driver);
        assert_eq!(match_path("/"), RouteMatch::Root);
        assert_eq!(redirect_target("/"), "/driver");
    }

    #[test]
    fn test_dashboard_paths() {
        assert_eq!(resolve("/driver"), ViewVariant::Driver);
        assert_eq!(resolve("/fleet"), ViewVariant::FleetManager);
        assert_eq!(resolve("/emergency"), ViewVariant::EmergencyResponder);
    }

    #[test]
    fn test_canonical_paths_round_trip() {
        for view in ViewVariant::ALL {
            assert_eq!(match_path(view.path()), RouteMatch::Dashboard(view));
        }
    }

    #[test]
    fn test_resolve_is_referentially_transparent() {
        for path in ["/", "/driver", "/fleet", "/emergency", "/nope"] {
            assert_eq!(resolve(path), resolve(path));
        }
    }

    #[test]
    fn test_normalization() {
        assert_eq!(resolve("/fleet/"), ViewVariant::FleetManager);
        assert_eq!(
            resolve("/emergency?incident=42"),
            ViewVariant::EmergencyResponder
        );
        assert_eq!(resolve("/fleet#map"), ViewVariant::FleetManager);
        assert_eq!(resolve("  /fleet  "), ViewVariant::FleetManager);
    }

    #[test]
    fn test_unknown_paths_fall_back_to_driver() {
        assert_eq!(match_path("/admin"), RouteMatch::Unmatched);
        assert_eq!(match_path("/Fleet"), RouteMatch::Unmatched);
        assert_eq!(match_path("/fleet/vehicles"), RouteMatch::Unmatched);
        assert_eq!(resolve("/admin"), ViewVariant::Driver);
        assert_eq!(redirect_target("/admin"), "/driver");
    }

    #[test]
    fn test_navigate_dispatches_exactly_once() {
        let store = SessionStore::shared();
        let dispatches = Rc::new(Cell::new(0));
        let counter = dispatches.clone();
        let _sub = store.subscribe(move |_| counter.set(counter.get() + 1));

        let router = ViewRouter::new(store.clone());
        assert_eq!(
            router.navigate("/emergency"),
            ViewVariant::EmergencyResponder
        );
        assert_eq!(dispatches.get(), 1);
        assert_eq!(router.current(), ViewVariant::EmergencyResponder);

        router.navigate("/unknown");
        assert_eq!(dispatches.get(), 2);
        assert_eq!(router.current(), ViewVariant::Driver);
    }

    #[test]
    fn test_navigate_leaves_connectivity_and_chat() {
        let store = SessionStore::shared();
        store.dispatch(Action::ConnectivityChanged {
            status: ConnectivityStatus::Connected,
        });
        store.dispatch(Action::ChatOpened);
        let before = store.state();

        let router = ViewRouter::new(store.clone());
        for path in ["/fleet", "/", "/emergency", "/bogus", "/driver"] {
            router.navigate(path);
            let state = store.state();
            assert_eq!(state.connectivity, before.connectivity);
            assert_eq!(state.chat, before.chat);
        }
    }
}
