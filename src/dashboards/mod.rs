//! Role dashboards and the dispatcher that re-renders them.
//!
//! Each [`ViewVariant`] has exactly one render function, listed in
//! [`RENDERERS`]. A render function reads the session state and an
//! [`OperationalSnapshot`] and produces a [`Dashboard`] view model; it never
//! writes to the store.

mod driver;
mod emergency;
mod fleet;

use std::cell::Cell;
use std::fmt::Write as _;
use std::rc::Rc;

use tracing::debug;
use v2v_events::OperationalSnapshot;

use crate::feed::OperationalFeed;
use crate::session::{ConnectivityStatus, SessionState, SharedStore, Subscription, ViewVariant};

/// Renders one role dashboard
pub type RenderFn = fn(&SessionState, &OperationalSnapshot) -> Dashboard;

/// Dispatch table: one render function per variant, indexed by discriminant
pub const RENDERERS: [(ViewVariant, RenderFn); ViewVariant::ALL.len()] = [
    (ViewVariant::Driver, driver::render),
    (ViewVariant::FleetManager, fleet::render),
    (ViewVariant::EmergencyResponder, emergency::render),
];

// Entry `i` must belong to the variant with discriminant `i`
const _: () = {
    let mut i = 0;
    while i < RENDERERS.len() {
        assert!(RENDERERS[i].0 as usize == i);
        i += 1;
    }
};

pub fn renderer_for(view: ViewVariant) -> RenderFn {
    RENDERERS[view as usize].1
}

/// Render whichever dashboard is active in `state`
pub fn render(state: &SessionState, snapshot: &OperationalSnapshot) -> Dashboard {
    renderer_for(state.active_view)(state, snapshot)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub heading: String,
    pub lines: Vec<String>,
}

impl Section {
    fn new(heading: &str, lines: Vec<String>) -> Self {
        Self {
            heading: heading.to_string(),
            lines,
        }
    }
}

/// View model for one rendered dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub variant: ViewVariant,
    pub title: String,
    pub connectivity: ConnectivityStatus,
    pub sections: Vec<Section>,
}

impl Dashboard {
    fn new(variant: ViewVariant, state: &SessionState, sections: Vec<Section>) -> Self {
        Self {
            variant,
            title: format!("{} Dashboard", variant.role_name()),
            connectivity: state.connectivity,
            sections,
        }
    }

    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }

    /// Plain-text rendering for the console shell
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "== {} ==  [{}]  ({})",
            self.title,
            self.connectivity,
            self.variant.path()
        );
        for section in &self.sections {
            let _ = writeln!(out, "-- {} --", section.heading);
            for line in &section.lines {
                let _ = writeln!(out, "  {line}");
            }
        }
        out
    }
}

/// Keeps the rendered dashboard in step with the store.
///
/// Re-renders when the active view or the link status changes; chat
/// traffic alone does not trigger a re-render.
pub struct RoleViewDispatcher {
    subscription: Subscription,
}

impl RoleViewDispatcher {
    /// Render the current dashboard into `sink`, then again on every relevant change
    pub fn attach(
        store: &SharedStore,
        feed: Rc<dyn OperationalFeed>,
        sink: impl Fn(&Dashboard) + 'static,
    ) -> Self {
        let render_into_sink = move |state: &SessionState| {
            let dashboard = render(state, &feed.snapshot());
            debug!(view = ?dashboard.variant, "Rendered dashboard");
            sink(&dashboard);
        };

        let initial = store.state();
        render_into_sink(&initial);

        let last = Cell::new((initial.active_view, initial.connectivity));
        let subscription = store.subscribe(move |state| {
            let key = (state.active_view, state.connectivity);
            if last.get() != key {
                last.set(key);
                render_into_sink(state);
            }
        });

        Self { subscription }
    }

    pub fn detach(&self) {
        self.subscription.unsubscribe();
    }
}
