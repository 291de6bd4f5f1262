//! Driver dashboard: own vehicle and the hazards around it.

use v2v_events::{OperationalSnapshot, Position, SafetyAlert};

use super::{Dashboard, Section};
use crate::session::{ConnectivityStatus, SessionState, ViewVariant};

/// Alerts further away than this are not shown to the driver
const NEARBY_RADIUS_M: f64 = 5_000.0;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters
fn distance_m(a: Position, b: Position) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

fn compass(heading: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let idx = ((heading.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    POINTS[idx]
}

fn alert_line(alert: &SafetyAlert) -> String {
    format!(
        "[{}] {}: {} (from {})",
        alert.severity, alert.alert_type, alert.message, alert.source_vehicle_id
    )
}

pub(super) fn render(state: &SessionState, snapshot: &OperationalSnapshot) -> Dashboard {
    let own = snapshot.own_vehicle();

    let vehicle_lines = match own {
        Some(v) => vec![
            format!("{} ({})", v.vehicle_id, v.vehicle_type),
            format!("Speed: {:.0} km/h", v.speed),
            format!("Heading: {:.0}° {}", v.heading, compass(v.heading)),
        ],
        None => vec!["Vehicle not registered".to_string()],
    };

    // Without a position every active alert counts as nearby
    let mut nearby: Vec<&SafetyAlert> = snapshot
        .active_alerts()
        .filter(|a| {
            own.map_or(true, |v| {
                distance_m(v.position, a.position) <= NEARBY_RADIUS_M + a.radius_m
            })
        })
        .collect();
    nearby.sort_by(|a, b| b.severity.cmp(&a.severity));

    let alert_lines = if nearby.is_empty() {
        vec!["No active alerts nearby".to_string()]
    } else {
        nearby.into_iter().map(alert_line).collect()
    };

    let link_line = match state.connectivity {
        ConnectivityStatus::Connected => "Receiving peer broadcasts",
        ConnectivityStatus::Connecting => "Establishing V2V link...",
        ConnectivityStatus::Disconnected => "V2V link down - alerts may be stale",
    };

    Dashboard::new(
        ViewVariant::Driver,
        state,
        vec![
            Section::new("My Vehicle", vehicle_lines),
            Section::new("Nearby Alerts", alert_lines),
            Section::new("V2V Link", vec![link_line.to_string()]),
        ],
    )
}
