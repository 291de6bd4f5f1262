//! Emergency responder dashboard: urgent incidents and available units.

use v2v_events::{OperationalSnapshot, SafetyAlert, VehicleState};

use super::{Dashboard, Section};
use crate::session::{SessionState, ViewVariant};

/// Vehicle types that count as responder units
const RESPONDER_TYPES: [&str; 3] = ["ambulance", "fire_truck", "police"];

pub(super) fn render(state: &SessionState, snapshot: &OperationalSnapshot) -> Dashboard {
    let mut urgent: Vec<&SafetyAlert> = snapshot
        .active_alerts()
        .filter(|a| a.severity.is_urgent())
        .collect();
    urgent.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.alert_id.cmp(&b.alert_id))
    });

    let incident_lines = if urgent.is_empty() {
        vec!["No urgent incidents".to_string()]
    } else {
        urgent
            .into_iter()
            .map(|a| {
                format!(
                    "{} [{}] {} at {:.4},{:.4} r={:.0}m: {}",
                    a.alert_id,
                    a.severity,
                    a.alert_type,
                    a.position.lat,
                    a.position.lon,
                    a.radius_m,
                    a.message
                )
            })
            .collect()
    };

    let responders: Vec<String> = snapshot
        .vehicles
        .iter()
        .filter(|v| RESPONDER_TYPES.contains(&v.vehicle_type.as_str()))
        .filter(|v| v.status == VehicleState::Active)
        .map(|v| format!("{} ({}) {:.0} km/h", v.vehicle_id, v.vehicle_type, v.speed))
        .collect();
    let responder_lines = if responders.is_empty() {
        vec!["No responder units available".to_string()]
    } else {
        responders
    };

    let other = snapshot
        .active_alerts()
        .filter(|a| !a.severity.is_urgent())
        .count();

    Dashboard::new(
        ViewVariant::EmergencyResponder,
        state,
        vec![
            Section::new("Urgent Incidents", incident_lines),
            Section::new("Responder Units", responder_lines),
            Section::new(
                "Other Alerts",
                vec![format!("{other} lower-severity alerts active")],
            ),
        ],
    )
}
