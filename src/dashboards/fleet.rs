//! Fleet manager dashboard: vehicle availability and alert load.

use v2v_events::{OperationalSnapshot, VehicleState};

use super::{Dashboard, Section};
use crate::session::{SessionState, ViewVariant};

const STATES: [VehicleState; 4] = [
    VehicleState::Active,
    VehicleState::Inactive,
    VehicleState::Maintenance,
    VehicleState::Unknown,
];

pub(super) fn render(state: &SessionState, snapshot: &OperationalSnapshot) -> Dashboard {
    let vehicles = &snapshot.vehicles;

    let mut overview = vec![format!("Vehicles: {}", vehicles.len())];
    for vehicle_state in STATES {
        let count = vehicles
            .iter()
            .filter(|v| v.status == vehicle_state)
            .count();
        if count > 0 {
            overview.push(format!("  {vehicle_state}: {count}"));
        }
    }
    overview.push(format!("Active alerts: {}", snapshot.active_alerts().count()));

    let mut sorted: Vec<_> = vehicles.iter().collect();
    sorted.sort_by(|a, b| a.vehicle_id.cmp(&b.vehicle_id));
    let vehicle_lines = if sorted.is_empty() {
        vec!["No vehicles registered".to_string()]
    } else {
        sorted
            .into_iter()
            .map(|v| {
                format!(
                    "{:<10} {:<10} {:<12} {:>4.0} km/h",
                    v.vehicle_id,
                    v.vehicle_type,
                    v.status.to_string(),
                    v.speed
                )
            })
            .collect()
    };

    Dashboard::new(
        ViewVariant::FleetManager,
        state,
        vec![
            Section::new("Fleet Overview", overview),
            Section::new("Vehicles", vehicle_lines),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{OperationalFeed, StaticFeed};

    #[test]
    fn test_overview_counts() {
        let dashboard = render(&SessionState::default(), &StaticFeed::demo().snapshot());
        assert_eq!(dashboard.variant, ViewVariant::FleetManager);
        assert_eq!(dashboard.title, "Fleet Manager Dashboard");

        let overview = &dashboard.section("Fleet Overview").unwrap().lines;
        assert_eq!(overview[0], "Vehicles: 4");
        assert!(overview.contains(&"  active: 3".to_string()));
        assert!(overview.contains(&"  maintenance: 1".to_string()));
        assert!(!overview.iter().any(|l| l.contains("inactive")));
        assert_eq!(overview.last().unwrap(), "Active alerts: 3");
    }

    #[test]
    fn test_vehicles_sorted_by_id() {
        let dashboard = render(&SessionState::default(), &StaticFeed::demo().snapshot());
        let lines = &dashboard.section("Vehicles").unwrap().lines;
        assert!(lines[0].starts_with("amb-01"));
        assert!(lines[3].starts_with("veh-003"));
    }

    #[test]
    fn test_empty_fleet() {
        let dashboard = render(&SessionState::default(), &OperationalSnapshot::default());
        assert_eq!(
            dashboard.section("Vehicles").unwrap().lines,
            vec!["No vehicles registered".to_string()]
        );
    }
}
