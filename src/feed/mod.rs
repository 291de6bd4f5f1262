//! Operational data feeds for the role dashboards
//!
//! The dashboards only need a point-in-time [`OperationalSnapshot`]. Where
//! it comes from (registry API, V2V broadcast, fixture file) is up to the
//! [`OperationalFeed`] implementation.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;
use v2v_events::{
    AlertStatus, OperationalSnapshot, Position, SafetyAlert, Severity, VehicleState, VehicleStatus,
};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read feed file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid feed file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of role-specific operational data
pub trait OperationalFeed {
    fn snapshot(&self) -> OperationalSnapshot;
}

/// Feed that always returns the same snapshot
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    snapshot: OperationalSnapshot,
}

impl StaticFeed {
    pub fn new(snapshot: OperationalSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, FeedError> {
        let raw = std::fs::read_to_string(path).map_err(|source| FeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: OperationalSnapshot =
            serde_json::from_str(&raw).map_err(|source| FeedError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            path = %path.display(),
            vehicles = snapshot.vehicles.len(),
            alerts = snapshot.alerts.len(),
            "Loaded operational feed"
        );
        Ok(Self::new(snapshot))
    }

    /// Small built-in fleet so every dashboard has something to show
    pub fn demo() -> Self {
        let vehicle = |id: &str,
                       kind: &str,
                       lat: f64,
                       lon: f64,
                       speed: f64,
                       heading: f64,
                       status: VehicleState| VehicleStatus {
            vehicle_id: id.to_string(),
            vehicle_type: kind.to_string(),
            position: Position { lat, lon },
            speed,
            heading,
            status,
        };
        let alert = |id: &str,
                     kind: &str,
                     severity: Severity,
                     msg: &str,
                     source: &str| SafetyAlert {
            alert_id: id.to_string(),
            alert_type: kind.to_string(),
            severity,
            position: Position {
                lat: 48.7758,
                lon: 9.1829,
            },
            radius_m: 100.0,
            message: msg.to_string(),
            source_vehicle_id: source.to_string(),
            status: AlertStatus::Active,
        };

        Self::new(OperationalSnapshot {
            own_vehicle_id: Some("veh-001".to_string()),
            vehicles: vec![
                vehicle(
                    "veh-001",
                    "car",
                    48.7758,
                    9.1829,
                    48.0,
                    90.0,
                    VehicleState::Active,
                ),
                vehicle(
                    "veh-002",
                    "truck",
                    48.7801,
                    9.1772,
                    62.5,
                    270.0,
                    VehicleState::Active,
                ),
                vehicle(
                    "veh-003",
                    "van",
                    48.7690,
                    9.1901,
                    0.0,
                    0.0,
                    VehicleState::Maintenance,
                ),
                vehicle(
                    "amb-01",
                    "ambulance",
                    48.7712,
                    9.1750,
                    71.0,
                    45.0,
                    VehicleState::Active,
                ),
            ],
            alerts: vec![
                alert(
                    "alert-1",
                    "collision_warning",
                    Severity::Critical,
                    "Sudden braking ahead on B14",
                    "veh-002",
                ),
                alert(
                    "alert-2",
                    "road_hazard",
                    Severity::Medium,
                    "Debris on right lane",
                    "veh-003",
                ),
                alert(
                    "alert-3",
                    "weather",
                    Severity::Low,
                    "Light fog reported",
                    "veh-001",
                ),
            ],
        })
    }
}

impl OperationalFeed for StaticFeed {
    fn snapshot(&self) -> OperationalSnapshot {
        self.snapshot.clone()
    }
}
