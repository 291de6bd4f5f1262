//! Vehicle and safety alert types shared across the V2V ecosystem.
//!
//! Field names follow the registry's JSON so a feed can be deserialized
//! straight from the backend payloads.

use serde::{Deserialize, Serialize};

/// Geographic position (WGS84 degrees)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

/// A registered vehicle as last reported to the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleStatus {
    /// Unique vehicle identifier (e.g., "veh-0042")
    pub vehicle_id: String,

    /// Vehicle class (e.g., "car", "truck", "ambulance")
    #[serde(default = "default_vehicle_type")]
    pub vehicle_type: String,

    /// Last reported position
    pub position: Position,

    /// Speed in km/h
    pub speed: f64,

    /// Heading in degrees (0 = north)
    pub heading: f64,

    /// Registry status
    #[serde(default)]
    pub status: VehicleState,
}

fn default_vehicle_type() -> String {
    "unknown".to_string()
}

/// Registry status of a vehicle
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VehicleState {
    Active,
    Inactive,
    Maintenance,
    /// Unknown/unreported state
    #[default]
    Unknown,
}

impl std::fmt::Display for VehicleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Maintenance => write!(f, "maintenance"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Alert severity, ordered from least to most urgent.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    /// High and critical alerts are routed to emergency responders
    pub fn is_urgent(self) -> bool {
        self >= Self::High
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Lifecycle status of a safety alert
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    Active,
    Acknowledged,
    Resolved,
}

/// A safety alert raised by a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SafetyAlert {
    /// Unique alert identifier
    pub alert_id: String,

    /// Alert kind (e.g., "collision_warning", "road_hazard")
    pub alert_type: String,

    pub severity: Severity,

    /// Where the hazard is
    pub position: Position,

    /// Affected radius in meters
    #[serde(default = "default_radius_m")]
    pub radius_m: f64,

    /// Free-form description
    pub message: String,

    /// Vehicle that raised the alert
    pub source_vehicle_id: String,

    #[serde(default)]
    pub status: AlertStatus,
}

fn default_radius_m() -> f64 {
    100.0
}

impl SafetyAlert {
    pub fn is_active(&self) -> bool {
        self.status == AlertStatus::Active
    }
}
