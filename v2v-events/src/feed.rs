//! Operational snapshot delivered to the role dashboards.

use serde::{Deserialize, Serialize};

use crate::fleet::{SafetyAlert, VehicleStatus};

/// Point-in-time view of the fleet as seen by one shell.
///
/// The feed provider decides how fresh this is; the shell only reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OperationalSnapshot {
    /// Vehicle this shell is running in (used by the driver dashboard)
    #[serde(default)]
    pub own_vehicle_id: Option<String>,

    #[serde(default)]
    pub vehicles: Vec<VehicleStatus>,

    #[serde(default)]
    pub alerts: Vec<SafetyAlert>,
}

impl OperationalSnapshot {
    /// The vehicle this shell is running in, if registered
    pub fn own_vehicle(&self) -> Option<&VehicleStatus> {
        let id = self.own_vehicle_id.as_deref()?;
        self.vehicles.iter().find(|v| v.vehicle_id == id)
    }

    /// Alerts still in the active state
    pub fn active_alerts(&self) -> impl Iterator<Item = &SafetyAlert> {
        self.alerts.iter().filter(|a| a.is_active())
    }
}
