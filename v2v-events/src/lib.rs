//! Shared wire types for the V2V safety ecosystem.
//!
//! This crate defines the types that cross boundaries between:
//! - the V2V transport layer - the producer of link events
//! - the operational data feeds - vehicle registry and safety alerts
//! - the V2V shell - the consumer of both
//!
//! # Modules
//! - [`link`] - Link establishment events (LinkEvent)
//! - [`fleet`] - Vehicle and safety alert types
//! - [`feed`] - Operational snapshot delivered to the dashboards

pub mod feed;
pub mod fleet;
pub mod link;

// Re-export commonly used types at crate root
pub use feed::OperationalSnapshot;
pub use fleet::{AlertStatus, Position, SafetyAlert, Severity, VehicleState, VehicleStatus};
pub use link::LinkEvent;
