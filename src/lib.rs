//! V2V Safety Shell
//!
//! A single operator shell hosting three role dashboards (driver, fleet
//! manager, emergency responder) over one shared session.
//!
//! This library provides:
//! - The session store (pure reducer + ordered subscriptions)
//! - The connectivity monitor (cancellable handshake transition)
//! - The view router (navigation path -> dashboard)
//! - The role view dispatcher and the three dashboards
//! - The chat overlay, independent of navigation

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

pub mod chat;
pub mod config;
pub mod connectivity;
pub mod dashboards;
pub mod feed;
pub mod router;
pub mod session;
pub mod shell;
