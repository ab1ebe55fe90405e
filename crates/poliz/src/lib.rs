//! Incident triage dashboard backend.
//!
//! The core is the incident risk engine under [`incidents`]: reports are scored from
//! independent signals, ranked into tiers, and tracked through a new/seen lifecycle that
//! drives dashboard badges. [`chat`] and [`performance`] cover the side features of the
//! dashboard.

pub mod chat;
pub mod config;
pub mod error;
pub mod incidents;
pub mod performance;
pub mod telemetry;
