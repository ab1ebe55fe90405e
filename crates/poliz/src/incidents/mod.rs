//! Incident risk scoring, ranking, and the new/seen notification lifecycle.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod views;

#[cfg(test)]
pub(crate) mod tests;

pub use domain::{Incident, IncidentId, IncidentReport, LifecycleState, RankLevel};
pub use import::{IncidentCsvImporter, IncidentImportError};
pub use repository::{IncidentRepository, RepositoryError};
pub use router::incident_router;
pub use scoring::{Assessment, ScoringConfig, ScoringEngine};
pub use service::{IncidentService, IncidentServiceError, ALL_TYPES};
pub use views::CrimeIncidentView;
