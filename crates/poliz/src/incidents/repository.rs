use chrono::NaiveDateTime;

use super::domain::{Incident, IncidentId};
pub use crate::error::RepositoryError;

/// Storage abstraction for scored incidents.
///
/// Implementations own identity assignment and must write each incident atomically; the
/// service performs no locking of its own.
pub trait IncidentRepository: Send + Sync {
    /// Insert when the incident has no id yet, otherwise replace the stored copy.
    fn save(&self, incident: Incident) -> Result<Incident, RepositoryError>;
    fn fetch(&self, id: IncidentId) -> Result<Option<Incident>, RepositoryError>;
    fn find_all(&self) -> Result<Vec<Incident>, RepositoryError>;
    fn find_new(&self) -> Result<Vec<Incident>, RepositoryError>;
    /// Incidents whose `time` lies in `[start, end_exclusive)`.
    fn find_in_range(
        &self,
        start: NaiveDateTime,
        end_exclusive: NaiveDateTime,
    ) -> Result<Vec<Incident>, RepositoryError>;
}
