use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{Incident, IncidentId, IncidentReport};
use super::repository::{IncidentRepository, RepositoryError};
use super::scoring::{ScoringConfig, ScoringEngine};

/// Sentinel sent by the dashboard type dropdown when no filter is selected.
pub const ALL_TYPES: &str = "All Types";

/// Lifecycle tracker: scores incidents on creation and manages the unseen flag.
pub struct IncidentService<R> {
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
}

impl<R> IncidentService<R>
where
    R: IncidentRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ScoringConfig) -> Self {
        Self {
            repository,
            engine: Arc::new(ScoringEngine::new(config)),
        }
    }

    /// Score a raw report, mark it new, and persist it.
    pub fn add(&self, report: IncidentReport) -> Result<Incident, IncidentServiceError> {
        let assessment = self.engine.assess(&report);
        let incident = Incident::new(report, assessment);

        let stored = self.repository.save(incident).map_err(|err| {
            warn!(error = %err, "failed to persist incident");
            err
        })?;

        info!(
            id = ?stored.id(),
            incident_type = stored.incident_type(),
            score = stored.score(),
            rank = %stored.rank_level(),
            "incident ranked"
        );
        Ok(stored)
    }

    pub fn new_count(&self) -> Result<usize, IncidentServiceError> {
        Ok(self.repository.find_new()?.len())
    }

    /// List incidents, optionally restricted to one type (case-insensitive). Blank filters
    /// and the "All Types" sentinel return everything.
    pub fn list(&self, type_filter: Option<&str>) -> Result<Vec<Incident>, IncidentServiceError> {
        let incidents = self.repository.find_all()?;

        let Some(wanted) = normalized_type_filter(type_filter) else {
            return Ok(incidents);
        };

        Ok(incidents
            .into_iter()
            .filter(|incident| incident.incident_type().trim().to_lowercase() == wanted)
            .collect())
    }

    pub fn get(&self, id: IncidentId) -> Result<Incident, IncidentServiceError> {
        self.repository
            .fetch(id)?
            .ok_or(IncidentServiceError::NotFound(id))
    }

    /// Acknowledge one incident. Already-seen incidents are returned untouched.
    pub fn mark_seen(&self, id: IncidentId) -> Result<Incident, IncidentServiceError> {
        let mut incident = self.get(id)?;
        if !incident.mark_seen() {
            return Ok(incident);
        }
        Ok(self.repository.save(incident)?)
    }

    /// Acknowledge every new incident, returning how many changed state.
    pub fn mark_all_seen(&self) -> Result<usize, IncidentServiceError> {
        let mut cleared = 0;
        for mut incident in self.repository.find_new()? {
            if incident.mark_seen() {
                self.repository.save(incident)?;
                cleared += 1;
            }
        }

        info!(cleared, "marked incidents as seen");
        Ok(cleared)
    }
}

fn normalized_type_filter(type_filter: Option<&str>) -> Option<String> {
    let trimmed = type_filter?.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_TYPES) {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Error raised by the incident service.
#[derive(Debug, thiserror::Error)]
pub enum IncidentServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("incident {0} not found")]
    NotFound(IncidentId),
}
