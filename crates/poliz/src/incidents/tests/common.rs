use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::incidents::domain::{Incident, IncidentId, IncidentReport};
use crate::incidents::repository::{IncidentRepository, RepositoryError};
use crate::incidents::scoring::{ScoringConfig, ScoringEngine};
use crate::incidents::IncidentService;

pub(crate) fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .expect("valid date")
        .and_hms_opt(hour, minute, 0)
        .expect("valid time")
}

/// Default type, daytime, ordinary place, no notes: every signal at its baseline.
pub(crate) fn base_report() -> IncidentReport {
    IncidentReport::new("Other", at(14, 0))
        .with_place("office")
        .with_notes("")
}

pub(crate) fn engine() -> ScoringEngine {
    ScoringEngine::new(ScoringConfig::default())
}

pub(crate) fn build_service() -> (IncidentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = IncidentService::new(repository.clone(), ScoringConfig::default());
    (service, repository)
}

#[derive(Default, Clone)]
pub(crate) struct MemoryRepository {
    records: Arc<Mutex<BTreeMap<IncidentId, Incident>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryRepository {
    pub(crate) fn save_count(&self) -> usize {
        *self.saves.lock().expect("repository mutex poisoned")
    }
}

impl IncidentRepository for MemoryRepository {
    fn save(&self, incident: Incident) -> Result<Incident, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let incident = match incident.id() {
            Some(_) => incident,
            None => {
                let next = guard.keys().next_back().map_or(1, |id| id.0 + 1);
                incident.with_id(IncidentId(next))
            }
        };
        let id = incident.id().expect("id assigned above");
        guard.insert(id, incident.clone());
        *self.saves.lock().expect("repository mutex poisoned") += 1;
        Ok(incident)
    }

    fn fetch(&self, id: IncidentId) -> Result<Option<Incident>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Incident>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn find_new(&self) -> Result<Vec<Incident>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().filter(|i| i.is_new()).cloned().collect())
    }

    fn find_in_range(
        &self,
        start: NaiveDateTime,
        end_exclusive: NaiveDateTime,
    ) -> Result<Vec<Incident>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|i| i.time() >= start && i.time() < end_exclusive)
            .cloned()
            .collect())
    }
}

pub(crate) struct UnavailableRepository;

impl IncidentRepository for UnavailableRepository {
    fn save(&self, _incident: Incident) -> Result<Incident, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: IncidentId) -> Result<Option<Incident>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_all(&self) -> Result<Vec<Incident>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_new(&self) -> Result<Vec<Incident>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_in_range(
        &self,
        _start: NaiveDateTime,
        _end_exclusive: NaiveDateTime,
    ) -> Result<Vec<Incident>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
