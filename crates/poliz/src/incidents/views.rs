use serde::Serialize;

use super::domain::{Incident, IncidentId};

/// Shape consumed by the dashboard map and incident table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeIncidentView {
    pub id: Option<IncidentId>,
    #[serde(rename = "type")]
    pub incident_type: String,
    pub place_name: Option<String>,
    /// Time of day only, `HH:MM`.
    pub time: String,
    pub description: Option<String>,
    pub status: &'static str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<&Incident> for CrimeIncidentView {
    fn from(incident: &Incident) -> Self {
        let report = incident.report();
        Self {
            id: incident.id(),
            incident_type: report.incident_type.clone(),
            place_name: report.place.clone(),
            time: report.time.format("%H:%M").to_string(),
            description: report.notes.clone(),
            status: incident.rank_level().label(),
            latitude: report.latitude,
            longitude: report.longitude,
        }
    }
}
