use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use super::scoring::Assessment;

/// Identity assigned by the persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentId(pub u64);

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw incident as reported from the dashboard, before any scoring.
///
/// Only `time` is mandatory. A missing type falls back to the default category and
/// missing place or notes simply contribute nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentReport {
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub incident_type: String,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(deserialize_with = "deserialize_report_time")]
    pub time: NaiveDateTime,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl IncidentReport {
    pub fn new(incident_type: impl Into<String>, time: NaiveDateTime) -> Self {
        Self {
            incident_type: incident_type.into(),
            place: None,
            time,
            notes: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn place_text(&self) -> &str {
        self.place.as_deref().unwrap_or_default()
    }

    pub fn notes_text(&self) -> &str {
        self.notes.as_deref().unwrap_or_default()
    }
}

/// Wall-clock time of a report. RFC 3339 offsets are dropped in favour of the local reading;
/// seconds are optional.
pub fn parse_report_time(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }

    [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ]
    .iter()
    .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}

fn deserialize_report_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_report_time(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised time '{raw}'")))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ordered risk tier derived from the severity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RankLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RankLevel {
    pub fn label(self) -> &'static str {
        match self {
            RankLevel::Low => "LOW",
            RankLevel::Medium => "MEDIUM",
            RankLevel::High => "HIGH",
            RankLevel::Critical => "CRITICAL",
        }
    }

    /// Anything above the lowest tier warrants follow-up.
    pub fn is_actionable(self) -> bool {
        self != RankLevel::Low
    }
}

impl fmt::Display for RankLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Acknowledgement state behind the dashboard badge. `Seen` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    New,
    Seen,
}

/// A scored incident. Score, rank, and the actionable flag are fixed at construction and
/// only the unseen flag may change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Incident {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<IncidentId>,
    #[serde(flatten)]
    report: IncidentReport,
    #[serde(flatten)]
    assessment: Assessment,
    #[serde(rename = "isNew")]
    is_new: bool,
}

impl Incident {
    pub(crate) fn new(report: IncidentReport, assessment: Assessment) -> Self {
        Self {
            id: None,
            report,
            assessment,
            is_new: true,
        }
    }

    /// Used by stores when assigning identity on first save.
    pub fn with_id(mut self, id: IncidentId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<IncidentId> {
        self.id
    }

    pub fn report(&self) -> &IncidentReport {
        &self.report
    }

    pub fn incident_type(&self) -> &str {
        &self.report.incident_type
    }

    pub fn time(&self) -> NaiveDateTime {
        self.report.time
    }

    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    pub fn score(&self) -> u32 {
        self.assessment.score()
    }

    pub fn rank_level(&self) -> RankLevel {
        self.assessment.rank_level()
    }

    pub fn is_actionable(&self) -> bool {
        self.assessment.is_actionable()
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn lifecycle(&self) -> LifecycleState {
        if self.is_new {
            LifecycleState::New
        } else {
            LifecycleState::Seen
        }
    }

    /// Returns `true` when this call moved the incident from new to seen.
    pub fn mark_seen(&mut self) -> bool {
        let transitioned = self.is_new;
        self.is_new = false;
        transitioned
    }
}
