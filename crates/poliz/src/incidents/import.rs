//! Bulk loading of raw incident reports from CSV exports.

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{parse_report_time, IncidentReport};

#[derive(Debug)]
pub enum IncidentImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidTime { line: usize, value: String },
}

impl fmt::Display for IncidentImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncidentImportError::Io(err) => write!(f, "failed to read incident export: {}", err),
            IncidentImportError::Csv(err) => write!(f, "invalid incident CSV data: {}", err),
            IncidentImportError::InvalidTime { line, value } => {
                write!(f, "unrecognised time '{}' on line {}", value, line)
            }
        }
    }
}

impl std::error::Error for IncidentImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IncidentImportError::Io(err) => Some(err),
            IncidentImportError::Csv(err) => Some(err),
            IncidentImportError::InvalidTime { .. } => None,
        }
    }
}

impl From<std::io::Error> for IncidentImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for IncidentImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct IncidentCsvImporter;

impl IncidentCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<IncidentReport>, IncidentImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Expects a header row with `type,place,time,notes,latitude,longitude`; every column
    /// except `time` may be empty or absent.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<IncidentReport>, IncidentImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut reports = Vec::new();

        for (index, record) in csv_reader.deserialize::<IncidentRow>().enumerate() {
            let row = record?;
            // header is line 1
            let line = index + 2;
            let time =
                parse_report_time(&row.time).ok_or_else(|| IncidentImportError::InvalidTime {
                    line,
                    value: row.time.clone(),
                })?;

            reports.push(IncidentReport {
                incident_type: row.incident_type.unwrap_or_default(),
                place: row.place,
                time,
                notes: row.notes,
                latitude: row.latitude,
                longitude: row.longitude,
            });
        }

        Ok(reports)
    }
}

#[derive(Debug, Deserialize)]
struct IncidentRow {
    #[serde(rename = "type", default, deserialize_with = "empty_string_as_none")]
    incident_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    place: Option<String>,
    time: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
