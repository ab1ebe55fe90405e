use serde::Serialize;

use super::super::domain::IncidentReport;
use super::config::ScoringConfig;

/// Attribute of an incident that contributes points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Type,
    TimeOfDay,
    Location,
    Notes,
}

/// Points awarded by one signal, with a short audit note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalContribution {
    pub signal: Signal,
    pub points: u32,
    pub detail: String,
}

pub fn type_signal(report: &IncidentReport, config: &ScoringConfig) -> SignalContribution {
    let incident_type = report.incident_type.as_str();
    let points = config.type_weights.weight(incident_type);
    let detail = if config.type_weights.is_known(incident_type) {
        format!("base score for '{incident_type}'")
    } else {
        format!("default base score for unlisted type '{incident_type}'")
    };

    SignalContribution {
        signal: Signal::Type,
        points,
        detail,
    }
}

pub fn time_signal(report: &IncidentReport, config: &ScoringConfig) -> SignalContribution {
    let time = report.time.time();
    if config.night.contains(time) {
        SignalContribution {
            signal: Signal::TimeOfDay,
            points: config.night_bonus,
            detail: format!("reported at night ({})", time.format("%H:%M")),
        }
    } else {
        SignalContribution {
            signal: Signal::TimeOfDay,
            points: 0,
            detail: "daytime".to_string(),
        }
    }
}

pub fn location_signal(report: &IncidentReport, config: &ScoringConfig) -> SignalContribution {
    let place = report.place_text().to_lowercase();
    let hit = config
        .sensitive_places
        .iter()
        .find(|keyword| !keyword.is_empty() && place.contains(&keyword.to_lowercase()));

    match hit {
        Some(keyword) => SignalContribution {
            signal: Signal::Location,
            points: config.sensitive_place_bonus,
            detail: format!("sensitive location ({keyword})"),
        },
        None => SignalContribution {
            signal: Signal::Location,
            points: 0,
            detail: "no sensitive location".to_string(),
        },
    }
}

pub fn notes_signal(report: &IncidentReport, config: &ScoringConfig) -> SignalContribution {
    let matched = config.notes_patterns.classify(report.notes_text());
    let detail = match &matched.keyword {
        Some(keyword) => format!("{} keyword '{keyword}'", matched.category.label()),
        None => "no severity keywords".to_string(),
    };

    SignalContribution {
        signal: Signal::Notes,
        points: matched.points,
        detail,
    }
}

/// All four contributions, always in the same order.
pub(crate) fn score_signals(
    report: &IncidentReport,
    config: &ScoringConfig,
) -> Vec<SignalContribution> {
    vec![
        type_signal(report, config),
        time_signal(report, config),
        location_signal(report, config),
        notes_signal(report, config),
    ]
}
