use std::collections::BTreeMap;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::patterns::{NotesCategory, PatternRule, PatternTable};

/// Rule tables and thresholds driving the risk engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub type_weights: TypeWeights,
    pub night: NightWindow,
    pub night_bonus: u32,
    pub sensitive_places: Vec<String>,
    pub sensitive_place_bonus: u32,
    pub notes_patterns: PatternTable,
    pub thresholds: RankThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            type_weights: TypeWeights::default(),
            night: NightWindow::default(),
            night_bonus: 10,
            sensitive_places: [
                "park", "school", "hospital", "station", "terminal", "airport", "bts", "mrt",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            sensitive_place_bonus: 8,
            notes_patterns: PatternTable::default(),
            thresholds: RankThresholds::default(),
        }
    }
}

/// Base points per incident type. Lookup is case-sensitive; unknown types get `default`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeWeights {
    pub known: BTreeMap<String, u32>,
    pub default: u32,
}

impl TypeWeights {
    pub fn weight(&self, incident_type: &str) -> u32 {
        self.known
            .get(incident_type)
            .copied()
            .unwrap_or(self.default)
    }

    pub fn is_known(&self, incident_type: &str) -> bool {
        self.known.contains_key(incident_type)
    }
}

impl Default for TypeWeights {
    fn default() -> Self {
        let known = [
            ("Disturbance", 25),
            ("Traffic Accident", 40),
            ("Medical Emergency", 55),
            ("Violent Crime", 70),
            ("Fire", 75),
            ("Armed Robbery", 80),
        ]
        .into_iter()
        .map(|(label, points)| (label.to_string(), points))
        .collect();

        Self { known, default: 10 }
    }
}

/// Local-time window counted as night. `start_hour` is inclusive, `end_hour` exclusive,
/// and the window wraps past midnight when `start_hour > end_hour`. Equal hours make an
/// empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl NightWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        let hour = time.hour();
        if self.start_hour == self.end_hour {
            false
        } else if self.start_hour < self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

impl Default for NightWindow {
    fn default() -> Self {
        Self::new(22, 6)
    }
}

/// Lower bounds (inclusive) of each tier above LOW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankThresholds {
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
}

impl Default for RankThresholds {
    fn default() -> Self {
        Self {
            medium: 50,
            high: 70,
            critical: 90,
        }
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        fn rule(category: NotesCategory, points: u32, keywords: &[&str]) -> PatternRule {
            PatternRule {
                category,
                points,
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            }
        }

        PatternTable::new(vec![
            rule(
                NotesCategory::MinorInjury,
                10,
                &["injur", "child", "hurt", "wounded", "bruise"],
            ),
            rule(
                NotesCategory::Crowd,
                15,
                &["crowd", "mass", "riot", "protest", "gathering"],
            ),
            rule(
                NotesCategory::Serious,
                20,
                &[
                    "unconscious",
                    "not breathing",
                    "life-threatening",
                    "life threatening",
                    "cardiac",
                    "overdose",
                    "severe",
                ],
            ),
            rule(
                NotesCategory::Weapon,
                25,
                &[
                    "weapon", "explosive", "bomb", "firearm", "gunshot", "gunfire", "pistol",
                    "rifle", "knife",
                ],
            ),
        ])
    }
}
