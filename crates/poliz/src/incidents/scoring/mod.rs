mod config;
mod patterns;
mod rank;
mod rules;

pub use config::{NightWindow, RankThresholds, ScoringConfig, TypeWeights};
pub use patterns::{NotesCategory, PatternMatch, PatternRule, PatternTable};
pub use rank::classify;
pub use rules::{
    location_signal, notes_signal, time_signal, type_signal, Signal, SignalContribution,
};

use super::domain::{IncidentReport, RankLevel};
use serde::Serialize;

/// Stateless evaluator applying the rule tables to a report. Safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn assess(&self, report: &IncidentReport) -> Assessment {
        let signals = rules::score_signals(report, &self.config);
        let score = aggregate(&signals);
        let rank_level = classify(score, &self.config.thresholds);

        Assessment {
            score,
            rank_level,
            actionable: rank_level.is_actionable(),
            signals,
        }
    }
}

/// Purely additive: no caps and no interaction between signals.
pub fn aggregate(signals: &[SignalContribution]) -> u32 {
    signals
        .iter()
        .fold(0u32, |total, signal| total.saturating_add(signal.points))
}

/// Score, tier, and actionable flag computed together so they can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    score: u32,
    #[serde(rename = "rankLevel")]
    rank_level: RankLevel,
    #[serde(rename = "isRanked")]
    actionable: bool,
    signals: Vec<SignalContribution>,
}

impl Assessment {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rank_level(&self) -> RankLevel {
        self.rank_level
    }

    pub fn is_actionable(&self) -> bool {
        self.actionable
    }

    pub fn signals(&self) -> &[SignalContribution] {
        &self.signals
    }

    pub fn points_for(&self, signal: Signal) -> u32 {
        self.signals
            .iter()
            .filter(|contribution| contribution.signal == signal)
            .map(|contribution| contribution.points)
            .sum()
    }
}
