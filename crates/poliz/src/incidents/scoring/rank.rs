use super::super::domain::RankLevel;
use super::config::RankThresholds;

/// Map a score onto its tier. Checked from the top so overlapping thresholds still resolve
/// to a single tier.
pub fn classify(score: u32, thresholds: &RankThresholds) -> RankLevel {
    if score >= thresholds.critical {
        RankLevel::Critical
    } else if score >= thresholds.high {
        RankLevel::High
    } else if score >= thresholds.medium {
        RankLevel::Medium
    } else {
        RankLevel::Low
    }
}
