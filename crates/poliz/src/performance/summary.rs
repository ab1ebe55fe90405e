use serde::Serialize;

use crate::incidents::RankLevel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceSummary {
    pub range: ReportRange,
    pub officer: Option<String>,
    pub messaging: MessagingStats,
    pub incidents: IncidentStats,
}

/// Inclusive bounds as ISO-8601 UTC instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagingStats {
    pub conversations: usize,
    pub messages_sent: usize,
    pub messages_received: usize,
    pub first_response_time_ms: Percentiles,
    pub avg_response_time_ms: Percentiles,
    pub active_days: usize,
    pub unread_cleared_count: usize,
}

/// Latency distribution in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Percentiles {
    pub avg: u64,
    pub p50: u64,
    pub p90: u64,
}

impl Percentiles {
    /// Integer mean plus nearest-rank p50/p90. All zeros for an empty sample.
    pub fn from_samples(samples: &[u64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        let total: u128 = sorted.iter().map(|&value| u128::from(value)).sum();
        let avg = (total / sorted.len() as u128) as u64;

        Self {
            avg,
            p50: nearest_rank(&sorted, 50),
            p90: nearest_rank(&sorted, 90),
        }
    }
}

fn nearest_rank(sorted: &[u64], percentile: usize) -> u64 {
    let rank = (percentile * sorted.len()).div_ceil(100).max(1);
    sorted[rank.min(sorted.len()) - 1]
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentStats {
    pub incidents_viewed: usize,
    pub new_alerts_cleared: usize,
    pub by_rank_level: RankDistribution,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct RankDistribution {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RankDistribution {
    pub fn record(&mut self, level: RankLevel) {
        match level {
            RankLevel::Critical => self.critical += 1,
            RankLevel::High => self.high += 1,
            RankLevel::Medium => self.medium += 1,
            RankLevel::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

impl FromIterator<RankLevel> for RankDistribution {
    fn from_iter<T: IntoIterator<Item = RankLevel>>(iter: T) -> Self {
        let mut distribution = Self::default();
        for level in iter {
            distribution.record(level);
        }
        distribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_rank_percentiles() {
        let stats = Percentiles::from_samples(&[40, 10, 30, 20, 50, 60, 70, 80, 90, 100]);
        assert_eq!(stats, Percentiles { avg: 55, p50: 50, p90: 90 });

        let single = Percentiles::from_samples(&[1_500]);
        assert_eq!(single, Percentiles { avg: 1_500, p50: 1_500, p90: 1_500 });

        assert_eq!(Percentiles::from_samples(&[]), Percentiles::default());
    }

    #[test]
    fn rank_distribution_serialises_with_level_keys() {
        let distribution: RankDistribution =
            [RankLevel::Critical, RankLevel::Low, RankLevel::Low].into_iter().collect();

        assert_eq!(distribution.total(), 3);
        assert_eq!(
            serde_json::to_value(distribution).expect("serialise"),
            serde_json::json!({ "CRITICAL": 1, "HIGH": 0, "MEDIUM": 0, "LOW": 2 })
        );
    }
}
