//! Officer activity and incident-mix reporting over a date range.

pub mod router;
pub mod service;
pub mod summary;
pub mod timestamps;

#[cfg(test)]
mod tests;

pub use router::performance_router;
pub use service::{PerformanceError, PerformanceService, SummaryQuery};
pub use summary::{
    IncidentStats, MessagingStats, Percentiles, PerformanceSummary, RankDistribution, ReportRange,
};
pub use timestamps::parse_message_time;
