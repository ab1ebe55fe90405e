
use std::sync::Arc;

use chrono::NaiveDate;

use crate::chat::tests::common::MemoryChatRepository;
use crate::incidents::scoring::ScoringConfig;
use crate::incidents::tests::common::MemoryRepository;
use crate::incidents::{IncidentReport, IncidentService};
use crate::performance::PerformanceService;

pub(super) fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).expect("valid date")
}

/// Two November threads (Pim/Ploy and Nine/Pim) plus out-of-range and unparseable noise.
pub(super) fn chat_history() -> MemoryChatRepository {
    let chats = MemoryChatRepository::default();
    chats.push_message("Pim", "Ploy", "2025-11-01T08:00:00Z");
    chats.push_message("Ploy", "Pim", "2025-11-01T08:00:30Z");
    chats.push_message("Ploy", "Pim", "2025-11-01T08:01:00Z");
    chats.push_message("Pim", "Ploy", "2025-11-01 08:03:00");
    chats.push_message("Nine", "Pim", "2025-11-02 10:00");
    chats.push_message("Pim", "Nine", "02-11-2025 10:10");
    chats.push_message("Earn", "Nine", "2025-12-01T00:00:00Z");
    chats.push_message("Sunny", "Parn", "sometime");
    chats.push_message("Parn", "Sunny", "2025-10-31T23:59:59Z");
    chats
}

/// One incident per tier except HIGH inside November, one in December.
pub(super) fn incident_history() -> MemoryRepository {
    let repository = Arc::new(MemoryRepository::default());
    let service = IncidentService::new(repository.clone(), ScoringConfig::default());
    let reports = [
        IncidentReport::new("Fire", date(11, 5).and_hms_opt(23, 0, 0).expect("time"))
            .with_place("Lumpini Park"),
        IncidentReport::new("Other", date(11, 10).and_hms_opt(14, 0, 0).expect("time")),
        IncidentReport::new(
            "Traffic Accident",
            date(11, 30).and_hms_opt(23, 59, 0).expect("time"),
        ),
        IncidentReport::new("Armed Robbery", date(12, 1).and_hms_opt(0, 0, 0).expect("time")),
    ];
    for report in reports {
        service.add(report).expect("incident stored");
    }
    (*repository).clone()
}

pub(super) fn build_service() -> PerformanceService<MemoryChatRepository, MemoryRepository> {
    PerformanceService::new(Arc::new(chat_history()), Arc::new(incident_history()))
}
