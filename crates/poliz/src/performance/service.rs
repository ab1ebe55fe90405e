use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use tracing::debug;

use super::summary::{
    IncidentStats, MessagingStats, Percentiles, PerformanceSummary, RankDistribution, ReportRange,
};
use super::timestamps::parse_message_time;
use crate::chat::{ChatMessage, ChatRepository};
use crate::error::RepositoryError;
use crate::incidents::IncidentRepository;

/// Inclusive calendar range, optionally narrowed to one officer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub officer: Option<String>,
}

impl SummaryQuery {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from,
            to,
            officer: None,
        }
    }

    pub fn for_officer(mut self, officer: impl Into<String>) -> Self {
        self.officer = Some(officer.into());
        self
    }

    fn officer(&self) -> Option<&str> {
        self.officer
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

pub struct PerformanceService<C, I> {
    chats: Arc<C>,
    incidents: Arc<I>,
}

impl<C, I> PerformanceService<C, I>
where
    C: ChatRepository + 'static,
    I: IncidentRepository + 'static,
{
    pub fn new(chats: Arc<C>, incidents: Arc<I>) -> Self {
        Self { chats, incidents }
    }

    /// `today` anchors messages that carry only a clock time.
    pub fn summary(
        &self,
        query: &SummaryQuery,
        today: NaiveDate,
    ) -> Result<PerformanceSummary, PerformanceError> {
        if query.to < query.from {
            return Err(PerformanceError::InvalidRange {
                from: query.from,
                to: query.to,
            });
        }

        let start = query.from.and_time(NaiveTime::MIN);
        let end_exclusive = query
            .to
            .succ_opt()
            .ok_or(PerformanceError::InvalidRange {
                from: query.from,
                to: query.to,
            })?
            .and_time(NaiveTime::MIN);

        let officer = query.officer();
        let messages = self.messages_in_window(start, end_exclusive, officer, today)?;
        let messaging = messaging_stats(&messages, officer);

        let by_rank_level: RankDistribution = self
            .incidents
            .find_in_range(start, end_exclusive)?
            .iter()
            .map(|incident| incident.rank_level())
            .collect();
        debug!(
            from = %query.from,
            to = %query.to,
            messages = messages.len(),
            incidents = by_rank_level.total(),
            "performance summary computed"
        );

        Ok(PerformanceSummary {
            range: ReportRange {
                from: iso_instant(start.and_utc()),
                to: iso_instant(end_exclusive.and_utc() - Duration::milliseconds(1)),
            },
            officer: officer.map(str::to_string),
            messaging,
            incidents: IncidentStats {
                incidents_viewed: 0,
                new_alerts_cleared: 0,
                by_rank_level,
            },
        })
    }

    fn messages_in_window(
        &self,
        start: NaiveDateTime,
        end_exclusive: NaiveDateTime,
        officer: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<TimedMessage>, PerformanceError> {
        let start = start.and_utc();
        let end_exclusive = end_exclusive.and_utc();

        Ok(self
            .chats
            .find_all_messages()?
            .into_iter()
            .filter(|message| {
                officer.map_or(true, |name| {
                    message.sender.eq_ignore_ascii_case(name)
                        || message.receiver.eq_ignore_ascii_case(name)
                })
            })
            .filter_map(|message| {
                let at = parse_message_time(message.time.as_deref()?, today)?;
                (at >= start && at < end_exclusive).then_some(TimedMessage { at, message })
            })
            .collect())
    }
}

struct TimedMessage {
    at: DateTime<Utc>,
    message: ChatMessage,
}

fn messaging_stats(messages: &[TimedMessage], officer: Option<&str>) -> MessagingStats {
    let active_days = messages
        .iter()
        .map(|timed| timed.at.date_naive())
        .collect::<HashSet<_>>()
        .len();
    let (first_response, all_responses) = response_latencies(messages, officer);

    let (conversations, sent, received) = match officer {
        None => {
            let pairs = messages
                .iter()
                .map(|timed| pair_key(&timed.message))
                .collect::<HashSet<_>>();
            (pairs.len(), messages.len(), messages.len())
        }
        Some(name) => {
            let mut peers = HashSet::new();
            let mut sent = 0;
            let mut received = 0;
            for timed in messages {
                let message = &timed.message;
                if message.sender.eq_ignore_ascii_case(name) {
                    sent += 1;
                    peers.insert(message.receiver.to_lowercase());
                }
                if message.receiver.eq_ignore_ascii_case(name) {
                    received += 1;
                    peers.insert(message.sender.to_lowercase());
                }
            }
            (peers.len(), sent, received)
        }
    };

    MessagingStats {
        conversations,
        messages_sent: sent,
        messages_received: received,
        first_response_time_ms: Percentiles::from_samples(&first_response),
        avg_response_time_ms: Percentiles::from_samples(&all_responses),
        active_days,
        unread_cleared_count: 0,
    }
}

/// A reply is a message whose sender differs from the previous message in the same pair.
/// Returns (first reply per pair, every reply) latencies in milliseconds.
fn response_latencies(messages: &[TimedMessage], officer: Option<&str>) -> (Vec<u64>, Vec<u64>) {
    let mut threads: BTreeMap<(String, String), Vec<&TimedMessage>> = BTreeMap::new();
    for timed in messages {
        threads.entry(pair_key(&timed.message)).or_default().push(timed);
    }

    let mut first = Vec::new();
    let mut all = Vec::new();
    for thread in threads.values_mut() {
        // stable, so equal timestamps keep send order
        thread.sort_by_key(|timed| timed.at);

        let mut answered = false;
        for window in thread.windows(2) {
            let (previous, current) = (window[0], window[1]);
            if current
                .message
                .sender
                .eq_ignore_ascii_case(&previous.message.sender)
            {
                continue;
            }
            if officer.is_some_and(|name| !current.message.sender.eq_ignore_ascii_case(name)) {
                continue;
            }

            let latency = (current.at - previous.at).num_milliseconds().max(0) as u64;
            if !answered {
                first.push(latency);
                answered = true;
            }
            all.push(latency);
        }
    }
    (first, all)
}

fn pair_key(message: &ChatMessage) -> (String, String) {
    let sender = message.sender.to_lowercase();
    let receiver = message.receiver.to_lowercase();
    if sender <= receiver {
        (sender, receiver)
    } else {
        (receiver, sender)
    }
}

fn iso_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[derive(Debug, thiserror::Error)]
pub enum PerformanceError {
    #[error("invalid range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
