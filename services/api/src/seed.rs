use chrono::{NaiveDate, NaiveTime};
use poliz::chat::{ChatRepository, ChatServiceError, Conversation, User};
use poliz::error::AppError;
use poliz::incidents::{IncidentReport, IncidentRepository, IncidentService};
use tracing::info;

const USERS: [(&str, &str); 6] = [
    ("Pim", "PM"),
    ("Ploy", "PP"),
    ("Nine", "NE"),
    ("Earn", "EN"),
    ("Parn", "PN"),
    ("Sunny", "SN"),
];

struct DemoIncident {
    incident_type: &'static str,
    place: &'static str,
    hour: u32,
    minute: u32,
    notes: &'static str,
    latitude: f64,
    longitude: f64,
}

const INCIDENTS: [DemoIncident; 5] = [
    DemoIncident {
        incident_type: "Armed Robbery",
        place: "Central Ladprao",
        hour: 18,
        minute: 53,
        notes: "Armed robbery reported at mall parking area.",
        latitude: 13.817174,
        longitude: 100.561963,
    },
    DemoIncident {
        incident_type: "Traffic Accident",
        place: "Chulalongkorn Hospital",
        hour: 12,
        minute: 5,
        notes: "Traffic accident near hospital main entrance. EMS on site.",
        latitude: 13.732561,
        longitude: 100.536426,
    },
    DemoIncident {
        incident_type: "Violent Crime",
        place: "Lumpini Park",
        hour: 9,
        minute: 38,
        notes: "Assault reported near the lake jogging path. Patrol dispatched.",
        latitude: 13.730556,
        longitude: 100.541664,
    },
    DemoIncident {
        incident_type: "Traffic Accident",
        place: "BTS Bang Wa",
        hour: 8,
        minute: 58,
        notes: "Collision between motorcycle and taxi at station entrance.",
        latitude: 13.7225,
        longitude: 100.4597,
    },
    DemoIncident {
        incident_type: "Fire",
        place: "Mahidol University (Salaya Campus)",
        hour: 8,
        minute: 30,
        notes: "Small fire reported near parking area, under investigation.",
        latitude: 13.79452,
        longitude: 100.32183,
    },
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SeedOutcome {
    pub(crate) users: usize,
    pub(crate) conversations: usize,
    pub(crate) incidents: usize,
}

/// Populate empty stores with the dashboard's demo accounts, threads, and incidents.
/// Stores that already hold data are left alone. Demo incidents are dated `today`.
pub(crate) fn seed_demo_data<I, C>(
    incidents: &IncidentService<I>,
    chats: &C,
    today: NaiveDate,
) -> Result<SeedOutcome, AppError>
where
    I: IncidentRepository + 'static,
    C: ChatRepository,
{
    let mut outcome = SeedOutcome::default();

    if chats.find_users().map_err(ChatServiceError::from)?.is_empty() {
        for (name, initials) in USERS {
            chats
                .save_user(User::new(name, name).with_initials(initials))
                .map_err(ChatServiceError::from)?;
            outcome.users += 1;
        }

        for conversation in demo_conversations() {
            chats
                .save_conversation(conversation)
                .map_err(ChatServiceError::from)?;
            outcome.conversations += 1;
        }
    }

    if incidents.list(None)?.is_empty() {
        for demo in &INCIDENTS {
            let time = NaiveTime::from_hms_opt(demo.hour, demo.minute, 0).unwrap_or(NaiveTime::MIN);
            let report = IncidentReport::new(demo.incident_type, today.and_time(time))
                .with_place(demo.place)
                .with_notes(demo.notes)
                .with_coordinates(demo.latitude, demo.longitude);
            incidents.add(report)?;
            outcome.incidents += 1;
        }
    }

    info!(
        users = outcome.users,
        conversations = outcome.conversations,
        incidents = outcome.incidents,
        "demo data seeded"
    );
    Ok(outcome)
}

fn demo_conversations() -> [Conversation; 4] {
    [
        Conversation::new("Pim", "Ploy")
            .with_last_message("Hey Ploy! How's the report?")
            .with_unread(0, 1),
        Conversation::new("Nine", "Earn").with_last_message("Got it, heading to station now."),
        Conversation::new("Parn", "Sunny")
            .with_last_message("System maintenance scheduled at 6PM.")
            .with_unread(2, 0),
        Conversation::new("Ploy", "Earn").with_last_message("Ready for patrol."),
    ]
}
