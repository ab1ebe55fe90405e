use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ConversationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

/// Dashboard account. The password is compared verbatim and never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Option<UserId>,
    pub name: String,
    pub initials: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    /// Initials default to the first two letters of the name, upper-cased.
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        let name = name.into();
        let initials = name.chars().take(2).collect::<String>().to_uppercase();
        Self {
            id: None,
            name,
            initials,
            password: password.into(),
        }
    }

    pub fn with_initials(mut self, initials: impl Into<String>) -> Self {
        self.initials = initials.into();
        self
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.name.clone(),
            initials: self.initials.clone(),
        }
    }
}

/// What a successful login hands back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub initials: String,
}

/// Two-party thread with one unread counter per participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: Option<ConversationId>,
    pub user_a: String,
    pub user_b: String,
    pub last_message: Option<String>,
    pub unread_for_a: u32,
    pub unread_for_b: u32,
}

impl Conversation {
    pub fn new(user_a: impl Into<String>, user_b: impl Into<String>) -> Self {
        Self {
            id: None,
            user_a: user_a.into(),
            user_b: user_b.into(),
            last_message: None,
            unread_for_a: 0,
            unread_for_b: 0,
        }
    }

    pub fn with_last_message(mut self, text: impl Into<String>) -> Self {
        self.last_message = Some(text.into());
        self
    }

    pub fn with_unread(mut self, unread_for_a: u32, unread_for_b: u32) -> Self {
        self.unread_for_a = unread_for_a;
        self.unread_for_b = unread_for_b;
        self
    }

    pub fn involves(&self, username: &str) -> bool {
        self.user_a.eq_ignore_ascii_case(username) || self.user_b.eq_ignore_ascii_case(username)
    }

    /// Matches the pair in either order.
    pub fn is_between(&self, first: &str, second: &str) -> bool {
        (self.user_a.eq_ignore_ascii_case(first) && self.user_b.eq_ignore_ascii_case(second))
            || (self.user_a.eq_ignore_ascii_case(second) && self.user_b.eq_ignore_ascii_case(first))
    }

    pub fn unread_for(&self, username: &str) -> u32 {
        if self.user_a.eq_ignore_ascii_case(username) {
            self.unread_for_a
        } else if self.user_b.eq_ignore_ascii_case(username) {
            self.unread_for_b
        } else {
            0
        }
    }

    /// Records `text` as the latest message and bumps the other side's unread counter.
    /// A sender that is not a participant only updates the preview.
    pub fn record_message(&mut self, sender: &str, text: &str) {
        self.last_message = Some(text.to_string());
        if self.user_a.eq_ignore_ascii_case(sender) {
            self.unread_for_b = self.unread_for_b.saturating_add(1);
        } else if self.user_b.eq_ignore_ascii_case(sender) {
            self.unread_for_a = self.unread_for_a.saturating_add(1);
        }
    }

    /// Returns `true` if a non-zero counter was cleared.
    pub fn mark_read_for(&mut self, username: &str) -> bool {
        let counter = if self.user_a.eq_ignore_ascii_case(username) {
            &mut self.unread_for_a
        } else if self.user_b.eq_ignore_ascii_case(username) {
            &mut self.unread_for_b
        } else {
            return false;
        };
        let cleared = *counter > 0;
        *counter = 0;
        cleared
    }
}

/// One message in a conversation. `time` is kept exactly as the client sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Option<MessageId>,
    pub conversation_id: ConversationId,
    pub sender: String,
    pub receiver: String,
    pub text: String,
    pub time: Option<String>,
}

/// Row in the peer list: another user plus the viewer's unread count and preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerSummary {
    pub id: Option<UserId>,
    pub name: String,
    pub initials: String,
    pub unread: u32,
    pub last_message: String,
}
