use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{ChatMessage, PeerSummary, UserProfile};
use super::repository::{ChatRepository, RepositoryError};

/// Preview shown for peers without any conversation yet.
pub const DEFAULT_LAST_MESSAGE: &str = "Say hi 👋";

pub struct ChatService<R> {
    repository: Arc<R>,
}

impl<R> ChatService<R>
where
    R: ChatRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Case-insensitive name, exact password.
    pub fn login(&self, name: &str, password: &str) -> Result<UserProfile, ChatServiceError> {
        let user = self
            .repository
            .find_user_by_name(name.trim())?
            .filter(|user| user.password == password);

        match user {
            Some(user) => {
                info!(user = %user.name, "chat login");
                Ok(user.profile())
            }
            None => {
                warn!(user = name, "rejected chat login");
                Err(ChatServiceError::InvalidCredentials)
            }
        }
    }

    /// Everyone except `exclude`, with `exclude`'s unread count for each thread.
    pub fn peers(&self, exclude: &str) -> Result<Vec<PeerSummary>, ChatServiceError> {
        let conversations = self.repository.find_conversations_for(exclude)?;
        let users = self.repository.find_users()?;

        Ok(users
            .into_iter()
            .filter(|user| !user.name.eq_ignore_ascii_case(exclude))
            .map(|user| {
                let conversation = conversations
                    .iter()
                    .find(|conversation| conversation.is_between(exclude, &user.name));
                let unread = conversation.map_or(0, |c| c.unread_for(exclude));
                let last_message = conversation
                    .and_then(|c| c.last_message.as_deref())
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or(DEFAULT_LAST_MESSAGE)
                    .to_string();

                PeerSummary {
                    id: user.id,
                    name: user.name,
                    initials: user.initials,
                    unread,
                    last_message,
                }
            })
            .collect())
    }

    pub fn messages(&self, first: &str, second: &str) -> Result<Vec<ChatMessage>, ChatServiceError> {
        let Some(conversation) = self.repository.find_conversation(first, second)? else {
            return Ok(Vec::new());
        };
        match conversation.id {
            Some(id) => Ok(self.repository.find_messages(id)?),
            None => Ok(Vec::new()),
        }
    }

    /// Append a message, opening the conversation on first contact.
    pub fn send(
        &self,
        sender: &str,
        receiver: &str,
        text: &str,
        time: Option<String>,
    ) -> Result<ChatMessage, ChatServiceError> {
        if text.trim().is_empty() {
            return Err(ChatServiceError::EmptyMessage);
        }

        let message = self
            .repository
            .record_message(sender, receiver, text, time)?;

        info!(
            sender,
            receiver,
            conversation = message.conversation_id.0,
            "chat message sent"
        );
        Ok(message)
    }

    /// Clear `username`'s unread counter in the thread with `peer`. Missing threads are a no-op.
    pub fn mark_read(&self, username: &str, peer: &str) -> Result<bool, ChatServiceError> {
        Ok(self.repository.mark_read(username, peer)?)
    }

    /// Returns how many conversations had unread messages for `username`.
    pub fn mark_all_read(&self, username: &str) -> Result<usize, ChatServiceError> {
        let cleared = self.repository.mark_all_read(username)?;
        info!(user = username, cleared, "marked conversations as read");
        Ok(cleared)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatServiceError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("message text is empty")]
    EmptyMessage,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
