use super::domain::{ChatMessage, Conversation, ConversationId, User};
pub use crate::error::RepositoryError;

/// Storage for users, conversations, and their messages.
///
/// Name comparisons are case-insensitive. Saves without an id insert and assign one.
pub trait ChatRepository: Send + Sync {
    fn save_user(&self, user: User) -> Result<User, RepositoryError>;
    fn find_users(&self) -> Result<Vec<User>, RepositoryError>;
    fn find_user_by_name(&self, name: &str) -> Result<Option<User>, RepositoryError>;

    fn save_conversation(&self, conversation: Conversation)
        -> Result<Conversation, RepositoryError>;
    /// The conversation between two users, whichever of them is `userA`.
    fn find_conversation(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Option<Conversation>, RepositoryError>;
    fn find_conversations_for(&self, username: &str)
        -> Result<Vec<Conversation>, RepositoryError>;

    fn append_message(&self, message: ChatMessage) -> Result<ChatMessage, RepositoryError>;
    /// Opens the conversation on first contact, bumps the receiver's unread counter, and
    /// appends the message. Runs as one step so concurrent sends neither lose increments
    /// nor open duplicate conversations.
    fn record_message(
        &self,
        sender: &str,
        receiver: &str,
        text: &str,
        time: Option<String>,
    ) -> Result<ChatMessage, RepositoryError>;
    /// Clears `username`'s counter in the thread with `peer`; `true` if it was non-zero.
    fn mark_read(&self, username: &str, peer: &str) -> Result<bool, RepositoryError>;
    /// Clears every counter `username` holds; returns how many were non-zero.
    fn mark_all_read(&self, username: &str) -> Result<usize, RepositoryError>;
    /// Messages in send order.
    fn find_messages(&self, conversation: ConversationId)
        -> Result<Vec<ChatMessage>, RepositoryError>;
    fn find_all_messages(&self) -> Result<Vec<ChatMessage>, RepositoryError>;
}
