//! Officer-to-officer messaging shown next to the incident dashboard.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use domain::{
    ChatMessage, Conversation, ConversationId, MessageId, PeerSummary, User, UserId, UserProfile,
};
pub use repository::ChatRepository;
pub use router::chat_router;
pub use service::{ChatService, ChatServiceError, DEFAULT_LAST_MESSAGE};
