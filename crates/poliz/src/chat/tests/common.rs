use std::sync::{Arc, Mutex};

use crate::chat::domain::{ChatMessage, Conversation, ConversationId, MessageId, User, UserId};
use crate::chat::repository::{ChatRepository, RepositoryError};
use crate::chat::ChatService;

#[derive(Default)]
struct Store {
    users: Vec<User>,
    conversations: Vec<Conversation>,
    messages: Vec<ChatMessage>,
}

impl Store {
    fn push_message(&mut self, message: ChatMessage) -> ChatMessage {
        let message = ChatMessage {
            id: Some(MessageId(self.messages.len() as u64 + 1)),
            ..message
        };
        self.messages.push(message.clone());
        message
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryChatRepository {
    store: Arc<Mutex<Store>>,
}

impl MemoryChatRepository {
    /// Pim/Ploy with one unread for Ploy, Parn/Sunny with two unread for Parn.
    pub(crate) fn seeded() -> Self {
        let repository = Self::default();
        for (name, initials) in [("Pim", "PM"), ("Ploy", "PP"), ("Parn", "PN"), ("Sunny", "SN")] {
            repository
                .save_user(User::new(name, name).with_initials(initials))
                .expect("user stored");
        }
        repository
            .save_conversation(
                Conversation::new("Pim", "Ploy")
                    .with_last_message("Hey Ploy! How's the report?")
                    .with_unread(0, 1),
            )
            .expect("conversation stored");
        repository
            .save_conversation(
                Conversation::new("Parn", "Sunny")
                    .with_last_message("System maintenance scheduled at 6PM.")
                    .with_unread(2, 0),
            )
            .expect("conversation stored");
        repository
    }

    pub(crate) fn find_all_messages_len(&self) -> usize {
        self.store.lock().expect("chat mutex poisoned").messages.len()
    }

    pub(crate) fn push_message(&self, sender: &str, receiver: &str, time: &str) {
        let conversation_id = ConversationId(0);
        self.append_message(ChatMessage {
            id: None,
            conversation_id,
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            text: "ping".to_string(),
            time: Some(time.to_string()),
        })
        .expect("message stored");
    }
}

impl ChatRepository for MemoryChatRepository {
    fn save_user(&self, user: User) -> Result<User, RepositoryError> {
        let mut guard = self.store.lock().expect("chat mutex poisoned");
        let user = match user.id {
            Some(_) => user,
            None => User {
                id: Some(UserId(guard.users.len() as u64 + 1)),
                ..user
            },
        };
        guard.users.retain(|existing| existing.id != user.id);
        guard.users.push(user.clone());
        Ok(user)
    }

    fn find_users(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.store.lock().expect("chat mutex poisoned").users.clone())
    }

    fn find_user_by_name(&self, name: &str) -> Result<Option<User>, RepositoryError> {
        let guard = self.store.lock().expect("chat mutex poisoned");
        Ok(guard
            .users
            .iter()
            .find(|user| user.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    fn save_conversation(
        &self,
        conversation: Conversation,
    ) -> Result<Conversation, RepositoryError> {
        let mut guard = self.store.lock().expect("chat mutex poisoned");
        match conversation.id {
            Some(id) => {
                let slot = guard
                    .conversations
                    .iter_mut()
                    .find(|existing| existing.id == Some(id))
                    .ok_or(RepositoryError::NotFound)?;
                *slot = conversation.clone();
                Ok(conversation)
            }
            None => {
                let conversation = Conversation {
                    id: Some(ConversationId(guard.conversations.len() as u64 + 1)),
                    ..conversation
                };
                guard.conversations.push(conversation.clone());
                Ok(conversation)
            }
        }
    }

    fn find_conversation(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let guard = self.store.lock().expect("chat mutex poisoned");
        Ok(guard
            .conversations
            .iter()
            .find(|conversation| conversation.is_between(first, second))
            .cloned())
    }

    fn find_conversations_for(
        &self,
        username: &str,
    ) -> Result<Vec<Conversation>, RepositoryError> {
        let guard = self.store.lock().expect("chat mutex poisoned");
        Ok(guard
            .conversations
            .iter()
            .filter(|conversation| conversation.involves(username))
            .cloned()
            .collect())
    }

    fn append_message(&self, message: ChatMessage) -> Result<ChatMessage, RepositoryError> {
        let mut guard = self.store.lock().expect("chat mutex poisoned");
        Ok(guard.push_message(message))
    }

    fn record_message(
        &self,
        sender: &str,
        receiver: &str,
        text: &str,
        time: Option<String>,
    ) -> Result<ChatMessage, RepositoryError> {
        let mut guard = self.store.lock().expect("chat mutex poisoned");
        let existing = guard
            .conversations
            .iter()
            .position(|conversation| conversation.is_between(sender, receiver));
        let index = match existing {
            Some(index) => index,
            None => {
                let id = ConversationId(guard.conversations.len() as u64 + 1);
                guard.conversations.push(Conversation {
                    id: Some(id),
                    ..Conversation::new(sender, receiver)
                });
                guard.conversations.len() - 1
            }
        };
        let conversation = &mut guard.conversations[index];
        conversation.record_message(sender, text);
        let conversation_id = conversation.id.ok_or(RepositoryError::NotFound)?;

        Ok(guard.push_message(ChatMessage {
            id: None,
            conversation_id,
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            text: text.to_string(),
            time,
        }))
    }

    fn mark_read(&self, username: &str, peer: &str) -> Result<bool, RepositoryError> {
        let mut guard = self.store.lock().expect("chat mutex poisoned");
        Ok(guard
            .conversations
            .iter_mut()
            .find(|conversation| conversation.is_between(username, peer))
            .is_some_and(|conversation| conversation.mark_read_for(username)))
    }

    fn mark_all_read(&self, username: &str) -> Result<usize, RepositoryError> {
        let mut guard = self.store.lock().expect("chat mutex poisoned");
        Ok(guard
            .conversations
            .iter_mut()
            .filter(|conversation| conversation.involves(username))
            .map(|conversation| conversation.mark_read_for(username))
            .filter(|cleared| *cleared)
            .count())
    }

    fn find_messages(
        &self,
        conversation: ConversationId,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let guard = self.store.lock().expect("chat mutex poisoned");
        Ok(guard
            .messages
            .iter()
            .filter(|message| message.conversation_id == conversation)
            .cloned()
            .collect())
    }

    fn find_all_messages(&self) -> Result<Vec<ChatMessage>, RepositoryError> {
        Ok(self.store.lock().expect("chat mutex poisoned").messages.clone())
    }
}

pub(crate) struct OfflineChatRepository;

impl ChatRepository for OfflineChatRepository {
    fn save_user(&self, _user: User) -> Result<User, RepositoryError> {
        Err(RepositoryError::Unavailable("chat store offline".to_string()))
    }

    fn find_users(&self) -> Result<Vec<User>, RepositoryError> {
        Err(RepositoryError::Unavailable("chat store offline".to_string()))
    }

    fn find_user_by_name(&self, _name: &str) -> Result<Option<User>, RepositoryError> {
        Err(RepositoryError::Unavailable("chat store offline".to_string()))
    }

    fn save_conversation(
        &self,
        _conversation: Conversation,
    ) -> Result<Conversation, RepositoryError> {
        Err(RepositoryError::Unavailable("chat store offline".to_string()))
    }

    fn find_conversation(
        &self,
        _first: &str,
        _second: &str,
    ) -> Result<Option<Conversation>, RepositoryError> {
        Err(RepositoryError::Unavailable("chat store offline".to_string()))
    }

    fn find_conversations_for(
        &self,
        _username: &str,
    ) -> Result<Vec<Conversation>, RepositoryError> {
        Err(RepositoryError::Unavailable("chat store offline".to_string()))
    }

    fn append_message(&self, _message: ChatMessage) -> Result<ChatMessage, RepositoryError> {
        Err(RepositoryError::Unavailable("chat store offline".to_string()))
    }

    fn record_message(
        &self,
        _sender: &str,
        _receiver: &str,
        _text: &str,
        _time: Option<String>,
    ) -> Result<ChatMessage, RepositoryError> {
        Err(RepositoryError::Unavailable("chat store offline".to_string()))
    }

    fn mark_read(&self, _username: &str, _peer: &str) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("chat store offline".to_string()))
    }

    fn mark_all_read(&self, _username: &str) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("chat store offline".to_string()))
    }

    fn find_messages(
        &self,
        _conversation: ConversationId,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        Err(RepositoryError::Unavailable("chat store offline".to_string()))
    }

    fn find_all_messages(&self) -> Result<Vec<ChatMessage>, RepositoryError> {
        Err(RepositoryError::Unavailable("chat store offline".to_string()))
    }
}

pub(crate) fn build_service() -> (ChatService<MemoryChatRepository>, MemoryChatRepository) {
    let repository = MemoryChatRepository::seeded();
    (ChatService::new(Arc::new(repository.clone())), repository)
}
