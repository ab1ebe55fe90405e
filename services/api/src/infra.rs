use chrono::NaiveDateTime;
use metrics_exporter_prometheus::PrometheusHandle;
use poliz::chat::{
    ChatMessage, ChatRepository, Conversation, ConversationId, MessageId, User, UserId,
};
use poliz::error::RepositoryError;
use poliz::incidents::{Incident, IncidentId, IncidentRepository};
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryIncidentRepository {
    records: Arc<Mutex<BTreeMap<IncidentId, Incident>>>,
}

impl IncidentRepository for InMemoryIncidentRepository {
    fn save(&self, incident: Incident) -> Result<Incident, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let incident = match incident.id() {
            Some(id) if guard.contains_key(&id) => incident,
            Some(_) => return Err(RepositoryError::NotFound),
            None => {
                let next = guard.keys().next_back().map_or(1, |id| id.0 + 1);
                incident.with_id(IncidentId(next))
            }
        };
        if let Some(id) = incident.id() {
            guard.insert(id, incident.clone());
        }
        Ok(incident)
    }

    fn fetch(&self, id: IncidentId) -> Result<Option<Incident>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Incident>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn find_new(&self) -> Result<Vec<Incident>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|incident| incident.is_new())
            .cloned()
            .collect())
    }

    fn find_in_range(
        &self,
        start: NaiveDateTime,
        end_exclusive: NaiveDateTime,
    ) -> Result<Vec<Incident>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|incident| incident.time() >= start && incident.time() < end_exclusive)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct ChatStore {
    users: BTreeMap<UserId, User>,
    conversations: BTreeMap<ConversationId, Conversation>,
    messages: Vec<ChatMessage>,
}

impl ChatStore {
    fn next_conversation_id(&self) -> ConversationId {
        ConversationId(
            self.conversations
                .keys()
                .next_back()
                .map_or(1, |id| id.0 + 1),
        )
    }

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
pub(crate) struct InMemoryChatRepository {
    store: Arc<Mutex<ChatStore>>,
}

impl ChatRepository for InMemoryChatRepository {
    fn save_user(&self, user: User) -> Result<User, RepositoryError> {
        let mut guard = self.store.lock().expect("chat mutex poisoned");
        let id = match user.id {
            Some(id) => id,
            None => UserId(guard.users.keys().next_back().map_or(1, |id| id.0 + 1)),
        };
        let user = User {
            id: Some(id),
            ..user
        };
        guard.users.insert(id, user.clone());
        Ok(user)
    }

    fn find_users(&self) -> Result<Vec<User>, RepositoryError> {
        let guard = self.store.lock().expect("chat mutex poisoned");
        Ok(guard.users.values().cloned().collect())
    }

    fn find_user_by_name(&self, name: &str) -> Result<Option<User>, RepositoryError> {
        let guard = self.store.lock().expect("chat mutex poisoned");
        Ok(guard
            .users
            .values()
            .find(|user| user.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    fn save_conversation(
        &self,
        conversation: Conversation,
    ) -> Result<Conversation, RepositoryError> {
        let mut guard = self.store.lock().expect("chat mutex poisoned");
        let id = match conversation.id {
            Some(id) => id,
            None => guard.next_conversation_id(),
        };
        let conversation = Conversation {
            id: Some(id),
            ..conversation
        };
        guard.conversations.insert(id, conversation.clone());
        Ok(conversation)
    }

    fn find_conversation(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let guard = self.store.lock().expect("chat mutex poisoned");
        Ok(guard
            .conversations
            .values()
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
            .values()
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
            .find(|(_, conversation)| conversation.is_between(sender, receiver))
            .map(|(id, _)| *id);
        let id = match existing {
            Some(id) => id,
            None => {
                let id = guard.next_conversation_id();
                guard.conversations.insert(
                    id,
                    Conversation {
                        id: Some(id),
                        ..Conversation::new(sender, receiver)
                    },
                );
                id
            }
        };
        guard
            .conversations
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?
            .record_message(sender, text);

        Ok(guard.push_message(ChatMessage {
            id: None,
            conversation_id: id,
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
            .values_mut()
            .find(|conversation| conversation.is_between(username, peer))
            .is_some_and(|conversation| conversation.mark_read_for(username)))
    }

    fn mark_all_read(&self, username: &str) -> Result<usize, RepositoryError> {
        let mut guard = self.store.lock().expect("chat mutex poisoned");
        Ok(guard
            .conversations
            .values_mut()
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
        let guard = self.store.lock().expect("chat mutex poisoned");
        Ok(guard.messages.clone())
    }
}
