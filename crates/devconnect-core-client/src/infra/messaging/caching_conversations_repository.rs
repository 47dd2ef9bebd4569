// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::warn;

use crate::app::deps::DynLocalStorage;
use crate::domain::messaging::models::Conversation;
use crate::domain::messaging::repos::ConversationsRepository;
use crate::domain::shared::models::ConversationId;
use crate::infra::storage::keys;

/// In-memory conversation list mirrored to local storage on every mutation
/// so a failing REST fetch can fall back to the last known state.
pub struct CachingConversationsRepository {
    storage: DynLocalStorage,
    conversations: RwLock<Vec<Conversation>>,
}

impl CachingConversationsRepository {
    pub fn restore(storage: DynLocalStorage) -> Self {
        let conversations = match storage.get(keys::CONVERSATIONS) {
            Ok(Some(value)) => serde_json::from_str(&value).unwrap_or_else(|err| {
                warn!("Discarding corrupt conversation mirror: {err}");
                vec![]
            }),
            Ok(None) => vec![],
            Err(err) => {
                warn!("Failed to read the conversation mirror: {err}");
                vec![]
            }
        };

        Self {
            storage,
            conversations: RwLock::new(conversations),
        }
    }

    fn persist(&self, conversations: &[Conversation]) {
        let value = match serde_json::to_string(conversations) {
            Ok(value) => value,
            Err(err) => {
                warn!("Failed to serialize the conversation mirror: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.set(keys::CONVERSATIONS, &value) {
            warn!("Failed to persist the conversation mirror: {err}");
        }
    }
}

#[async_trait]
impl ConversationsRepository for CachingConversationsRepository {
    async fn get(&self, conversation_id: &ConversationId) -> Option<Conversation> {
        self.conversations
            .read()
            .iter()
            .find(|c| &c.id == conversation_id)
            .cloned()
    }

    async fn get_all(&self) -> Vec<Conversation> {
        self.conversations.read().clone()
    }

    async fn replace_all(&self, conversations: Vec<Conversation>) {
        let mut guard = self.conversations.write();
        *guard = conversations;
        self.persist(&guard);
    }

    async fn upsert(&self, conversation: Conversation) {
        let mut guard = self.conversations.write();
        match guard.iter_mut().find(|c| c.id == conversation.id) {
            Some(existing) => *existing = conversation,
            None => guard.push(conversation),
        }
        self.persist(&guard);
    }

    async fn update(
        &self,
        conversation_id: &ConversationId,
        block: Box<dyn for<'a> FnOnce(&'a mut Conversation) + Send>,
    ) -> bool {
        let mut guard = self.conversations.write();
        let Some(conversation) = guard.iter_mut().find(|c| &c.id == conversation_id) else {
            return false;
        };
        block(conversation);
        self.persist(&guard);
        true
    }
}
