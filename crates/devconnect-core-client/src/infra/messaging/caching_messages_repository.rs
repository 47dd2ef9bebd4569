// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::app::deps::DynLocalStorage;
use crate::domain::messaging::models::{Message, MessageId, MessageServerId};
use crate::domain::messaging::repos::MessagesRepository;
use crate::domain::shared::models::ConversationId;
use crate::infra::storage::keys;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct ConversationHistory {
    messages: Vec<Message>,
    /// Timestamp of the newest push-delivered message. Push deliveries that
    /// are not strictly newer are dropped.
    last_push_timestamp: Option<DateTime<Utc>>,
}

/// Per-conversation message history, mirrored to local storage on every
/// mutation.
pub struct CachingMessagesRepository {
    storage: DynLocalStorage,
    histories: RwLock<HashMap<ConversationId, ConversationHistory>>,
}

impl CachingMessagesRepository {
    pub fn restore(storage: DynLocalStorage) -> Self {
        let histories = match storage.get(keys::MESSAGES) {
            Ok(Some(value)) => serde_json::from_str(&value).unwrap_or_else(|err| {
                warn!("Discarding corrupt message mirror: {err}");
                HashMap::new()
            }),
            Ok(None) => HashMap::new(),
            Err(err) => {
                warn!("Failed to read the message mirror: {err}");
                HashMap::new()
            }
        };

        Self {
            storage,
            histories: RwLock::new(histories),
        }
    }

    fn persist(&self, histories: &HashMap<ConversationId, ConversationHistory>) {
        let value = match serde_json::to_string(histories) {
            Ok(value) => value,
            Err(err) => {
                warn!("Failed to serialize the message mirror: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.set(keys::MESSAGES, &value) {
            warn!("Failed to persist the message mirror: {err}");
        }
    }
}

#[async_trait]
impl MessagesRepository for CachingMessagesRepository {
    async fn get_all(&self, conversation_id: &ConversationId) -> Vec<Message> {
        self.histories
            .read()
            .get(conversation_id)
            .map(|history| history.messages.clone())
            .unwrap_or_default()
    }

    async fn replace_all(&self, conversation_id: &ConversationId, messages: Vec<Message>) {
        let mut guard = self.histories.write();
        guard.entry(conversation_id.clone()).or_default().messages = messages;
        self.persist(&guard);
    }

    async fn append(&self, conversation_id: &ConversationId, message: Message) {
        let mut guard = self.histories.write();
        guard
            .entry(conversation_id.clone())
            .or_default()
            .messages
            .push(message);
        self.persist(&guard);
    }

    async fn append_push(&self, conversation_id: &ConversationId, message: Message) -> bool {
        let mut guard = self.histories.write();
        let history = guard.entry(conversation_id.clone()).or_default();

        if let Some(last) = history.last_push_timestamp {
            if message.timestamp <= last {
                return false;
            }
        }

        history.last_push_timestamp = Some(message.timestamp);
        history.messages.push(message);
        self.persist(&guard);
        true
    }

    async fn contains_server_id(
        &self,
        conversation_id: &ConversationId,
        server_id: &MessageServerId,
    ) -> bool {
        self.histories
            .read()
            .get(conversation_id)
            .map(|history| {
                history
                    .messages
                    .iter()
                    .any(|message| message.server_id.as_ref() == Some(server_id))
            })
            .unwrap_or(false)
    }

    async fn update(
        &self,
        conversation_id: &ConversationId,
        id: &MessageId,
        block: Box<dyn for<'a> FnOnce(&'a mut Message) + Send>,
    ) -> bool {
        let mut guard = self.histories.write();
        let Some(message) = guard
            .get_mut(conversation_id)
            .and_then(|history| history.messages.iter_mut().find(|m| &m.id == id))
        else {
            return false;
        };
        block(message);
        self.persist(&guard);
        true
    }

    async fn update_all(
        &self,
        conversation_id: &ConversationId,
        mut block: Box<dyn for<'a> FnMut(&'a mut Message) -> bool + Send>,
    ) -> Vec<MessageId> {
        let mut guard = self.histories.write();
        let Some(history) = guard.get_mut(conversation_id) else {
            return vec![];
        };

        let changed_ids = history
            .messages
            .iter_mut()
            .filter_map(|message| block(message).then(|| message.id.clone()))
            .collect::<Vec<_>>();

        if !changed_ids.is_empty() {
            self.persist(&guard);
        }
        changed_ids
    }
}
