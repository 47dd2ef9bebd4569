// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;

use crate::domain::messaging::models::{Message, MessageId, MessageServerId};
use crate::domain::shared::models::ConversationId;

/// Per-conversation message history. Messages are appended in arrival order,
/// not timestamp order.
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait MessagesRepository: Send + Sync {
    async fn get_all(&self, conversation_id: &ConversationId) -> Vec<Message>;

    /// Replaces the history with a freshly fetched one.
    async fn replace_all(&self, conversation_id: &ConversationId, messages: Vec<Message>);

    async fn append(&self, conversation_id: &ConversationId, message: Message);

    /// Appends a push-delivered message. Returns false and drops the message
    /// if its timestamp is not newer than the last push seen for this
    /// conversation.
    async fn append_push(&self, conversation_id: &ConversationId, message: Message) -> bool;

    async fn contains_server_id(
        &self,
        conversation_id: &ConversationId,
        server_id: &MessageServerId,
    ) -> bool;

    /// Applies `block` to the message with `id`. Returns false if the
    /// message is unknown.
    async fn update(
        &self,
        conversation_id: &ConversationId,
        id: &MessageId,
        block: Box<dyn for<'a> FnOnce(&'a mut Message) + Send>,
    ) -> bool;

    /// Applies `block` to every message of the conversation and returns the
    /// ids of the messages the block reported as changed.
    async fn update_all(
        &self,
        conversation_id: &ConversationId,
        block: Box<dyn for<'a> FnMut(&'a mut Message) -> bool + Send>,
    ) -> Vec<MessageId>;
}
