// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;

use crate::domain::messaging::models::Conversation;
use crate::domain::shared::models::ConversationId;

#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait ConversationsRepository: Send + Sync {
    async fn get(&self, conversation_id: &ConversationId) -> Option<Conversation>;

    async fn get_all(&self) -> Vec<Conversation>;

    async fn replace_all(&self, conversations: Vec<Conversation>);

    async fn upsert(&self, conversation: Conversation);

    /// Applies `block` to the conversation with `conversation_id`. Returns
    /// false if the conversation is unknown.
    async fn update(
        &self,
        conversation_id: &ConversationId,
        block: Box<dyn for<'a> FnOnce(&'a mut Conversation) + Send>,
    ) -> bool;
}
