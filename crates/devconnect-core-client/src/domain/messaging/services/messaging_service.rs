// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::messaging::models::{ConversationSummary, RemoteMessage};
use crate::domain::shared::models::{ConversationId, UserId};

/// The conversation and message endpoints of the DevConnect REST API.
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait MessagingService: Send + Sync {
    async fn load_conversations(&self) -> Result<Vec<ConversationSummary>>;

    async fn load_conversation(&self, id: &ConversationId) -> Result<ConversationSummary>;

    async fn load_messages(&self, id: &ConversationId) -> Result<Vec<RemoteMessage>>;

    /// The dedicated one-message fetch used when a conversation summary
    /// carries no resolvable preview.
    async fn load_latest_message(&self, id: &ConversationId) -> Result<Option<RemoteMessage>>;

    async fn mark_messages_read(&self, id: &ConversationId) -> Result<()>;

    async fn create_direct_conversation(&self, user_id: &UserId) -> Result<ConversationSummary>;
}
