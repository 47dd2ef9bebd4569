// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};

use crate::domain::shared::models::{ConversationId, UserId};

/// Events we emit over the real-time channel. Serializes to the wire frame
/// `{"event": "<name>", "payload": {…}}` with camelCased names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientSocketEvent {
    /// Joins the user's own room so that other devices and sessions of the
    /// same account converge.
    Join { user_id: UserId },
    JoinNotificationRoom,
    JoinConversation { conversation_id: ConversationId },
    LeaveConversation { conversation_id: ConversationId },
    SendMessage {
        conversation_id: ConversationId,
        content: String,
    },
    MarkMessagesAsRead { conversation_id: ConversationId },
    Typing { conversation_id: ConversationId },
    StopTyping { conversation_id: ConversationId },
    Heartbeat,
}
