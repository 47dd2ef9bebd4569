// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::messaging::models::{MessageId, MessageServerId};
use crate::domain::shared::models::{ConversationId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Sender {
    /// The logged-in user on this device.
    Me,
    User { id: UserId, name: String },
}

impl Sender {
    pub fn is_me(&self) -> bool {
        matches!(self, Sender::Me)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Text,
    File,
}

/// Delivery status of a message. Ordered, transitions only ever move
/// forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Sending,
    Sent,
    Delivered,
    Read,
}

impl MessageStatus {
    /// Moves the status to `target` if that is a step forward. Returns
    /// whether anything changed, a backward move is ignored.
    pub fn advance(&mut self, target: MessageStatus) -> bool {
        if target > *self {
            *self = target;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<MessageServerId>,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub status: MessageStatus,
    #[serde(default)]
    pub kind: MessageKind,
}

/// A message as the backend delivers it, via REST history or a `newMessage`
/// push. Fields are loose on purpose, push payloads are validated in the
/// event handler and dropped when incomplete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMessage {
    #[serde(default)]
    pub id: Option<MessageServerId>,
    #[serde(default)]
    pub conversation_id: Option<ConversationId>,
    #[serde(default)]
    pub sender_id: Option<UserId>,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub kind: MessageKind,
}

impl RemoteMessage {
    /// Converts into a local message. `me` decides whether the sender
    /// collapses into the `Me` sentinel, missing timestamps fall back to
    /// `received_at`.
    pub fn into_message(
        self,
        local_id: MessageId,
        me: &UserId,
        received_at: DateTime<Utc>,
    ) -> Option<Message> {
        let content = self.content?;
        let sender = match self.sender_id {
            Some(id) if &id == me => Sender::Me,
            Some(id) => Sender::User {
                name: self.sender_name.unwrap_or_else(|| id.to_string()),
                id,
            },
            None => return None,
        };
        let status = if sender.is_me() {
            MessageStatus::Sent
        } else {
            MessageStatus::Read
        };
        Some(Message {
            id: local_id,
            server_id: self.id,
            sender,
            content,
            timestamp: self.timestamp.unwrap_or(received_at),
            status,
            kind: self.kind,
        })
    }
}
