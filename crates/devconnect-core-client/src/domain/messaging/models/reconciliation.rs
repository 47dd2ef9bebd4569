// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Duration, Utc};

use crate::domain::messaging::models::{Message, MessageId, MessageServerId, MessageStatus};
use crate::domain::shared::models::ConversationId;

/// The server's acknowledgment for a message we sent optimistically. The
/// send event carries no client id, so the ack is matched back to its
/// placeholder by sender, content and time proximity.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageAck {
    pub conversation_id: ConversationId,
    pub server_id: MessageServerId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

fn is_ack_target(message: &Message, ack: &MessageAck, window: Duration) -> bool {
    message.server_id.is_none()
        && message.sender.is_me()
        && matches!(message.status, MessageStatus::Sending | MessageStatus::Sent)
        && message.content == ack.content
        && (ack.timestamp - message.timestamp).abs() <= window
}

/// Picks the placeholder message the ack belongs to. The oldest candidate
/// wins so that two identical messages sent in quick succession resolve in
/// order.
pub fn find_ack_target(
    messages: &[Message],
    ack: &MessageAck,
    window: Duration,
) -> Option<MessageId> {
    messages
        .iter()
        .find(|message| is_ack_target(message, ack, window))
        .map(|message| message.id.clone())
}
