// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::connection::models::ConnectionError;
use crate::domain::messaging::models::{MessageServerId, RemoteMessage};
use crate::domain::notifications::models::NotificationPayload;
use crate::domain::shared::models::{ConversationId, UserId};

/// A typed push event as delivered by the real-time channel (or synthesized
/// by the connection itself). Payloads are deliberately loose, each handler
/// validates what it needs and drops the rest.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// Event related to the connection status.
    Connection(ConnectionEvent),
    /// Events about received messages, acks and receipts.
    Message(MessageEvent),
    /// Events about changes to the notification list.
    Notification(NotificationEvent),
    /// Events that affect the status of a user within a conversation or
    /// globally.
    UserStatus(UserStatusEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    Connected,
    Disconnected { error: Option<ConnectionError> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageEvent {
    /// `newMessage`
    Received(RemoteMessage),
    /// `messageSent`, the ack for an optimistic send.
    Acknowledged(MessageAckPayload),
    /// `messagesDelivered`
    Delivered(ReceiptPayload),
    /// `messagesRead`
    Read(ReceiptPayload),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
    /// `newNotification`
    Added(NotificationPayload),
    /// `notificationUpdated`, the server's authoritative unread count.
    UnreadCountChanged(UnreadCountPayload),
    /// `userUnfollowed`
    SenderUnfollowed(UnfollowPayload),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserStatusEvent {
    /// `userTyping`
    Typing(TypingPayload),
    /// `userStoppedTyping`
    StoppedTyping(TypingPayload),
    /// `userStatusUpdate`
    StatusUpdate(UserStatusPayload),
    /// `onlineUsers`, the full set of currently online users.
    OnlineUsers(OnlineUsersPayload),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAckPayload {
    #[serde(default)]
    pub conversation_id: Option<ConversationId>,
    #[serde(default, rename = "messageId")]
    pub server_id: Option<MessageServerId>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPayload {
    #[serde(default)]
    pub conversation_id: Option<ConversationId>,
    /// The affected messages. When empty the receipt applies to all of our
    /// own messages in the conversation.
    #[serde(default)]
    pub message_ids: Vec<MessageServerId>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountPayload {
    #[serde(default)]
    pub unread_count: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfollowPayload {
    pub user_id: UserId,
    #[serde(default)]
    pub unread_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingPayload {
    #[serde(default)]
    pub conversation_id: Option<ConversationId>,
    pub user_id: UserId,
    #[serde(default)]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusPayload {
    pub user_id: UserId,
    #[serde(default)]
    pub is_online: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineUsersPayload {
    #[serde(default)]
    pub user_ids: Vec<UserId>,
}
