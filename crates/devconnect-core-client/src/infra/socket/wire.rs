// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::Deserialize;

use crate::app::event_handlers::{
    MessageAckPayload, MessageEvent, NotificationEvent, OnlineUsersPayload, ReceiptPayload,
    ServerEvent, TypingPayload, UnfollowPayload, UnreadCountPayload, UserStatusEvent,
    UserStatusPayload,
};
use crate::domain::messaging::models::RemoteMessage;
use crate::domain::notifications::models::NotificationPayload;

/// An inbound wire frame: `{"event": "<name>", "payload": {…}}`. Frames with
/// an unknown event name fail deserialization and are dropped by the caller.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum ServerFrame {
    NewNotification(NotificationPayload),
    NotificationUpdated(UnreadCountPayload),
    UserUnfollowed(UnfollowPayload),
    NewMessage(RemoteMessage),
    MessageSent(MessageAckPayload),
    MessagesDelivered(ReceiptPayload),
    MessagesRead(ReceiptPayload),
    UserTyping(TypingPayload),
    UserStoppedTyping(TypingPayload),
    UserStatusUpdate(UserStatusPayload),
    OnlineUsers(OnlineUsersPayload),
}

impl From<ServerFrame> for ServerEvent {
    fn from(frame: ServerFrame) -> Self {
        match frame {
            ServerFrame::NewNotification(payload) => {
                ServerEvent::Notification(NotificationEvent::Added(payload))
            }
            ServerFrame::NotificationUpdated(payload) => {
                ServerEvent::Notification(NotificationEvent::UnreadCountChanged(payload))
            }
            ServerFrame::UserUnfollowed(payload) => {
                ServerEvent::Notification(NotificationEvent::SenderUnfollowed(payload))
            }
            ServerFrame::NewMessage(payload) => {
                ServerEvent::Message(MessageEvent::Received(payload))
            }
            ServerFrame::MessageSent(payload) => {
                ServerEvent::Message(MessageEvent::Acknowledged(payload))
            }
            ServerFrame::MessagesDelivered(payload) => {
                ServerEvent::Message(MessageEvent::Delivered(payload))
            }
            ServerFrame::MessagesRead(payload) => {
                ServerEvent::Message(MessageEvent::Read(payload))
            }
            ServerFrame::UserTyping(payload) => {
                ServerEvent::UserStatus(UserStatusEvent::Typing(payload))
            }
            ServerFrame::UserStoppedTyping(payload) => {
                ServerEvent::UserStatus(UserStatusEvent::StoppedTyping(payload))
            }
            ServerFrame::UserStatusUpdate(payload) => {
                ServerEvent::UserStatus(UserStatusEvent::StatusUpdate(payload))
            }
            ServerFrame::OnlineUsers(payload) => {
                ServerEvent::UserStatus(UserStatusEvent::OnlineUsers(payload))
            }
        }
    }
}

pub fn parse_frame(text: &str) -> Result<ServerEvent, serde_json::Error> {
    serde_json::from_str::<ServerFrame>(text).map(ServerEvent::from)
}
