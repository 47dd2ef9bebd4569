// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use url::Url;

pub use crate::domain::{
    account::models::{Session, UserProfile},
    account::services::{AuthError, Registration},
    connection::models::{ConnectionError, ConnectionStatus},
    messaging::models::{
        Conversation, Message, MessageId, MessageKind, MessageServerId, MessageStatus,
        Participant, Sender,
    },
    notifications::models::{
        Notification, NotificationCategory, NotificationId, NotificationSender, RelatedData,
        ResponseStatus,
    },
    shared::models::{ConnectionState, ConversationId, UserId},
};
