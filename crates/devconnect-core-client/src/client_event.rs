// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::connection::models::ConnectionError;
use crate::domain::messaging::models::MessageId;
use crate::domain::shared::models::ConversationId;

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// The status of the connection has changed.
    ConnectionStatusChanged { event: ConnectionEvent },

    /// The conversation list has changed: entries, ordering, previews,
    /// unread counts or online states.
    ConversationsChanged,

    /// Something happened within one conversation.
    ConversationChanged {
        id: ConversationId,
        r#type: ClientConversationEventType,
    },

    /// The notification list or the unread counter has changed.
    NotificationsChanged,

    /// Infos related to the logged-in user have changed.
    AccountInfoChanged,

    /// A message arrived while its conversation is not in view (or the
    /// window lacks focus). The shell should raise a desktop notification.
    AttentionRequested {
        conversation_id: ConversationId,
        title: String,
        body: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientConversationEventType {
    /// One or many messages were either received or sent.
    MessagesAppended { message_ids: Vec<MessageId> },

    /// Attributes of earlier messages changed, e.g. a status moved forward
    /// or a server id was assigned.
    MessagesUpdated { message_ids: Vec<MessageId> },

    /// A user started or stopped typing.
    ComposingUsersChanged,

    /// Attributes changed like the name or the participant list.
    AttributesChanged,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    Connect,
    Disconnect { error: Option<ConnectionError> },
}
