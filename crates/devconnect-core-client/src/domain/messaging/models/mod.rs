// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use conversation::{Conversation, ConversationSummary, Participant};
pub use message::{Message, MessageKind, MessageStatus, RemoteMessage, Sender};
pub use message_id::{MessageId, MessageServerId};
pub use reconciliation::{find_ack_target, MessageAck};
pub use typing::TypingState;

mod conversation;
mod message;
mod message_id;
mod reconciliation;
mod typing;
