// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::messaging::models::RemoteMessage;
use crate::domain::shared::models::{ConversationId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: UserId,
    pub name: String,
}

/// One entry of the conversation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    pub name: String,
    pub participants: Vec<Participant>,
    pub is_group: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
    pub unread_count: u32,
    pub is_online: bool,
    /// Whether the conversation contains at least one real message. Freshly
    /// created empty conversations sort after everything that does,
    /// regardless of recency.
    pub has_messages: bool,
}

impl Conversation {
    /// Ordering of the conversation list: conversations with real messages
    /// first, most recent activity next.
    pub fn list_order(&self, other: &Conversation) -> Ordering {
        (other.has_messages, other.last_activity).cmp(&(self.has_messages, self.last_activity))
    }

    /// The other side of a direct conversation.
    pub fn counterpart(&self, me: &UserId) -> Option<&Participant> {
        if self.is_group {
            return None;
        }
        self.participants.iter().find(|p| &p.id != me)
    }
}

/// A conversation as the backend's summary endpoint delivers it. The summary
/// is not guaranteed to carry the latest message, which is why `last_message`
/// and `messages` are both optional and resolved through a cascade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: ConversationId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub last_message: Option<RemoteMessage>,
    #[serde(default)]
    pub messages: Option<Vec<RemoteMessage>>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_online: bool,
}

impl ConversationSummary {
    /// The display name: the summary's own name, or the counterpart of a
    /// direct conversation.
    pub fn display_name(&self, me: &UserId) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.participants
            .iter()
            .find(|p| &p.id != me)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| self.id.to_string())
    }
}
