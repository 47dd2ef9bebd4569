// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::domain::shared::models::UserId;

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NotificationId {
    fn from(value: String) -> Self {
        NotificationId(value)
    }
}

impl From<&str> for NotificationId {
    fn from(value: &str) -> Self {
        NotificationId(value.to_string())
    }
}

impl Debug for NotificationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "NotificationId({})", self.0)
    }
}

impl Display for NotificationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationCategory {
    CollaborationRequest,
    CollaborationAccepted,
    CollaborationRejected,
    Follow,
    ProjectInvitation,
    Other,
}

/// The user's locally-applied answer to a collaboration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSender {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status: Option<ResponseStatus>,
}

/// A notification as kept in the local list. Created server-side, never
/// deleted locally; only `is_read` and `related.response_status` are mutated
/// on this end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub category: NotificationCategory,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<NotificationSender>,
    #[serde(default)]
    pub related: RelatedData,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_payload(payload: NotificationPayload, received_at: DateTime<Utc>) -> Self {
        let category = classify(&payload);
        Notification {
            id: payload.id,
            category,
            message: payload.message,
            sender: payload.sender,
            related: RelatedData {
                project_title: payload.project_title,
                requester_name: payload.requester_name,
                response_status: payload.response_status,
            },
            is_read: payload.is_read,
            created_at: payload.created_at.unwrap_or(received_at),
        }
    }
}

/// A notification as the backend delivers it, via REST or push. Upstream
/// event producers are inconsistent about setting `type`, hence the loose
/// shape and the classifier chain below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub id: NotificationId,
    #[serde(default, rename = "type")]
    pub tag: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sender: Option<NotificationSender>,
    #[serde(default)]
    pub project_title: Option<String>,
    #[serde(default)]
    pub requester_name: Option<String>,
    #[serde(default)]
    pub response_status: Option<ResponseStatus>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

type Classifier = fn(&NotificationPayload) -> Option<NotificationCategory>;

/// Evaluated in order, first hit wins. The precedence (explicit tag, then
/// message keywords, then the shape of the related data) is part of the
/// contract and must not be reordered.
const CLASSIFIERS: &[Classifier] = &[by_explicit_tag, by_message_keyword, by_related_fields];

pub fn classify(payload: &NotificationPayload) -> NotificationCategory {
    CLASSIFIERS
        .iter()
        .find_map(|classifier| classifier(payload))
        .unwrap_or(NotificationCategory::Other)
}

fn by_explicit_tag(payload: &NotificationPayload) -> Option<NotificationCategory> {
    match payload.tag.as_deref()? {
        "collaboration_request" => Some(NotificationCategory::CollaborationRequest),
        "collaboration_accepted" => Some(NotificationCategory::CollaborationAccepted),
        "collaboration_rejected" => Some(NotificationCategory::CollaborationRejected),
        "follow" => Some(NotificationCategory::Follow),
        "project_invitation" => Some(NotificationCategory::ProjectInvitation),
        _ => None,
    }
}

fn by_message_keyword(payload: &NotificationPayload) -> Option<NotificationCategory> {
    let message = payload.message.to_lowercase();

    if message.contains("wants to collaborate") {
        return Some(NotificationCategory::CollaborationRequest);
    }
    if message.contains("accepted your collaboration") {
        return Some(NotificationCategory::CollaborationAccepted);
    }
    if message.contains("collaboration") && (message.contains("rejected") || message.contains("declined"))
    {
        return Some(NotificationCategory::CollaborationRejected);
    }
    if message.contains("started following you") {
        return Some(NotificationCategory::Follow);
    }
    if message.contains("invited you") {
        return Some(NotificationCategory::ProjectInvitation);
    }
    None
}

fn by_related_fields(payload: &NotificationPayload) -> Option<NotificationCategory> {
    match payload.response_status {
        Some(ResponseStatus::Accepted) => return Some(NotificationCategory::CollaborationAccepted),
        Some(ResponseStatus::Rejected) => return Some(NotificationCategory::CollaborationRejected),
        None => (),
    }
    if payload.requester_name.is_some() {
        return Some(NotificationCategory::CollaborationRequest);
    }
    if payload.project_title.is_some() {
        return Some(NotificationCategory::ProjectInvitation);
    }
    None
}
