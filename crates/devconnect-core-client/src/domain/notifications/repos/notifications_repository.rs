// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;

use crate::domain::notifications::models::{Notification, NotificationId, ResponseStatus};
use crate::domain::shared::models::UserId;

/// The local notification list plus the unread counter. Both live under one
/// lock so that push deltas and REST snapshots cannot interleave halfway.
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait NotificationsRepository: Send + Sync {
    /// Replaces the whole list and the unread counter with a REST snapshot.
    async fn replace_all(&self, notifications: Vec<Notification>, unread_count: u32);

    async fn get_all(&self) -> Vec<Notification>;

    async fn unread_count(&self) -> u32;

    async fn set_unread_count(&self, unread_count: u32);

    /// Prepends a push-delivered notification and increments the unread
    /// counter, unless the notification arrived read already.
    async fn prepend(&self, notification: Notification);

    /// Flips `is_read` and decrements the unread counter, floored at zero.
    /// Returns false if the notification is unknown or was read already.
    async fn mark_read(&self, id: &NotificationId) -> bool;

    /// Overlays the user's answer to a collaboration request.
    async fn apply_response(&self, id: &NotificationId, status: ResponseStatus) -> bool;

    /// Drops all follow notifications sent by `sender`. Returns the number
    /// of removed entries.
    async fn remove_follow_notifications_from(&self, sender: &UserId) -> usize;
}
