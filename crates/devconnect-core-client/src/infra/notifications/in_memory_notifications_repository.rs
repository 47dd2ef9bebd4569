// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::notifications::models::{
    Notification, NotificationCategory, NotificationId, ResponseStatus,
};
use crate::domain::notifications::repos::NotificationsRepository;
use crate::domain::shared::models::UserId;

#[derive(Default)]
struct State {
    notifications: Vec<Notification>,
    unread_count: u32,
}

/// Notifications are not mirrored to storage, the list is cheap to refetch
/// and the unread counter is re-polled anyway.
#[derive(Default)]
pub struct InMemoryNotificationsRepository {
    state: Mutex<State>,
}

#[async_trait]
impl NotificationsRepository for InMemoryNotificationsRepository {
    async fn replace_all(&self, notifications: Vec<Notification>, unread_count: u32) {
        let mut state = self.state.lock();
        state.notifications = notifications;
        state.unread_count = unread_count;
    }

    async fn get_all(&self) -> Vec<Notification> {
        self.state.lock().notifications.clone()
    }

    async fn unread_count(&self) -> u32 {
        self.state.lock().unread_count
    }

    async fn set_unread_count(&self, unread_count: u32) {
        self.state.lock().unread_count = unread_count;
    }

    async fn prepend(&self, notification: Notification) {
        let mut state = self.state.lock();
        if !notification.is_read {
            state.unread_count += 1;
        }
        state.notifications.insert(0, notification);
    }

    async fn mark_read(&self, id: &NotificationId) -> bool {
        let mut state = self.state.lock();
        let Some(notification) = state
            .notifications
            .iter_mut()
            .find(|n| &n.id == id && !n.is_read)
        else {
            return false;
        };
        notification.is_read = true;
        state.unread_count = state.unread_count.saturating_sub(1);
        true
    }

    async fn apply_response(&self, id: &NotificationId, status: ResponseStatus) -> bool {
        let mut state = self.state.lock();
        let Some(notification) = state.notifications.iter_mut().find(|n| &n.id == id) else {
            return false;
        };
        notification.related.response_status = Some(status);
        true
    }

    async fn remove_follow_notifications_from(&self, sender: &UserId) -> usize {
        let mut state = self.state.lock();
        let before = state.notifications.len();
        state.notifications.retain(|notification| {
            !(notification.category == NotificationCategory::Follow
                && notification
                    .sender
                    .as_ref()
                    .map(|s| &s.id == sender)
                    .unwrap_or(false))
        });
        before - state.notifications.len()
    }
}
