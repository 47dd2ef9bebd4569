// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::notifications::models::{NotificationId, NotificationPayload};

pub struct NotificationsPage {
    pub notifications: Vec<NotificationPayload>,
    pub unread_count: u32,
}

/// The notification endpoints of the DevConnect REST API.
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait NotificationsService: Send + Sync {
    async fn load_notifications(&self, page: u32, limit: u32) -> Result<NotificationsPage>;

    async fn load_unread_count(&self) -> Result<u32>;

    async fn mark_notification_read(&self, id: &NotificationId) -> Result<()>;
}
