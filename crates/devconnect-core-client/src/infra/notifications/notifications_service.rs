// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::notifications::models::{NotificationId, NotificationPayload};
use crate::domain::notifications::services::{NotificationsPage, NotificationsService};
use crate::infra::rest::RestApi;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotificationsPagePayload {
    #[serde(default)]
    notifications: Vec<NotificationPayload>,
    #[serde(default)]
    unread_count: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnreadCountPayload {
    #[serde(default)]
    unread_count: u32,
}

#[async_trait]
impl NotificationsService for RestApi {
    async fn load_notifications(&self, page: u32, limit: u32) -> Result<NotificationsPage> {
        let mut url = self.endpoint(&["notifications"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        let payload = self.get_json::<NotificationsPagePayload>(url).await?;
        Ok(NotificationsPage {
            notifications: payload.notifications,
            unread_count: payload.unread_count,
        })
    }

    async fn load_unread_count(&self) -> Result<u32> {
        let payload = self
            .get_json::<UnreadCountPayload>(self.endpoint(&["notifications", "unread-count"]))
            .await?;
        Ok(payload.unread_count)
    }

    async fn mark_notification_read(&self, id: &NotificationId) -> Result<()> {
        self.post(self.endpoint(&["notifications", id.as_str(), "read"]))
            .await
    }
}
