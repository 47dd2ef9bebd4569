// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use tracing::warn;

use crate::app::deps::{
    AppDependencies, DynAppContext, DynClientEventDispatcher, DynNotificationsRepository,
    DynNotificationsService, DynTimeProvider,
};
use crate::domain::notifications::models::{Notification, NotificationId, ResponseStatus};
use crate::ClientEvent;

pub struct NotificationsService {
    ctx: DynAppContext,
    notifications_service: DynNotificationsService,
    notifications_repo: DynNotificationsRepository,
    time_provider: DynTimeProvider,
    client_event_dispatcher: DynClientEventDispatcher,
}

impl From<&AppDependencies> for NotificationsService {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            ctx: deps.ctx.clone(),
            notifications_service: deps.notifications_service.clone(),
            notifications_repo: deps.notifications_repo.clone(),
            time_provider: deps.time_provider.clone(),
            client_event_dispatcher: deps.client_event_dispatcher.clone(),
        }
    }
}

impl NotificationsService {
    /// Fetches one page and replaces the local list with it. Pagination is
    /// page-replace, not merge.
    pub async fn fetch_notifications(
        &self,
        page: u32,
        limit: Option<u32>,
    ) -> Result<Vec<Notification>> {
        let limit = limit.unwrap_or(self.ctx.config.notifications_page_size);
        let result = self
            .notifications_service
            .load_notifications(page, limit)
            .await?;

        let now = self.time_provider.now();
        let notifications = result
            .notifications
            .into_iter()
            .map(|payload| Notification::from_payload(payload, now))
            .collect::<Vec<_>>();

        self.notifications_repo
            .replace_all(notifications.clone(), result.unread_count)
            .await;
        self.client_event_dispatcher
            .dispatch_event(ClientEvent::NotificationsChanged);

        Ok(notifications)
    }

    /// Refreshes only the unread counter. Runs on a fixed interval as the
    /// correctness backstop for missed push events.
    pub async fn fetch_unread_count(&self) -> Result<u32> {
        let unread_count = self.notifications_service.load_unread_count().await?;

        if unread_count != self.notifications_repo.unread_count().await {
            self.notifications_repo.set_unread_count(unread_count).await;
            self.client_event_dispatcher
                .dispatch_event(ClientEvent::NotificationsChanged);
        }
        Ok(unread_count)
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications_repo.get_all().await
    }

    pub async fn unread_count(&self) -> u32 {
        self.notifications_repo.unread_count().await
    }

    /// Optimistically flips the notification to read and decrements the
    /// counter, then persists write-behind. A failing REST call is logged
    /// and not rolled back, the periodic poll reconciles eventually.
    pub async fn mark_as_read(&self, id: &NotificationId) {
        if self.notifications_repo.mark_read(id).await {
            self.client_event_dispatcher
                .dispatch_event(ClientEvent::NotificationsChanged);
        }

        if let Err(err) = self.notifications_service.mark_notification_read(id).await {
            warn!("Failed to mark notification '{id}' as read: {err}");
        }
    }

    /// Overlays the user's answer to a collaboration request so the panel
    /// reflects it without a refetch.
    pub async fn record_response(&self, id: &NotificationId, status: ResponseStatus) {
        if self.notifications_repo.apply_response(id, status).await {
            self.client_event_dispatcher
                .dispatch_event(ClientEvent::NotificationsChanged);
        }
    }
}
