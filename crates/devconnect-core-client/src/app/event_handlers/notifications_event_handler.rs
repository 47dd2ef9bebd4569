// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::app::deps::{
    AppDependencies, DynClientEventDispatcher, DynNotificationsRepository, DynTimeProvider,
};
use crate::app::event_handlers::{
    NotificationEvent, ServerEvent, ServerEventHandler, UnfollowPayload, UnreadCountPayload,
};
use crate::domain::notifications::models::Notification;
use crate::ClientEvent;

pub struct NotificationsEventHandler {
    notifications_repo: DynNotificationsRepository,
    time_provider: DynTimeProvider,
    client_event_dispatcher: DynClientEventDispatcher,
}

impl From<&AppDependencies> for NotificationsEventHandler {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            notifications_repo: deps.notifications_repo.clone(),
            time_provider: deps.time_provider.clone(),
            client_event_dispatcher: deps.client_event_dispatcher.clone(),
        }
    }
}

#[async_trait]
impl ServerEventHandler for NotificationsEventHandler {
    fn name(&self) -> &'static str {
        "notifications"
    }

    async fn handle_event(&self, event: ServerEvent) -> Result<Option<ServerEvent>> {
        match event {
            ServerEvent::Notification(event) => {
                self.handle_notification_event(event).await?;
            }
            _ => return Ok(Some(event)),
        }
        Ok(None)
    }
}

impl NotificationsEventHandler {
    async fn handle_notification_event(&self, event: NotificationEvent) -> Result<()> {
        match event {
            NotificationEvent::Added(payload) => {
                let notification =
                    Notification::from_payload(payload, self.time_provider.now());
                self.notifications_repo.prepend(notification).await;
            }
            NotificationEvent::UnreadCountChanged(UnreadCountPayload { unread_count }) => {
                // The server's count is authoritative and overwrites whatever
                // we derived locally.
                self.notifications_repo.set_unread_count(unread_count).await;
            }
            NotificationEvent::SenderUnfollowed(UnfollowPayload {
                user_id,
                unread_count,
            }) => {
                let removed = self
                    .notifications_repo
                    .remove_follow_notifications_from(&user_id)
                    .await;
                info!("Removed {removed} follow notification(s) from {user_id}.");

                if let Some(unread_count) = unread_count {
                    self.notifications_repo.set_unread_count(unread_count).await;
                }
            }
        }

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::NotificationsChanged);
        Ok(())
    }
}
