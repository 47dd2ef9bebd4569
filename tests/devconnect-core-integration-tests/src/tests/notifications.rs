// devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use pretty_assertions::assert_eq;

use devconnect_core_client::app::event_handlers::{
    NotificationEvent, NotificationsEventHandler, ServerEvent, ServerEventHandler,
    UnfollowPayload, UnreadCountPayload,
};
use devconnect_core_client::domain::notifications::models::NotificationPayload;
use devconnect_core_client::domain::notifications::services::NotificationsPage;
use devconnect_core_client::dtos::NotificationCategory;
use devconnect_core_client::services::NotificationsService;

use super::async_test;
use super::helpers::TestDepsBuilder;

fn payload(id: &str, message: &str) -> NotificationPayload {
    NotificationPayload {
        id: id.into(),
        tag: None,
        message: message.to_string(),
        sender: Some(
            serde_json::from_value(serde_json::json!({"id": "u2", "name": "Alice"})).unwrap(),
        ),
        project_title: None,
        requester_name: None,
        response_status: None,
        is_read: false,
        created_at: None,
    }
}

#[async_test(start_paused = true)]
async fn test_fetch_replaces_list_and_classifies() {
    let mut builder = TestDepsBuilder::default();
    builder
        .notifications_service
        .expect_load_notifications()
        .returning(|_, _| {
            Ok(NotificationsPage {
                notifications: vec![
                    payload("n1", "Alice wants to collaborate on Rustboard"),
                    payload("n2", "Alice started following you"),
                ],
                unread_count: 2,
            })
        });
    let td = builder.build();
    let service = NotificationsService::from(&td.deps);

    let notifications = service.fetch_notifications(1, None).await.unwrap();
    assert_eq!(notifications.len(), 2);
    assert_eq!(
        notifications[0].category,
        NotificationCategory::CollaborationRequest
    );
    assert_eq!(notifications[1].category, NotificationCategory::Follow);
    assert_eq!(td.deps.notifications_repo.unread_count().await, 2);

    // A later page replaces, it does not merge.
    let notifications = service.fetch_notifications(2, None).await.unwrap();
    assert_eq!(td.deps.notifications_repo.get_all().await.len(), notifications.len());
}

#[async_test(start_paused = true)]
async fn test_mark_as_read_is_optimistic_and_floors_at_zero() {
    let mut builder = TestDepsBuilder::default();
    builder
        .notifications_service
        .expect_mark_notification_read()
        .times(2)
        .returning(|_| Err(anyhow::anyhow!("the network is gone")));
    let td = builder.build();

    let handler = NotificationsEventHandler::from(&td.deps);
    let service = NotificationsService::from(&td.deps);

    handler
        .handle_event(ServerEvent::Notification(NotificationEvent::Added(payload(
            "n1",
            "Alice started following you",
        ))))
        .await
        .unwrap();
    assert_eq!(service.unread_count().await, 1);

    // The local flip survives the failing REST call, no rollback.
    service.mark_as_read(&"n1".into()).await;
    assert_eq!(service.unread_count().await, 0);
    assert!(service.notifications().await[0].is_read);

    // Marking again must not wrap the counter.
    service.mark_as_read(&"n1".into()).await;
    assert_eq!(service.unread_count().await, 0);
}

#[async_test(start_paused = true)]
async fn test_push_count_is_authoritative() {
    let td = TestDepsBuilder::default().build();
    let handler = NotificationsEventHandler::from(&td.deps);

    handler
        .handle_event(ServerEvent::Notification(
            NotificationEvent::UnreadCountChanged(UnreadCountPayload { unread_count: 7 }),
        ))
        .await
        .unwrap();

    assert_eq!(td.deps.notifications_repo.unread_count().await, 7);
}

#[async_test(start_paused = true)]
async fn test_unfollow_removes_follow_notifications_of_sender() {
    let td = TestDepsBuilder::default().build();
    let handler = NotificationsEventHandler::from(&td.deps);

    handler
        .handle_event(ServerEvent::Notification(NotificationEvent::Added(payload(
            "n1",
            "Alice started following you",
        ))))
        .await
        .unwrap();
    handler
        .handle_event(ServerEvent::Notification(NotificationEvent::Added(payload(
            "n2",
            "Alice wants to collaborate on Rustboard",
        ))))
        .await
        .unwrap();

    handler
        .handle_event(ServerEvent::Notification(
            NotificationEvent::SenderUnfollowed(UnfollowPayload {
                user_id: "u2".into(),
                unread_count: Some(1),
            }),
        ))
        .await
        .unwrap();

    let remaining = td.deps.notifications_repo.get_all().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(
        remaining[0].category,
        NotificationCategory::CollaborationRequest
    );
    assert_eq!(td.deps.notifications_repo.unread_count().await, 1);
}
