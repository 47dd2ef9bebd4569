// devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;

use devconnect_core_client::app::event_handlers::{
    MessageAckPayload, MessageEvent, MessagesEventHandler, ReceiptPayload, ServerEvent,
    ServerEventHandler,
};
use devconnect_core_client::domain::messaging::models::{
    Conversation, Participant, RemoteMessage,
};
use devconnect_core_client::dtos::{MessageStatus, Sender};
use devconnect_core_client::services::ConversationsService;
use devconnect_core_client::ClientEvent;

use super::async_test;
use super::helpers::{test_deps, TestDeps};

fn conversation(id: &str) -> Conversation {
    Conversation {
        id: id.into(),
        name: "Alice".to_string(),
        participants: vec![
            Participant {
                id: "jane.doe".into(),
                name: "Jane Doe".to_string(),
            },
            Participant {
                id: "u2".into(),
                name: "Alice".to_string(),
            },
        ],
        is_group: false,
        last_message: None,
        last_activity: None,
        unread_count: 0,
        is_online: false,
        has_messages: false,
    }
}

fn incoming(conversation: &str, content: &str, timestamp: DateTime<Utc>) -> ServerEvent {
    ServerEvent::Message(MessageEvent::Received(RemoteMessage {
        id: Some(format!("srv-{content}").into()),
        conversation_id: Some(conversation.into()),
        sender_id: Some("u2".into()),
        sender_name: Some("Alice".to_string()),
        content: Some(content.to_string()),
        timestamp: Some(timestamp),
        kind: Default::default(),
    }))
}

async fn seeded_deps() -> TestDeps {
    let td = test_deps();
    td.deps.conversations_repo.upsert(conversation("c1")).await;
    td
}

#[async_test(start_paused = true)]
async fn test_ack_within_window_reconciles_to_exactly_one_message() {
    let td = seeded_deps().await;
    let service = ConversationsService::from(&td.deps);
    let handler = MessagesEventHandler::from(&td.deps);

    assert!(service.send_message(&"c1".into(), "hello").await);
    let sent_at = td.time_provider.now();

    handler
        .handle_event(ServerEvent::Message(MessageEvent::Acknowledged(
            MessageAckPayload {
                conversation_id: Some("c1".into()),
                server_id: Some("srv-1".into()),
                content: Some("hello".to_string()),
                timestamp: Some(sent_at + chrono::Duration::seconds(2)),
            },
        )))
        .await
        .unwrap();

    let messages = td.deps.messages_repo.get_all(&"c1".into()).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].server_id, Some("srv-1".into()));
    assert_eq!(messages[0].status, MessageStatus::Sent);
}

#[async_test(start_paused = true)]
async fn test_ack_outside_window_is_ignored() {
    let td = seeded_deps().await;
    let service = ConversationsService::from(&td.deps);
    let handler = MessagesEventHandler::from(&td.deps);

    assert!(service.send_message(&"c1".into(), "hello").await);
    let sent_at = td.time_provider.now();

    handler
        .handle_event(ServerEvent::Message(MessageEvent::Acknowledged(
            MessageAckPayload {
                conversation_id: Some("c1".into()),
                server_id: Some("srv-1".into()),
                content: Some("hello".to_string()),
                timestamp: Some(sent_at + chrono::Duration::seconds(6)),
            },
        )))
        .await
        .unwrap();

    let messages = td.deps.messages_repo.get_all(&"c1".into()).await;
    assert_eq!(messages[0].server_id, None);
    assert_eq!(messages[0].status, MessageStatus::Sending);
}

#[async_test(start_paused = true)]
async fn test_stale_push_is_discarded() {
    let td = seeded_deps().await;
    let handler = MessagesEventHandler::from(&td.deps);

    let t1 = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 5).unwrap();

    // Delivered out of order: the newer message first.
    handler.handle_event(incoming("c1", "newer", t2)).await.unwrap();
    handler.handle_event(incoming("c1", "older", t1)).await.unwrap();

    let contents = td
        .deps
        .messages_repo
        .get_all(&"c1".into())
        .await
        .into_iter()
        .map(|m| m.content)
        .collect::<Vec<_>>();
    assert_eq!(contents, vec!["newer"]);

    // The conversation still shows the surviving message.
    let conversation = td.deps.conversations_repo.get(&"c1".into()).await.unwrap();
    assert_eq!(conversation.last_message.as_deref(), Some("newer"));
}

#[async_test(start_paused = true)]
async fn test_known_server_id_is_not_duplicated() {
    let td = seeded_deps().await;
    let handler = MessagesEventHandler::from(&td.deps);

    let t1 = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let event = incoming("c1", "hello", t1);

    handler.handle_event(event.clone()).await.unwrap();
    handler.handle_event(event).await.unwrap();

    assert_eq!(td.deps.messages_repo.get_all(&"c1".into()).await.len(), 1);
}

#[async_test(start_paused = true)]
async fn test_unread_count_and_attention_for_background_conversation() {
    let td = seeded_deps().await;
    let handler = MessagesEventHandler::from(&td.deps);

    let t1 = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    handler.handle_event(incoming("c1", "hello", t1)).await.unwrap();

    let conversation = td.deps.conversations_repo.get(&"c1".into()).await.unwrap();
    assert_eq!(conversation.unread_count, 1);

    let attention = td
        .dispatcher
        .events()
        .into_iter()
        .find_map(|event| match event {
            ClientEvent::AttentionRequested { title, body, .. } => Some((title, body)),
            _ => None,
        });
    assert_eq!(
        attention,
        Some(("Alice".to_string(), "hello".to_string()))
    );
}

#[async_test(start_paused = true)]
async fn test_open_conversation_does_not_count_unread() {
    let td = seeded_deps().await;
    td.deps.ctx.set_open_conversation(Some("c1".into()));
    let handler = MessagesEventHandler::from(&td.deps);

    let t1 = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    handler.handle_event(incoming("c1", "hello", t1)).await.unwrap();

    let conversation = td.deps.conversations_repo.get(&"c1".into()).await.unwrap();
    assert_eq!(conversation.unread_count, 0);

    // The window has focus and the conversation is in view, no attention.
    assert!(!td
        .dispatcher
        .events()
        .iter()
        .any(|event| matches!(event, ClientEvent::AttentionRequested { .. })));
}

#[async_test(start_paused = true)]
async fn test_malformed_push_payload_is_dropped() {
    let td = seeded_deps().await;
    let handler = MessagesEventHandler::from(&td.deps);

    handler
        .handle_event(ServerEvent::Message(MessageEvent::Received(RemoteMessage {
            conversation_id: Some("c1".into()),
            // No content.
            sender_id: Some("u2".into()),
            ..Default::default()
        })))
        .await
        .unwrap();
    handler
        .handle_event(ServerEvent::Message(MessageEvent::Received(RemoteMessage {
            // No conversation id.
            content: Some("hello".to_string()),
            sender_id: Some("u2".into()),
            ..Default::default()
        })))
        .await
        .unwrap();

    assert!(td.deps.messages_repo.get_all(&"c1".into()).await.is_empty());
    assert!(td.dispatcher.events().is_empty());
}

#[async_test(start_paused = true)]
async fn test_read_receipt_moves_own_messages_forward_only() {
    let td = seeded_deps().await;
    let service = ConversationsService::from(&td.deps);
    let handler = MessagesEventHandler::from(&td.deps);

    assert!(service.send_message(&"c1".into(), "hello").await);

    // A conversation-wide read receipt targets our own messages.
    handler
        .handle_event(ServerEvent::Message(MessageEvent::Read(ReceiptPayload {
            conversation_id: Some("c1".into()),
            message_ids: vec![],
        })))
        .await
        .unwrap();

    let messages = td.deps.messages_repo.get_all(&"c1".into()).await;
    assert_eq!(messages[0].sender, Sender::Me);
    assert_eq!(messages[0].status, MessageStatus::Read);

    // A later delivery receipt must not move the status backwards.
    handler
        .handle_event(ServerEvent::Message(MessageEvent::Delivered(
            ReceiptPayload {
                conversation_id: Some("c1".into()),
                message_ids: vec![],
            },
        )))
        .await
        .unwrap();

    let messages = td.deps.messages_repo.get_all(&"c1".into()).await;
    assert_eq!(messages[0].status, MessageStatus::Read);
}
