// devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use chrono::TimeZone;
use chrono::Utc;
use pretty_assertions::assert_eq;

use devconnect_core_client::domain::connection::models::ClientSocketEvent;
use devconnect_core_client::domain::messaging::models::{
    Conversation, ConversationSummary, Participant, RemoteMessage,
};
use devconnect_core_client::dtos::{MessageStatus, Sender};
use devconnect_core_client::services::ConversationsService;
use devconnect_core_client::{ClientConversationEventType, ClientEvent};

use super::async_test;
use super::helpers::{test_deps, FakeConnection, TestDepsBuilder};

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

#[async_test(start_paused = true)]
async fn test_send_message_fails_fast_while_disconnected() {
    let mut builder = TestDepsBuilder::default();
    builder.connection = std::sync::Arc::new(FakeConnection::disconnected());
    let td = builder.build();

    td.deps.conversations_repo.upsert(conversation("c1")).await;
    let service = ConversationsService::from(&td.deps);

    assert!(!service.send_message(&"c1".into(), "hello").await);

    // No message, no emission, no event.
    assert!(td.deps.messages_repo.get_all(&"c1".into()).await.is_empty());
    assert!(td.connection.emitted_events().is_empty());
    assert!(td.dispatcher.events().is_empty());
}

#[async_test(start_paused = true)]
async fn test_send_message_is_visible_before_any_network_round_trip() {
    let td = test_deps();
    td.deps.conversations_repo.upsert(conversation("c1")).await;
    let service = ConversationsService::from(&td.deps);

    let now = td.time_provider.now();
    assert!(service.send_message(&"c1".into(), "hello").await);

    // Local state reflects the send immediately…
    let messages = td.deps.messages_repo.get_all(&"c1".into()).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender, Sender::Me);
    assert_eq!(messages[0].content, "hello");
    assert_eq!(messages[0].status, MessageStatus::Sending);
    assert_eq!(messages[0].server_id, None);

    let conversation = td.deps.conversations_repo.get(&"c1".into()).await.unwrap();
    assert_eq!(conversation.last_message.as_deref(), Some("hello"));
    assert_eq!(conversation.last_activity, Some(now));
    assert!(conversation.has_messages);

    // …and the send went out over the channel.
    assert_eq!(
        td.connection.emitted_events(),
        vec![ClientSocketEvent::SendMessage {
            conversation_id: "c1".into(),
            content: "hello".to_string(),
        }]
    );

    // After the fixed delay the placeholder moves to Sent.
    tokio::time::sleep(Duration::from_secs(1)).await;
    let messages = td.deps.messages_repo.get_all(&"c1".into()).await;
    assert_eq!(messages[0].status, MessageStatus::Sent);
}

#[async_test(start_paused = true)]
async fn test_open_conversation_joins_room_and_marks_read() {
    let mut builder = TestDepsBuilder::default();
    builder
        .messaging_service
        .expect_load_messages()
        .returning(|_| {
            Ok(vec![RemoteMessage {
                id: Some("srv-1".into()),
                conversation_id: Some("c1".into()),
                sender_id: Some("u2".into()),
                sender_name: Some("Alice".to_string()),
                content: Some("hi".to_string()),
                timestamp: Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()),
                kind: Default::default(),
            }])
        });
    builder
        .messaging_service
        .expect_mark_messages_read()
        .returning(|_| Ok(()));
    let td = builder.build();

    let mut unread = conversation("c1");
    unread.unread_count = 3;
    td.deps.conversations_repo.upsert(unread).await;

    let service = ConversationsService::from(&td.deps);
    let messages = service.open_conversation(&"c1".into()).await.unwrap();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "hi");

    let conversation = td.deps.conversations_repo.get(&"c1".into()).await.unwrap();
    assert_eq!(conversation.unread_count, 0);

    assert_eq!(
        td.connection.emitted_events(),
        vec![
            ClientSocketEvent::JoinConversation {
                conversation_id: "c1".into()
            },
            ClientSocketEvent::MarkMessagesAsRead {
                conversation_id: "c1".into()
            },
        ]
    );

    // Opening another conversation leaves the previous room.
    let td_events_before = td.connection.emitted_events().len();
    td.deps.conversations_repo.upsert(conversation_with_id("c2")).await;
    let _ = service.open_conversation(&"c2".into()).await.unwrap();
    let emitted = td.connection.emitted_events();
    assert_eq!(
        emitted[td_events_before],
        ClientSocketEvent::LeaveConversation {
            conversation_id: "c1".into()
        }
    );
}

fn conversation_with_id(id: &str) -> Conversation {
    conversation(id)
}

#[async_test(start_paused = true)]
async fn test_typing_is_emitted_once_per_burst() {
    let td = test_deps();
    td.deps.conversations_repo.upsert(conversation("c1")).await;
    let service = ConversationsService::from(&td.deps);

    service.notify_composing(&"c1".into());
    service.notify_composing(&"c1".into());
    service.notify_composing(&"c1".into());

    assert_eq!(
        td.connection.emitted_events(),
        vec![ClientSocketEvent::Typing {
            conversation_id: "c1".into()
        }]
    );

    // After a second of silence the stop event goes out, exactly once.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(
        td.connection.emitted_events(),
        vec![
            ClientSocketEvent::Typing {
                conversation_id: "c1".into()
            },
            ClientSocketEvent::StopTyping {
                conversation_id: "c1".into()
            },
        ]
    );

    // The next keystroke starts a fresh burst.
    service.notify_composing(&"c1".into());
    assert_eq!(td.connection.emitted_events().len(), 3);
}

#[async_test(start_paused = true)]
async fn test_load_conversations_resolves_previews_through_cascade() {
    let mut builder = TestDepsBuilder::default();

    builder
        .messaging_service
        .expect_load_conversations()
        .returning(|| {
            Ok(vec![
                // Carries its own preview.
                ConversationSummary {
                    id: "c1".into(),
                    name: Some("Alice".to_string()),
                    last_message: Some(RemoteMessage {
                        content: Some("from summary".to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                // Preview only in the embedded messages.
                ConversationSummary {
                    id: "c2".into(),
                    name: Some("Bob".to_string()),
                    messages: Some(vec![
                        RemoteMessage {
                            content: Some("older".to_string()),
                            ..Default::default()
                        },
                        RemoteMessage {
                            content: Some("from embedded".to_string()),
                            ..Default::default()
                        },
                    ]),
                    ..Default::default()
                },
                // Requires the dedicated one-message fetch.
                ConversationSummary {
                    id: "c3".into(),
                    name: Some("Carol".to_string()),
                    ..Default::default()
                },
            ])
        });
    builder
        .messaging_service
        .expect_load_latest_message()
        .times(1)
        .returning(|_| {
            Ok(Some(RemoteMessage {
                content: Some("from fetch".to_string()),
                ..Default::default()
            }))
        });

    let td = builder.build();
    let service = ConversationsService::from(&td.deps);

    let conversations = service.load_conversations().await.unwrap();
    let previews = conversations
        .iter()
        .map(|c| (c.id.to_string(), c.last_message.clone()))
        .collect::<std::collections::HashMap<_, _>>();

    assert_eq!(previews["c1"].as_deref(), Some("from summary"));
    assert_eq!(previews["c2"].as_deref(), Some("from embedded"));
    assert_eq!(previews["c3"].as_deref(), Some("from fetch"));
}

#[async_test(start_paused = true)]
async fn test_load_conversations_serves_cache_when_rest_fails() {
    let mut builder = TestDepsBuilder::default();
    builder
        .messaging_service
        .expect_load_conversations()
        .returning(|| Err(anyhow::anyhow!("the network is gone")));
    let td = builder.build();

    let mut cached = conversation("c1");
    cached.last_message = Some("cached".to_string());
    cached.has_messages = true;
    td.deps.conversations_repo.upsert(cached).await;

    let service = ConversationsService::from(&td.deps);
    let conversations = service.load_conversations().await.unwrap();

    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0].last_message.as_deref(), Some("cached"));
}

#[async_test(start_paused = true)]
async fn test_conversations_with_messages_precede_fresh_ones() {
    let td = test_deps();

    let mut fresh = conversation("fresh");
    fresh.last_activity = Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
    let mut active = conversation("active");
    active.has_messages = true;
    active.last_activity = Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap());

    td.deps.conversations_repo.upsert(fresh).await;
    td.deps.conversations_repo.upsert(active).await;

    let service = ConversationsService::from(&td.deps);
    let ids = service
        .sorted_conversations()
        .await
        .into_iter()
        .map(|c| c.id.to_string())
        .collect::<Vec<_>>();

    assert_eq!(ids, vec!["active", "fresh"]);
}

#[async_test(start_paused = true)]
async fn test_remote_typing_indicator_expires_after_three_seconds() {
    use devconnect_core_client::app::event_handlers::{
        ServerEvent, ServerEventHandler, TypingPayload, UserStateEventHandler, UserStatusEvent,
    };

    let td = test_deps();
    td.deps.conversations_repo.upsert(conversation("c1")).await;
    let handler = UserStateEventHandler::from(&td.deps);
    let service = ConversationsService::from(&td.deps);

    handler
        .handle_event(ServerEvent::UserStatus(UserStatusEvent::Typing(
            TypingPayload {
                conversation_id: Some("c1".into()),
                user_id: "u2".into(),
                user_name: Some("Alice".to_string()),
            },
        )))
        .await
        .unwrap();

    assert_eq!(
        service.composing_users(&"c1".into()),
        vec!["Alice".to_string()]
    );

    // No stopTyping ever arrives, the indicator expires on its own.
    td.time_provider.advance(chrono::Duration::seconds(3));
    assert!(service.composing_users(&"c1".into()).is_empty());
}

#[async_test(start_paused = true)]
async fn test_send_message_dispatches_append_then_update() {
    let td = test_deps();
    td.deps.conversations_repo.upsert(conversation("c1")).await;
    let service = ConversationsService::from(&td.deps);

    assert!(service.send_message(&"c1".into(), "hello").await);
    tokio::time::sleep(Duration::from_secs(1)).await;

    let conversation_events = td
        .dispatcher
        .events()
        .into_iter()
        .filter_map(|event| match event {
            ClientEvent::ConversationChanged { r#type, .. } => Some(r#type),
            _ => None,
        })
        .collect::<Vec<_>>();

    assert!(matches!(
        conversation_events[0],
        ClientConversationEventType::MessagesAppended { .. }
    ));
    assert!(matches!(
        conversation_events[1],
        ClientConversationEventType::MessagesUpdated { .. }
    ));
}
