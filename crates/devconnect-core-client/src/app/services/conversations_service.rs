// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::app::deps::{
    AppDependencies, DynAppContext, DynClientEventDispatcher, DynConnectionService,
    DynConversationsRepository, DynIDProvider, DynMessagesRepository, DynMessagingService,
    DynTimeProvider, DynTypingState,
};
use crate::domain::connection::models::ClientSocketEvent;
use crate::domain::messaging::models::{
    Conversation, ConversationSummary, Message, MessageId, MessageKind, MessageStatus, Sender,
};
use crate::domain::shared::models::{ConnectionState, ConversationId, UserId};
use crate::{ClientConversationEventType, ClientEvent};

#[derive(Default)]
struct ComposeBurst {
    stop_handle: Option<JoinHandle<()>>,
}

pub struct ConversationsService {
    ctx: DynAppContext,
    connection_service: DynConnectionService,
    messaging_service: DynMessagingService,
    conversations_repo: DynConversationsRepository,
    messages_repo: DynMessagesRepository,
    typing_state: DynTypingState,
    id_provider: DynIDProvider,
    time_provider: DynTimeProvider,
    client_event_dispatcher: DynClientEventDispatcher,
    /// One active typing burst per conversation. An entry exists while the
    /// `typing` event for the burst is out and the `stopTyping` is pending.
    compose_bursts: Arc<Mutex<HashMap<ConversationId, ComposeBurst>>>,
    /// Bumped whenever a conversation is opened. History loads compare
    /// against it so a fetch for an already-abandoned view is discarded
    /// instead of applied.
    load_generation: Arc<AtomicU64>,
}

impl From<&AppDependencies> for ConversationsService {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            ctx: deps.ctx.clone(),
            connection_service: deps.connection_service.clone(),
            messaging_service: deps.messaging_service.clone(),
            conversations_repo: deps.conversations_repo.clone(),
            messages_repo: deps.messages_repo.clone(),
            typing_state: deps.typing_state.clone(),
            id_provider: deps.id_provider.clone(),
            time_provider: deps.time_provider.clone(),
            client_event_dispatcher: deps.client_event_dispatcher.clone(),
            compose_bursts: Default::default(),
            load_generation: Default::default(),
        }
    }
}

impl ConversationsService {
    /// Fetches the conversation list. When the fetch fails entirely the
    /// mirror restored from local storage serves as a degraded offline read.
    pub async fn load_conversations(&self) -> Result<Vec<Conversation>> {
        let me = self.ctx.logged_in_user_id()?;

        let summaries = match self.messaging_service.load_conversations().await {
            Ok(summaries) => summaries,
            Err(err) => {
                warn!("Failed to load conversations, serving cached state: {err}");
                return Ok(self.sorted_conversations().await);
            }
        };

        let mut conversations = Vec::with_capacity(summaries.len());
        for summary in summaries {
            conversations.push(self.conversation_from_summary(summary, &me).await);
        }

        self.conversations_repo.replace_all(conversations).await;
        self.client_event_dispatcher
            .dispatch_event(ClientEvent::ConversationsChanged);

        Ok(self.sorted_conversations().await)
    }

    /// The local conversation list in display order: conversations with at
    /// least one real message first, then most recent activity.
    pub async fn sorted_conversations(&self) -> Vec<Conversation> {
        self.conversations_repo
            .get_all()
            .await
            .into_iter()
            .sorted_by(|lhs, rhs| lhs.list_order(rhs))
            .collect()
    }

    /// Opens a conversation: joins its room, loads the history and marks
    /// everything read, locally first and write-behind on the server.
    pub async fn open_conversation(&self, conversation_id: &ConversationId) -> Result<Vec<Message>> {
        let me = self.ctx.logged_in_user_id()?;

        let previous = self.ctx.set_open_conversation(Some(conversation_id.clone()));
        if let Some(previous) = previous.filter(|previous| previous != conversation_id) {
            self.connection_service
                .emit(ClientSocketEvent::LeaveConversation {
                    conversation_id: previous,
                });
        }
        self.connection_service
            .emit(ClientSocketEvent::JoinConversation {
                conversation_id: conversation_id.clone(),
            });

        let generation = self.load_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let messages = match self.messaging_service.load_messages(conversation_id).await {
            Ok(remote_messages) => {
                let now = self.time_provider.now();
                remote_messages
                    .into_iter()
                    .filter_map(|remote| {
                        remote.into_message(self.id_provider.new_id().into(), &me, now)
                    })
                    .collect::<Vec<_>>()
            }
            Err(err) => {
                warn!("Failed to load messages, serving cached state: {err}");
                self.messages_repo.get_all(conversation_id).await
            }
        };

        // The user has navigated away while we were loading. Hand the result
        // back but leave the shared state alone.
        if self.load_generation.load(Ordering::SeqCst) != generation {
            return Ok(messages);
        }

        self.messages_repo
            .replace_all(conversation_id, messages.clone())
            .await;

        self.conversations_repo
            .update(
                conversation_id,
                Box::new(|conversation| conversation.unread_count = 0),
            )
            .await;

        if let Err(err) = self.messaging_service.mark_messages_read(conversation_id).await {
            warn!("Failed to mark messages of '{conversation_id}' as read: {err}");
        }
        // Broadcast so other devices and sessions converge too.
        self.connection_service
            .emit(ClientSocketEvent::MarkMessagesAsRead {
                conversation_id: conversation_id.clone(),
            });

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::ConversationsChanged);

        Ok(messages)
    }

    /// Leaves the conversation's room when the user navigates away.
    pub async fn close_conversation(&self, conversation_id: &ConversationId) {
        if !self.ctx.is_conversation_open(conversation_id) {
            return;
        }
        self.ctx.set_open_conversation(None);
        self.connection_service
            .emit(ClientSocketEvent::LeaveConversation {
                conversation_id: conversation_id.clone(),
            });
    }

    /// Sends a message optimistically. Local state reflects the message
    /// before any network round trip completes. Returns false without any
    /// effect when disconnected or when no user is logged in.
    pub async fn send_message(&self, conversation_id: &ConversationId, content: &str) -> bool {
        if self.ctx.logged_in_user_id().is_err() {
            return false;
        }
        if self.connection_service.connection_state() != ConnectionState::Connected {
            return false;
        }
        let content = content.trim();
        if content.is_empty() {
            return false;
        }

        let now = self.time_provider.now();
        let message = Message {
            id: self.id_provider.new_id().into(),
            server_id: None,
            sender: Sender::Me,
            content: content.to_string(),
            timestamp: now,
            status: MessageStatus::Sending,
            kind: MessageKind::Text,
        };

        self.messages_repo
            .append(conversation_id, message.clone())
            .await;

        {
            let preview = message.content.clone();
            self.conversations_repo
                .update(
                    conversation_id,
                    Box::new(move |conversation| {
                        conversation.last_message = Some(preview);
                        conversation.last_activity = Some(now);
                        conversation.has_messages = true;
                    }),
                )
                .await;
        }

        self.client_event_dispatcher.dispatch_conversation_event(
            conversation_id.clone(),
            ClientConversationEventType::MessagesAppended {
                message_ids: vec![message.id.clone()],
            },
        );
        self.client_event_dispatcher
            .dispatch_event(ClientEvent::ConversationsChanged);

        if !self.connection_service.emit(ClientSocketEvent::SendMessage {
            conversation_id: conversation_id.clone(),
            content: content.to_string(),
        }) {
            warn!("The connection dropped before the message could be sent.");
        }

        self.schedule_sent_placeholder(conversation_id.clone(), message.id.clone());
        true
    }

    /// Called on every keystroke in the compose field. Emits `typing` once
    /// per burst and schedules the `stopTyping` after a fixed silence.
    pub fn notify_composing(&self, conversation_id: &ConversationId) {
        if self.connection_service.connection_state() != ConnectionState::Connected {
            return;
        }

        let mut bursts = self.compose_bursts.lock();

        match bursts.get_mut(conversation_id) {
            None => {
                self.connection_service.emit(ClientSocketEvent::Typing {
                    conversation_id: conversation_id.clone(),
                });
            }
            Some(burst) => {
                if let Some(handle) = burst.stop_handle.take() {
                    handle.abort();
                }
            }
        }

        let connection_service = self.connection_service.clone();
        let compose_bursts = self.compose_bursts.clone();
        let delay = self.ctx.config.typing_stop_delay;
        let id = conversation_id.clone();

        let stop_handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            connection_service.emit(ClientSocketEvent::StopTyping {
                conversation_id: id.clone(),
            });
            compose_bursts.lock().remove(&id);
        });

        bursts.insert(
            conversation_id.clone(),
            ComposeBurst {
                stop_handle: Some(stop_handle),
            },
        );
    }

    /// The display names of users currently composing in the conversation.
    pub fn composing_users(&self, conversation_id: &ConversationId) -> Vec<String> {
        self.typing_state.composing_users(
            conversation_id,
            self.time_provider.now(),
            self.ctx.config.typing_expiry,
        )
    }

    pub async fn messages(&self, conversation_id: &ConversationId) -> Vec<Message> {
        self.messages_repo.get_all(conversation_id).await
    }

    /// Starts (or returns) the direct conversation with `user_id`.
    pub async fn start_direct_conversation(&self, user_id: &UserId) -> Result<Conversation> {
        let me = self.ctx.logged_in_user_id()?;
        let summary = self
            .messaging_service
            .create_direct_conversation(user_id)
            .await?;

        let conversation = self.conversation_from_summary(summary, &me).await;
        self.conversations_repo.upsert(conversation.clone()).await;
        self.client_event_dispatcher
            .dispatch_event(ClientEvent::ConversationsChanged);

        Ok(conversation)
    }

    /// After a fixed delay the optimistic message moves from `Sending` to
    /// `Sent` as a placeholder, unless the real ack arrived first.
    fn schedule_sent_placeholder(&self, conversation_id: ConversationId, message_id: MessageId) {
        let messages_repo = self.messages_repo.clone();
        let client_event_dispatcher = self.client_event_dispatcher.clone();
        let delay = self.ctx.config.sent_placeholder_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let target_id = message_id.clone();
            let changed = messages_repo
                .update_all(
                    &conversation_id,
                    Box::new(move |message| {
                        message.id == target_id
                            && message.status == MessageStatus::Sending
                            && message.status.advance(MessageStatus::Sent)
                    }),
                )
                .await;

            if changed.is_empty() {
                return;
            }

            client_event_dispatcher.dispatch_conversation_event(
                conversation_id,
                ClientConversationEventType::MessagesUpdated {
                    message_ids: changed,
                },
            );
        });
    }

    /// Builds the local conversation from a backend summary, resolving the
    /// last-message preview through the defined cascade: the summary's own
    /// preview, the embedded messages, a dedicated one-message fetch, the
    /// local cache. First source with content wins.
    async fn conversation_from_summary(
        &self,
        summary: ConversationSummary,
        me: &UserId,
    ) -> Conversation {
        let mut preview: Option<(String, Option<DateTime<Utc>>)> = None;

        if let Some(last_message) = &summary.last_message {
            if let Some(content) = &last_message.content {
                preview = Some((content.clone(), last_message.timestamp));
            }
        }

        if preview.is_none() {
            if let Some(messages) = &summary.messages {
                preview = messages
                    .iter()
                    .rev()
                    .find_map(|m| m.content.clone().map(|content| (content, m.timestamp)));
            }
        }

        if preview.is_none() {
            match self.messaging_service.load_latest_message(&summary.id).await {
                Ok(Some(message)) => {
                    preview = message.content.map(|content| (content, message.timestamp));
                }
                Ok(None) => (),
                Err(err) => {
                    warn!(
                        "Failed to load the latest message of '{}': {err}",
                        summary.id
                    );
                }
            }
        }

        if preview.is_none() {
            preview = self
                .conversations_repo
                .get(&summary.id)
                .await
                .and_then(|cached| {
                    cached
                        .last_message
                        .map(|content| (content, cached.last_activity))
                });
        }

        let (last_message, preview_timestamp) = match preview {
            Some((content, timestamp)) => (Some(content), timestamp),
            None => (None, None),
        };

        Conversation {
            name: summary.display_name(me),
            id: summary.id,
            participants: summary.participants,
            is_group: summary.is_group,
            has_messages: last_message.is_some(),
            last_activity: summary.last_activity.or(preview_timestamp),
            last_message,
            unread_count: summary.unread_count,
            is_online: summary.is_online,
        }
    }
}
