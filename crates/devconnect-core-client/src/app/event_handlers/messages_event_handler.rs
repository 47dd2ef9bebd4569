// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::app::deps::{
    AppDependencies, DynAppContext, DynClientEventDispatcher, DynConversationsRepository,
    DynIDProvider, DynMessagesRepository, DynMessagingService, DynTimeProvider,
};
use crate::app::event_handlers::{
    MessageAckPayload, MessageEvent, ReceiptPayload, ServerEvent, ServerEventHandler,
};
use crate::domain::messaging::models::{
    find_ack_target, Conversation, Message, MessageAck, MessageStatus, Participant, RemoteMessage,
    Sender,
};
use crate::domain::shared::models::{ConversationId, UserId};
use crate::{ClientConversationEventType, ClientEvent};

pub struct MessagesEventHandler {
    ctx: DynAppContext,
    conversations_repo: DynConversationsRepository,
    messages_repo: DynMessagesRepository,
    messaging_service: DynMessagingService,
    id_provider: DynIDProvider,
    time_provider: DynTimeProvider,
    client_event_dispatcher: DynClientEventDispatcher,
}

impl From<&AppDependencies> for MessagesEventHandler {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            ctx: deps.ctx.clone(),
            conversations_repo: deps.conversations_repo.clone(),
            messages_repo: deps.messages_repo.clone(),
            messaging_service: deps.messaging_service.clone(),
            id_provider: deps.id_provider.clone(),
            time_provider: deps.time_provider.clone(),
            client_event_dispatcher: deps.client_event_dispatcher.clone(),
        }
    }
}

#[async_trait]
impl ServerEventHandler for MessagesEventHandler {
    fn name(&self) -> &'static str {
        "messages"
    }

    async fn handle_event(&self, event: ServerEvent) -> Result<Option<ServerEvent>> {
        match event {
            ServerEvent::Message(event) => {
                match event {
                    MessageEvent::Received(message) => {
                        self.handle_received_message(message).await?
                    }
                    MessageEvent::Acknowledged(ack) => self.handle_message_ack(ack).await?,
                    MessageEvent::Delivered(receipt) => {
                        self.handle_receipt(receipt, MessageStatus::Delivered).await?
                    }
                    MessageEvent::Read(receipt) => {
                        self.handle_receipt(receipt, MessageStatus::Read).await?
                    }
                }
            }
            _ => return Ok(Some(event)),
        }
        Ok(None)
    }
}

impl MessagesEventHandler {
    async fn handle_received_message(&self, remote: RemoteMessage) -> Result<()> {
        let Ok(me) = self.ctx.logged_in_user_id() else {
            warn!("Dropping incoming message since no user is logged in.");
            return Ok(());
        };
        let Some(conversation_id) = remote.conversation_id.clone() else {
            warn!("Dropping newMessage without a conversation id.");
            return Ok(());
        };
        if remote.content.is_none() {
            warn!("Dropping newMessage without content.");
            return Ok(());
        }

        // Skip known messages…
        if let Some(server_id) = &remote.id {
            if self
                .messages_repo
                .contains_server_id(&conversation_id, server_id)
                .await
            {
                return Ok(());
            }
        }

        let now = self.time_provider.now();
        let Some(message) = remote.into_message(self.id_provider.new_id().into(), &me, now)
        else {
            warn!("Dropping newMessage with an unknown sender.");
            return Ok(());
        };

        if !self
            .messages_repo
            .append_push(&conversation_id, message.clone())
            .await
        {
            info!("Dropping stale message for conversation '{conversation_id}'.");
            return Ok(());
        }

        if self.conversations_repo.get(&conversation_id).await.is_none() {
            self.insert_missing_conversation(&conversation_id, &me, &message)
                .await;
        }

        let is_open = self.ctx.is_conversation_open(&conversation_id);

        {
            let preview = message.content.clone();
            let timestamp = message.timestamp;
            let counts_as_unread = !is_open && !message.sender.is_me();
            self.conversations_repo
                .update(
                    &conversation_id,
                    Box::new(move |conversation| {
                        conversation.last_message = Some(preview);
                        conversation.last_activity = Some(timestamp);
                        conversation.has_messages = true;
                        if counts_as_unread {
                            conversation.unread_count += 1;
                        }
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

        if let Sender::User { name, .. } = &message.sender {
            if !is_open || !self.ctx.window_focused() {
                self.client_event_dispatcher
                    .dispatch_event(ClientEvent::AttentionRequested {
                        conversation_id,
                        title: name.clone(),
                        body: message.content.clone(),
                    });
            }
        }

        Ok(())
    }

    /// A message arrived for a conversation we don't know yet. Usually the
    /// detail endpoint fills the gap, otherwise a minimal entry is
    /// synthesized from the message itself.
    async fn insert_missing_conversation(
        &self,
        conversation_id: &ConversationId,
        me: &UserId,
        message: &Message,
    ) {
        match self.messaging_service.load_conversation(conversation_id).await {
            Ok(summary) => {
                let conversation = Conversation {
                    name: summary.display_name(me),
                    id: summary.id,
                    participants: summary.participants,
                    is_group: summary.is_group,
                    last_message: None,
                    last_activity: summary.last_activity,
                    unread_count: 0,
                    is_online: summary.is_online,
                    has_messages: false,
                };
                self.conversations_repo.upsert(conversation).await;
            }
            Err(err) => {
                warn!(
                    "Failed to load conversation '{conversation_id}': {err}. Synthesizing it from the message."
                );

                let me_name = self
                    .ctx
                    .session
                    .read()
                    .as_ref()
                    .map(|s| s.user.name.clone())
                    .unwrap_or_default();
                let (name, participants) = match &message.sender {
                    Sender::User { id, name } => (
                        name.clone(),
                        vec![
                            Participant {
                                id: id.clone(),
                                name: name.clone(),
                            },
                            Participant {
                                id: me.clone(),
                                name: me_name,
                            },
                        ],
                    ),
                    Sender::Me => (conversation_id.to_string(), vec![]),
                };

                self.conversations_repo
                    .upsert(Conversation {
                        id: conversation_id.clone(),
                        name,
                        participants,
                        is_group: false,
                        last_message: None,
                        last_activity: None,
                        unread_count: 0,
                        is_online: false,
                        has_messages: false,
                    })
                    .await;
            }
        }
    }

    async fn handle_message_ack(&self, payload: MessageAckPayload) -> Result<()> {
        let MessageAckPayload {
            conversation_id: Some(conversation_id),
            server_id: Some(server_id),
            content: Some(content),
            timestamp,
        } = payload
        else {
            warn!("Dropping malformed messageSent ack.");
            return Ok(());
        };

        let ack = MessageAck {
            conversation_id: conversation_id.clone(),
            server_id,
            content,
            timestamp: timestamp.unwrap_or_else(|| self.time_provider.now()),
        };

        let messages = self.messages_repo.get_all(&conversation_id).await;
        let Some(target_id) = find_ack_target(&messages, &ack, self.ctx.config.ack_match_window)
        else {
            info!("Received a messageSent ack without a matching pending message.");
            return Ok(());
        };

        let server_id = ack.server_id.clone();
        self.messages_repo
            .update(
                &conversation_id,
                &target_id,
                Box::new(move |message| {
                    message.server_id = Some(server_id);
                    message.status.advance(MessageStatus::Sent);
                }),
            )
            .await;

        self.client_event_dispatcher.dispatch_conversation_event(
            conversation_id,
            ClientConversationEventType::MessagesUpdated {
                message_ids: vec![target_id],
            },
        );
        Ok(())
    }

    async fn handle_receipt(&self, payload: ReceiptPayload, target: MessageStatus) -> Result<()> {
        let Some(conversation_id) = payload.conversation_id else {
            warn!("Dropping receipt without a conversation id.");
            return Ok(());
        };

        let server_ids = payload.message_ids;
        let changed_ids = self
            .messages_repo
            .update_all(
                &conversation_id,
                Box::new(move |message| {
                    let matches = if server_ids.is_empty() {
                        // Conversation-wide receipts apply to our own
                        // messages only.
                        message.sender.is_me()
                    } else {
                        message
                            .server_id
                            .as_ref()
                            .map(|id| server_ids.contains(id))
                            .unwrap_or(false)
                    };
                    matches && message.status.advance(target)
                }),
            )
            .await;

        if changed_ids.is_empty() {
            return Ok(());
        }

        self.client_event_dispatcher.dispatch_conversation_event(
            conversation_id,
            ClientConversationEventType::MessagesUpdated {
                message_ids: changed_ids,
            },
        );
        Ok(())
    }
}
