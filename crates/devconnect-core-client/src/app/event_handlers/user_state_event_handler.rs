// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use crate::app::deps::{
    AppDependencies, DynAppContext, DynClientEventDispatcher, DynConversationsRepository,
    DynTimeProvider, DynTypingState,
};
use crate::app::event_handlers::{
    OnlineUsersPayload, ServerEvent, ServerEventHandler, TypingPayload, UserStatusEvent,
    UserStatusPayload,
};
use crate::domain::shared::models::UserId;
use crate::{ClientConversationEventType, ClientEvent};

pub struct UserStateEventHandler {
    ctx: DynAppContext,
    conversations_repo: DynConversationsRepository,
    typing_state: DynTypingState,
    time_provider: DynTimeProvider,
    client_event_dispatcher: DynClientEventDispatcher,
}

impl From<&AppDependencies> for UserStateEventHandler {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            ctx: deps.ctx.clone(),
            conversations_repo: deps.conversations_repo.clone(),
            typing_state: deps.typing_state.clone(),
            time_provider: deps.time_provider.clone(),
            client_event_dispatcher: deps.client_event_dispatcher.clone(),
        }
    }
}

#[async_trait]
impl ServerEventHandler for UserStateEventHandler {
    fn name(&self) -> &'static str {
        "user_state"
    }

    async fn handle_event(&self, event: ServerEvent) -> Result<Option<ServerEvent>> {
        match event {
            ServerEvent::UserStatus(event) => match event {
                UserStatusEvent::Typing(payload) => self.handle_typing(payload, true).await?,
                UserStatusEvent::StoppedTyping(payload) => {
                    self.handle_typing(payload, false).await?
                }
                UserStatusEvent::StatusUpdate(payload) => self.handle_status_update(payload).await?,
                UserStatusEvent::OnlineUsers(payload) => self.handle_online_users(payload).await?,
            },
            _ => return Ok(Some(event)),
        }
        Ok(None)
    }
}

impl UserStateEventHandler {
    async fn handle_typing(&self, payload: TypingPayload, is_typing: bool) -> Result<()> {
        let Some(conversation_id) = payload.conversation_id else {
            warn!("Dropping typing event without a conversation id.");
            return Ok(());
        };

        // Our own typing echoes back from the server, ignore it.
        if self
            .ctx
            .logged_in_user_id()
            .map(|me| me == payload.user_id)
            .unwrap_or(false)
        {
            return Ok(());
        }

        let changed = if is_typing {
            self.typing_state.insert(
                conversation_id.clone(),
                payload.user_id.clone(),
                payload
                    .user_name
                    .unwrap_or_else(|| payload.user_id.to_string()),
                self.time_provider.now(),
            );
            true
        } else {
            self.typing_state.remove(&conversation_id, &payload.user_id)
        };

        if changed {
            self.client_event_dispatcher.dispatch_conversation_event(
                conversation_id,
                ClientConversationEventType::ComposingUsersChanged,
            );
        }
        Ok(())
    }

    async fn handle_status_update(&self, payload: UserStatusPayload) -> Result<()> {
        let me = self.ctx.logged_in_user_id()?;
        let changed = self
            .set_online_states(&me, |user_id| {
                if user_id == &payload.user_id {
                    Some(payload.is_online)
                } else {
                    None
                }
            })
            .await;

        if changed {
            self.client_event_dispatcher
                .dispatch_event(ClientEvent::ConversationsChanged);
        }
        Ok(())
    }

    async fn handle_online_users(&self, payload: OnlineUsersPayload) -> Result<()> {
        let me = self.ctx.logged_in_user_id()?;
        let changed = self
            .set_online_states(&me, |user_id| Some(payload.user_ids.contains(user_id)))
            .await;

        if changed {
            self.client_event_dispatcher
                .dispatch_event(ClientEvent::ConversationsChanged);
        }
        Ok(())
    }

    /// Applies `resolve` to the counterpart of each direct conversation.
    /// Returns whether any online flag actually changed.
    async fn set_online_states(
        &self,
        me: &UserId,
        resolve: impl Fn(&UserId) -> Option<bool>,
    ) -> bool {
        let mut changed = false;

        for conversation in self.conversations_repo.get_all().await {
            let Some(counterpart) = conversation.counterpart(me) else {
                continue;
            };
            let Some(is_online) = resolve(&counterpart.id) else {
                continue;
            };
            if conversation.is_online == is_online {
                continue;
            }

            changed |= self
                .conversations_repo
                .update(
                    &conversation.id,
                    Box::new(move |conversation| conversation.is_online = is_online),
                )
                .await;
        }

        changed
    }
}
