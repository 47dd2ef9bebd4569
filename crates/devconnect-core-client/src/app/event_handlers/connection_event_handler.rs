// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use crate::app::deps::{AppDependencies, DynAppContext, DynClientEventDispatcher, DynConnectionService};
use crate::app::event_handlers::{ConnectionEvent, ServerEvent, ServerEventHandler};
use crate::domain::connection::models::ClientSocketEvent;
use crate::{ClientEvent, ConnectionEvent as ClientConnectionEvent};

pub struct ConnectionEventHandler {
    ctx: DynAppContext,
    connection_service: DynConnectionService,
    client_event_dispatcher: DynClientEventDispatcher,
}

impl From<&AppDependencies> for ConnectionEventHandler {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            ctx: deps.ctx.clone(),
            connection_service: deps.connection_service.clone(),
            client_event_dispatcher: deps.client_event_dispatcher.clone(),
        }
    }
}

#[async_trait]
impl ServerEventHandler for ConnectionEventHandler {
    fn name(&self) -> &'static str {
        "connection"
    }

    async fn handle_event(&self, event: ServerEvent) -> Result<Option<ServerEvent>> {
        match event {
            ServerEvent::Connection(event) => self.handle_connection_event(event).await?,
            _ => return Ok(Some(event)),
        }
        Ok(None)
    }
}

impl ConnectionEventHandler {
    async fn handle_connection_event(&self, event: ConnectionEvent) -> Result<()> {
        match event {
            ConnectionEvent::Connected => {
                // Rejoining the session-scoped rooms is required on every
                // transition into Connected, the server does not remember
                // them across reconnects.
                match self.ctx.logged_in_user_id() {
                    Ok(user_id) => {
                        self.connection_service
                            .emit(ClientSocketEvent::Join { user_id });
                        self.connection_service
                            .emit(ClientSocketEvent::JoinNotificationRoom);
                    }
                    Err(_) => warn!("Connected without a logged-in user."),
                }

                if let Some(conversation_id) = self.ctx.open_conversation_id() {
                    self.connection_service
                        .emit(ClientSocketEvent::JoinConversation { conversation_id });
                }

                self.client_event_dispatcher
                    .dispatch_event(ClientEvent::ConnectionStatusChanged {
                        event: ClientConnectionEvent::Connect,
                    });
            }
            ConnectionEvent::Disconnected { error } => {
                self.client_event_dispatcher
                    .dispatch_event(ClientEvent::ConnectionStatusChanged {
                        event: ClientConnectionEvent::Disconnect { error },
                    });
            }
        }
        Ok(())
    }
}
