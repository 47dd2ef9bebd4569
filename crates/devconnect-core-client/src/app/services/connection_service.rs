// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use tracing::warn;

use crate::app::deps::{AppDependencies, DynAppContext, DynConnectionService};
use crate::domain::connection::models::ConnectionStatus;
use crate::domain::shared::models::ConnectionState;

pub struct ConnectionService {
    ctx: DynAppContext,
    connection_service: DynConnectionService,
}

impl From<&AppDependencies> for ConnectionService {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            ctx: deps.ctx.clone(),
            connection_service: deps.connection_service.clone(),
        }
    }
}

impl ConnectionService {
    /// Connects the real-time channel for the current session. Does nothing
    /// when no session (and thus no token) is present.
    pub async fn connect(&self) {
        let Ok(token) = self.ctx.auth_token() else {
            warn!("Not connecting, no session is present.");
            return;
        };
        self.connection_service.connect(token).await
    }

    pub async fn disconnect(&self) {
        self.connection_service.disconnect().await
    }

    /// Manually retries after automatic reconnects were exhausted.
    pub async fn reconnect(&self) {
        self.connection_service.reconnect().await
    }

    pub fn state(&self) -> ConnectionState {
        self.connection_service.connection_state()
    }

    pub fn status(&self) -> ConnectionStatus {
        self.connection_service.status()
    }
}
