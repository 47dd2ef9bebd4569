// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use secrecy::{ExposeSecret, Secret};
use tracing::warn;

use crate::app::deps::{
    AppDependencies, DynAppContext, DynClientEventDispatcher, DynConnectionService,
    DynLocalStorage, DynUserAccountService,
};
use crate::domain::account::models::{Session, UserProfile};
use crate::domain::account::services::{AuthError, AuthResponse, Registration};
use crate::infra::storage::keys;
use crate::ClientEvent;

pub struct AccountService {
    ctx: DynAppContext,
    user_account_service: DynUserAccountService,
    connection_service: DynConnectionService,
    local_storage: DynLocalStorage,
    client_event_dispatcher: DynClientEventDispatcher,
}

impl From<&AppDependencies> for AccountService {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            ctx: deps.ctx.clone(),
            user_account_service: deps.user_account_service.clone(),
            connection_service: deps.connection_service.clone(),
            local_storage: deps.local_storage.clone(),
            client_event_dispatcher: deps.client_event_dispatcher.clone(),
        }
    }
}

impl AccountService {
    pub async fn log_in(
        &self,
        email: &str,
        password: Secret<String>,
    ) -> Result<UserProfile, AuthError> {
        let response = self.user_account_service.log_in(email, password).await?;
        self.start_session(response).await
    }

    pub async fn sign_up(&self, registration: Registration) -> Result<UserProfile, AuthError> {
        let response = self.user_account_service.sign_up(registration).await?;
        self.start_session(response).await
    }

    /// Restores the session persisted by an earlier login. Returns `None`
    /// when nothing (or something corrupt) is stored, in which case the UI
    /// should present the login screen.
    pub async fn restore(&self) -> Result<Option<UserProfile>> {
        let token = self.local_storage.get(keys::TOKEN)?;
        let user = self.local_storage.get(keys::USER)?;

        let (Some(token), Some(user)) = (token, user) else {
            return Ok(None);
        };

        let user = match serde_json::from_str::<UserProfile>(&user) {
            Ok(user) => user,
            Err(err) => {
                warn!("Discarding corrupt stored session: {err}");
                self.local_storage.remove(keys::TOKEN)?;
                self.local_storage.remove(keys::USER)?;
                return Ok(None);
            }
        };

        let token = Secret::new(token);
        self.ctx.set_session(Session {
            user: user.clone(),
            auth_token: token.clone(),
        });
        self.connection_service.connect(token).await;

        Ok(Some(user))
    }

    pub async fn log_out(&self) -> Result<()> {
        self.connection_service.disconnect().await;
        self.ctx.reset_session();
        // The conversation and message mirrors survive for the next
        // degraded-mode start, only the session keys go.
        self.local_storage.remove(keys::TOKEN)?;
        self.local_storage.remove(keys::USER)?;

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::AccountInfoChanged);
        Ok(())
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.ctx.session.read().as_ref().map(|s| s.user.clone())
    }

    async fn start_session(&self, response: AuthResponse) -> Result<UserProfile, AuthError> {
        let AuthResponse { user, token } = response;

        self.ctx.set_session(Session {
            user: user.clone(),
            auth_token: token.clone(),
        });

        if let Err(err) = self
            .local_storage
            .set(keys::TOKEN, token.expose_secret())
            .and_then(|_| {
                self.local_storage
                    .set(keys::USER, &serde_json::to_string(&user)?)
            })
        {
            warn!("Failed to persist session: {err}");
        }

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::AccountInfoChanged);

        self.connection_service.connect(token).await;
        Ok(user)
    }
}
