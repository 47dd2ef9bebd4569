// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Deref;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::app::deps::DynAppContext;
use crate::client_builder::{ClientBuilder, UndefinedServerUrls, UndefinedStorage};
use crate::domain::shared::models::UserId;
use crate::services::{
    AccountService, ConnectionService, ConversationsService, NotificationsService,
};
use crate::ClientEvent;

#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

pub trait ClientDelegate: Send + Sync {
    fn handle_event(&self, client: Client, event: ClientEvent);
}

impl Client {
    pub fn builder() -> ClientBuilder<UndefinedStorage, UndefinedServerUrls> {
        ClientBuilder::new()
    }
}

pub struct ClientInner {
    pub account: AccountService,
    pub connection: ConnectionService,
    pub conversations: ConversationsService,
    pub notifications: NotificationsService,
    pub(crate) ctx: DynAppContext,
    pub(crate) background_tasks: Vec<JoinHandle<()>>,
}

impl From<Arc<ClientInner>> for Client {
    fn from(inner: Arc<ClientInner>) -> Self {
        Client { inner }
    }
}

impl Deref for Client {
    type Target = ClientInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Client {
    pub fn connected_user_id(&self) -> Option<UserId> {
        self.ctx.logged_in_user_id().ok()
    }

    /// Reported by the shell. Decides whether an inbound message triggers an
    /// `AttentionRequested` event.
    pub fn set_window_focused(&self, focused: bool) {
        self.ctx.set_window_focused(focused)
    }
}

impl Drop for ClientInner {
    fn drop(&mut self) {
        for task in &self.background_tasks {
            task.abort();
        }
    }
}
