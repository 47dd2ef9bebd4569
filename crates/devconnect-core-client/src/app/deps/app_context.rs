// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;
use parking_lot::RwLock;
use secrecy::Secret;

use crate::domain::account::models::Session;
use crate::domain::shared::models::{ConversationId, UserId};

pub struct AppConfig {
    /// Interval of the keep-alive frame sent while connected.
    pub heartbeat_interval: Duration,
    /// Interval of the unread-count poll that backstops missed push events.
    pub unread_poll_interval: Duration,
    pub reconnect_base_delay: Duration,
    pub reconnect_max_delay: Duration,
    /// Consecutive failed connection attempts after which automatic retry
    /// stops and only a manual reconnect recovers.
    pub max_reconnect_attempts: u32,
    /// How long an optimistically sent message stays in `Sending` before it
    /// is flipped to `Sent` as a placeholder pending the real ack.
    pub sent_placeholder_delay: Duration,
    /// Silence period after which a `stopTyping` is emitted for the local
    /// user.
    pub typing_stop_delay: Duration,
    /// Lifetime of a remote typing indicator without a stop event.
    pub typing_expiry: chrono::Duration,
    /// Maximum distance between the local send time and the server ack
    /// timestamp for the two to be reconciled.
    pub ack_match_window: chrono::Duration,
    pub notifications_page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(30),
            unread_poll_interval: Duration::from_secs(30),
            reconnect_base_delay: Duration::from_secs(1),
            reconnect_max_delay: Duration::from_secs(30),
            max_reconnect_attempts: 5,
            sent_placeholder_delay: Duration::from_millis(800),
            typing_stop_delay: Duration::from_secs(1),
            typing_expiry: chrono::Duration::seconds(3),
            ack_match_window: chrono::Duration::seconds(5),
            notifications_page_size: 20,
        }
    }
}

pub struct AppContext {
    pub session: RwLock<Option<Session>>,
    pub open_conversation_id: RwLock<Option<ConversationId>>,
    /// Whether the embedding window currently has focus, as reported by the
    /// UI. Decides if an inbound message should request attention.
    pub window_focused: AtomicBool,
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            session: Default::default(),
            open_conversation_id: Default::default(),
            window_focused: AtomicBool::new(true),
            config,
        }
    }
}

impl AppContext {
    pub fn logged_in_user_id(&self) -> Result<UserId> {
        self.session
            .read()
            .as_ref()
            .map(|s| s.user_id().clone())
            .ok_or(anyhow::anyhow!(
                "Failed to read the user's id since the client is not logged in."
            ))
    }

    pub fn auth_token(&self) -> Result<Secret<String>> {
        self.session
            .read()
            .as_ref()
            .map(|s| s.auth_token.clone())
            .ok_or(anyhow::anyhow!(
                "Failed to read the auth token since the client is not logged in."
            ))
    }

    pub fn set_session(&self, session: Session) {
        self.session.write().replace(session);
    }

    pub fn reset_session(&self) {
        self.session.write().take();
        self.open_conversation_id.write().take();
    }

    pub fn open_conversation_id(&self) -> Option<ConversationId> {
        self.open_conversation_id.read().clone()
    }

    /// Swaps the currently open conversation and returns the previous one.
    pub fn set_open_conversation(
        &self,
        conversation_id: Option<ConversationId>,
    ) -> Option<ConversationId> {
        let mut guard = self.open_conversation_id.write();
        std::mem::replace(&mut *guard, conversation_id)
    }

    pub fn is_conversation_open(&self, conversation_id: &ConversationId) -> bool {
        self.open_conversation_id
            .read()
            .as_ref()
            .map(|open| open == conversation_id)
            .unwrap_or(false)
    }

    pub fn window_focused(&self) -> bool {
        self.window_focused.load(Ordering::Relaxed)
    }

    pub fn set_window_focused(&self, focused: bool) {
        self.window_focused.store(focused, Ordering::Relaxed);
    }
}
