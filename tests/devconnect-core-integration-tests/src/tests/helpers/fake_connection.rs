// devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use parking_lot::Mutex;
use secrecy::Secret;

use devconnect_core_client::domain::connection::models::{
    ClientSocketEvent, ConnectionStatus,
};
use devconnect_core_client::domain::connection::services::ConnectionService;
use devconnect_core_client::dtos::ConnectionState;

/// A connection whose state tests flip directly. Records every emitted
/// event, and refuses emissions while not connected just like the real one.
pub struct FakeConnection {
    state: Mutex<ConnectionState>,
    pub emitted: Mutex<Vec<ClientSocketEvent>>,
}

impl FakeConnection {
    pub fn connected() -> Self {
        Self {
            state: Mutex::new(ConnectionState::Connected),
            emitted: Default::default(),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            state: Mutex::new(ConnectionState::Disconnected),
            emitted: Default::default(),
        }
    }

    pub fn set_state(&self, state: ConnectionState) {
        *self.state.lock() = state;
    }

    pub fn emitted_events(&self) -> Vec<ClientSocketEvent> {
        self.emitted.lock().clone()
    }
}

#[async_trait]
impl ConnectionService for FakeConnection {
    async fn connect(&self, _token: Secret<String>) {
        *self.state.lock() = ConnectionState::Connected;
    }

    async fn disconnect(&self) {
        *self.state.lock() = ConnectionState::Disconnected;
    }

    async fn reconnect(&self) {
        *self.state.lock() = ConnectionState::Connected;
    }

    fn emit(&self, event: ClientSocketEvent) -> bool {
        if *self.state.lock() != ConnectionState::Connected {
            return false;
        }
        self.emitted.lock().push(event);
        true
    }

    fn connection_state(&self) -> ConnectionState {
        *self.state.lock()
    }

    fn status(&self) -> ConnectionStatus {
        ConnectionStatus {
            state: *self.state.lock(),
            attempt_count: 0,
            last_error: None,
        }
    }
}
