// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use secrecy::Secret;

use crate::domain::connection::models::{ClientSocketEvent, ConnectionStatus};
use crate::domain::shared::models::ConnectionState;

/// The client's one real-time connection. Implementations own the transport
/// lifecycle including automatic reconnects; observers learn about state
/// changes through `ServerEvent::Connection` events.
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait ConnectionService: Send + Sync {
    /// Establishes the connection. Idempotent, a second call while connecting
    /// or connected is a no-op. Failures are not returned but drive the
    /// automatic retry, the caller continues in degraded mode.
    async fn connect(&self, token: Secret<String>);

    async fn disconnect(&self);

    /// Manually restarts the connect loop after automatic retries were
    /// exhausted. Resets the attempt counter.
    async fn reconnect(&self);

    /// Sends `event` if currently connected. Returns false without queueing
    /// or buffering otherwise.
    fn emit(&self, event: ClientSocketEvent) -> bool;

    fn connection_state(&self) -> ConnectionState;

    fn status(&self) -> ConnectionStatus;
}
