// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use secrecy::Secret;
use url::Url;

use crate::domain::connection::models::ConnectionError;

pub type ConnectorProvider = Box<dyn Fn() -> Box<dyn Connector> + Send + Sync>;

/// Dials the real-time endpoint. Abstracted so that tests can drive the
/// connection lifecycle without a network.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns the write and read half of an established transport speaking
    /// raw JSON text frames.
    async fn connect(
        &self,
        url: &Url,
        token: Secret<String>,
    ) -> Result<(Box<dyn TransportSink>, Box<dyn TransportStream>), ConnectionError>;
}

#[async_trait]
pub trait TransportSink: Send {
    async fn send(&mut self, frame: String) -> Result<(), ConnectionError>;
    async fn close(&mut self);
}

#[async_trait]
pub trait TransportStream: Send {
    /// The next inbound frame. `None` means the transport was closed by the
    /// remote end.
    async fn receive(&mut self) -> Option<Result<String, ConnectionError>>;
}
