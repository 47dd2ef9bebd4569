// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::connection::models::ConnectionError;
use crate::domain::shared::models::ConnectionState;

/// A snapshot of the transport connection, surfaced to the UI as the
/// connectivity indicator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionStatus {
    pub state: ConnectionState,
    /// Consecutive failed connection attempts. Reset on success and on
    /// manual reconnect.
    pub attempt_count: u32,
    pub last_error: Option<ConnectionError>,
}
