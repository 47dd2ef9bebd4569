// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use socket_client::{SocketClient, SocketConfig, SocketEventHandler};
pub use tungstenite_connector::TungsteniteConnector;

mod socket_client;
mod tungstenite_connector;
mod wire;
