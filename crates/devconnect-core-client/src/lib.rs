// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use app::deps::AppConfig;
pub use app::{dtos, services};
pub use client::{Client, ClientDelegate};
pub use client_event::{ClientConversationEventType, ClientEvent, ConnectionEvent};
pub use domain::connection::services::{Connector, ConnectorProvider, TransportSink, TransportStream};
pub use infra::storage::{FsStorage, InMemoryStorage, LocalStorage};
pub use util::{IDProvider, SystemTimeProvider, TimeProvider, UUIDProvider};


pub mod app;
mod client;
mod client_builder;
mod client_event;

#[cfg(feature = "test")]
pub mod domain;
#[cfg(not(feature = "test"))]
pub(crate) mod domain;

#[cfg(feature = "test")]
pub mod infra;
#[cfg(not(feature = "test"))]
pub(crate) mod infra;

#[cfg(feature = "test")]
pub mod util;
#[cfg(not(feature = "test"))]
pub(crate) mod util;
