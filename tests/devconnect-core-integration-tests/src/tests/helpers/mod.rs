// devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use deps::{test_deps, TestDeps, TestDepsBuilder};
pub use fake_connection::FakeConnection;
pub use recording_event_dispatcher::RecordingEventDispatcher;
pub use test_connector::{ConnectOutcome, ConnectorScript};

mod deps;
mod fake_connection;
mod recording_event_dispatcher;
mod test_connector;
