// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use secrecy::Secret;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, warn};
use url::Url;

use crate::app::event_handlers::{ConnectionEvent, ServerEvent};
use crate::domain::connection::models::{ClientSocketEvent, ConnectionError, ConnectionStatus};
use crate::domain::connection::services::{
    ConnectionService, ConnectorProvider, TransportSink, TransportStream,
};
use crate::domain::shared::models::ConnectionState;
use crate::infra::socket::wire::parse_frame;
use crate::util::Backoff;

pub type SocketEventHandler = Arc<dyn Fn(ServerEvent) -> BoxFuture<'static, ()> + Send + Sync>;

pub struct SocketConfig {
    pub url: Url,
    pub heartbeat_interval: Duration,
    pub reconnect_base_delay: Duration,
    pub reconnect_max_delay: Duration,
    pub max_reconnect_attempts: u32,
}

/// The client's one real-time connection. A supervisor task owns the
/// transport: it dials, replays outgoing frames from a channel, emits the
/// heartbeat and retries with exponential backoff when dialing fails.
#[derive(Clone)]
pub struct SocketClient {
    inner: Arc<SocketClientInner>,
}

struct SocketClientInner {
    config: SocketConfig,
    connector_provider: ConnectorProvider,
    event_handler: SocketEventHandler,
    state: Mutex<SocketState>,
}

#[derive(Default)]
struct SocketState {
    connection_state: ConnectionState,
    attempt_count: u32,
    last_error: Option<ConnectionError>,
    token: Option<Secret<String>>,
    frame_tx: Option<mpsc::UnboundedSender<String>>,
    supervisor: Option<JoinHandle<()>>,
}

impl SocketState {
    fn supervisor_is_running(&self) -> bool {
        self.supervisor
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl SocketClient {
    pub fn new(
        config: SocketConfig,
        connector_provider: ConnectorProvider,
        event_handler: SocketEventHandler,
    ) -> Self {
        Self {
            inner: Arc::new(SocketClientInner {
                config,
                connector_provider,
                event_handler,
                state: Mutex::new(SocketState::default()),
            }),
        }
    }
}

#[async_trait]
impl ConnectionService for SocketClient {
    async fn connect(&self, token: Secret<String>) {
        let mut state = self.inner.state.lock();
        state.token = Some(token);

        // A second connect while the supervisor lives must not create a
        // duplicate connection.
        if state.supervisor_is_running() {
            return;
        }

        state.attempt_count = 0;
        state.last_error = None;
        state.supervisor = Some(tokio::spawn(run_supervisor(self.inner.clone())));
    }

    async fn disconnect(&self) {
        let supervisor = {
            let mut state = self.inner.state.lock();
            state.token = None;
            state.frame_tx = None;
            state.connection_state = ConnectionState::Disconnected;
            state.attempt_count = 0;
            state.last_error = None;
            state.supervisor.take()
        };

        if let Some(handle) = supervisor {
            handle.abort();
        }
    }

    async fn reconnect(&self) {
        let mut state = self.inner.state.lock();

        if state.token.is_none() || state.supervisor_is_running() {
            return;
        }

        state.attempt_count = 0;
        state.last_error = None;
        state.supervisor = Some(tokio::spawn(run_supervisor(self.inner.clone())));
    }

    fn emit(&self, event: ClientSocketEvent) -> bool {
        let state = self.inner.state.lock();

        if state.connection_state != ConnectionState::Connected {
            return false;
        }
        let Some(frame_tx) = &state.frame_tx else {
            return false;
        };

        let frame = match serde_json::to_string(&event) {
            Ok(frame) => frame,
            Err(err) => {
                error!("Failed to serialize outgoing event: {err}");
                return false;
            }
        };
        frame_tx.send(frame).is_ok()
    }

    fn connection_state(&self) -> ConnectionState {
        self.inner.state.lock().connection_state
    }

    fn status(&self) -> ConnectionStatus {
        let state = self.inner.state.lock();
        ConnectionStatus {
            state: state.connection_state,
            attempt_count: state.attempt_count,
            last_error: state.last_error.clone(),
        }
    }
}

async fn run_supervisor(inner: Arc<SocketClientInner>) {
    let mut backoff = Backoff::new(
        inner.config.reconnect_base_delay,
        inner.config.reconnect_max_delay,
    );

    loop {
        // The token disappears on logout, at which point we're done.
        let Some(token) = inner.state.lock().token.clone() else {
            break;
        };

        inner.state.lock().connection_state = ConnectionState::Connecting;

        let connector = (inner.connector_provider)();
        match connector.connect(&inner.config.url, token).await {
            Ok((sink, stream)) => {
                let (frame_tx, frame_rx) = mpsc::unbounded_channel();
                {
                    let mut state = inner.state.lock();
                    state.connection_state = ConnectionState::Connected;
                    state.attempt_count = 0;
                    state.last_error = None;
                    state.frame_tx = Some(frame_tx);
                }
                backoff.reset();

                (inner.event_handler)(ServerEvent::Connection(ConnectionEvent::Connected)).await;

                let error = drive_connection(&inner, sink, stream, frame_rx).await;

                {
                    let mut state = inner.state.lock();
                    state.connection_state = ConnectionState::Disconnected;
                    state.frame_tx = None;
                    state.last_error = error.clone();
                }
                (inner.event_handler)(ServerEvent::Connection(ConnectionEvent::Disconnected {
                    error,
                }))
                .await;
            }
            Err(error) => {
                let attempt_count = {
                    let mut state = inner.state.lock();
                    state.connection_state = ConnectionState::Disconnected;
                    state.attempt_count += 1;
                    state.last_error = Some(error.clone());
                    state.attempt_count
                };

                (inner.event_handler)(ServerEvent::Connection(ConnectionEvent::Disconnected {
                    error: Some(error),
                }))
                .await;

                if attempt_count > inner.config.max_reconnect_attempts {
                    warn!(
                        "Giving up after {attempt_count} failed connection attempts. \
                         Waiting for a manual reconnect."
                    );
                    break;
                }
                tokio::time::sleep(backoff.next_delay()).await;
            }
        }
    }
}

/// Runs one established connection to completion. Returns the error that
/// ended it, or `None` for a clean remote close.
async fn drive_connection(
    inner: &Arc<SocketClientInner>,
    mut sink: Box<dyn TransportSink>,
    mut stream: Box<dyn TransportStream>,
    mut frame_rx: mpsc::UnboundedReceiver<String>,
) -> Option<ConnectionError> {
    let heartbeat_interval = inner.config.heartbeat_interval;

    // Outgoing frames and the heartbeat share the write half.
    let writer = tokio::spawn(async move {
        let mut heartbeat = tokio::time::interval(heartbeat_interval);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately, skip it.
        heartbeat.tick().await;

        loop {
            tokio::select! {
                frame = frame_rx.recv() => {
                    let Some(frame) = frame else { break };
                    if sink.send(frame).await.is_err() {
                        break;
                    }
                }
                _ = heartbeat.tick() => {
                    let Ok(frame) = serde_json::to_string(&ClientSocketEvent::Heartbeat) else {
                        break;
                    };
                    if sink.send(frame).await.is_err() {
                        break;
                    }
                }
            }
        }
        sink.close().await;
    });

    let error = loop {
        match stream.receive().await {
            Some(Ok(text)) => match parse_frame(&text) {
                Ok(event) => (inner.event_handler)(event).await,
                Err(err) => debug!("Ignoring unsupported frame: {err}"),
            },
            Some(Err(err)) => break Some(err),
            None => break None,
        }
    };

    writer.abort();
    error
}
