// devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use secrecy::Secret;
use tokio::sync::mpsc;
use url::Url;

use devconnect_core_client::domain::connection::models::ConnectionError;
use devconnect_core_client::domain::connection::services::{
    Connector, ConnectorProvider, TransportSink, TransportStream,
};

pub enum ConnectOutcome {
    Fail(ConnectionError),
    Succeed,
}

/// Scripts the outcome of every dial the socket client makes and records
/// attempt times and outgoing frames. Frames can be pushed to the client
/// through `deliver`, and `close_transport` simulates a remote close.
pub struct ConnectorScript {
    outcomes: Mutex<VecDeque<ConnectOutcome>>,
    attempts: Mutex<Vec<tokio::time::Instant>>,
    sent_frames: Mutex<Vec<String>>,
    inbound_tx: Mutex<Option<mpsc::UnboundedSender<String>>>,
}

impl ConnectorScript {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            outcomes: Default::default(),
            attempts: Default::default(),
            sent_frames: Default::default(),
            inbound_tx: Default::default(),
        })
    }

    pub fn push_outcome(&self, outcome: ConnectOutcome) {
        self.outcomes.lock().push_back(outcome);
    }

    pub fn push_failures(&self, count: usize) {
        for _ in 0..count {
            self.push_outcome(ConnectOutcome::Fail(ConnectionError::Generic {
                msg: "connection refused".to_string(),
            }));
        }
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().len()
    }

    /// The pauses between consecutive dial attempts.
    pub fn attempt_delays(&self) -> Vec<Duration> {
        let attempts = self.attempts.lock();
        attempts
            .windows(2)
            .map(|pair| pair[1].duration_since(pair[0]))
            .collect()
    }

    pub fn sent_frames(&self) -> Vec<String> {
        self.sent_frames.lock().clone()
    }

    pub fn clear_sent_frames(&self) {
        self.sent_frames.lock().clear();
    }

    /// Delivers a frame to the client as if the server had pushed it.
    pub fn deliver(&self, frame: &str) {
        let guard = self.inbound_tx.lock();
        let tx = guard.as_ref().expect("No live transport to deliver to");
        tx.send(frame.to_string()).expect("Transport is gone");
    }

    pub fn close_transport(&self) {
        self.inbound_tx.lock().take();
    }

    pub fn provider(self: &Arc<Self>) -> ConnectorProvider {
        let script = self.clone();
        Box::new(move || {
            Box::new(TestConnector {
                script: script.clone(),
            })
        })
    }
}

struct TestConnector {
    script: Arc<ConnectorScript>,
}

#[async_trait]
impl Connector for TestConnector {
    async fn connect(
        &self,
        _url: &Url,
        _token: Secret<String>,
    ) -> Result<(Box<dyn TransportSink>, Box<dyn TransportStream>), ConnectionError> {
        self.script.attempts.lock().push(tokio::time::Instant::now());

        let outcome = self
            .script
            .outcomes
            .lock()
            .pop_front()
            .unwrap_or(ConnectOutcome::Fail(ConnectionError::Generic {
                msg: "unscripted attempt".to_string(),
            }));

        match outcome {
            ConnectOutcome::Fail(error) => Err(error),
            ConnectOutcome::Succeed => {
                let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
                *self.script.inbound_tx.lock() = Some(inbound_tx);

                Ok((
                    Box::new(TestSink {
                        script: self.script.clone(),
                    }),
                    Box::new(TestStream { rx: inbound_rx }),
                ))
            }
        }
    }
}

struct TestSink {
    script: Arc<ConnectorScript>,
}

#[async_trait]
impl TransportSink for TestSink {
    async fn send(&mut self, frame: String) -> Result<(), ConnectionError> {
        self.script.sent_frames.lock().push(frame);
        Ok(())
    }

    async fn close(&mut self) {}
}

struct TestStream {
    rx: mpsc::UnboundedReceiver<String>,
}

#[async_trait]
impl TransportStream for TestStream {
    async fn receive(&mut self) -> Option<Result<String, ConnectionError>> {
        self.rx.recv().await.map(Ok)
    }
}
