// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use secrecy::{ExposeSecret, Secret};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

use crate::domain::connection::models::ConnectionError;
use crate::domain::connection::services::{Connector, TransportSink, TransportStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// The production connector. The token is handed over as a query parameter,
/// mirroring how the web client authenticates its channel.
pub struct TungsteniteConnector;

#[async_trait]
impl Connector for TungsteniteConnector {
    async fn connect(
        &self,
        url: &Url,
        token: Secret<String>,
    ) -> Result<(Box<dyn TransportSink>, Box<dyn TransportStream>), ConnectionError> {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("token", token.expose_secret());

        let (stream, _) = connect_async(url.as_str())
            .await
            .map_err(|err| ConnectionError::Generic {
                msg: err.to_string(),
            })?;

        let (sink, stream) = stream.split();
        Ok((
            Box::new(WebSocketSink { sink }),
            Box::new(WebSocketSource { stream }),
        ))
    }
}

struct WebSocketSink {
    sink: SplitSink<WsStream, Message>,
}

#[async_trait]
impl TransportSink for WebSocketSink {
    async fn send(&mut self, frame: String) -> Result<(), ConnectionError> {
        self.sink
            .send(Message::Text(frame))
            .await
            .map_err(|err| ConnectionError::Generic {
                msg: err.to_string(),
            })
    }

    async fn close(&mut self) {
        let _ = self.sink.close().await;
    }
}

struct WebSocketSource {
    stream: SplitStream<WsStream>,
}

#[async_trait]
impl TransportStream for WebSocketSource {
    async fn receive(&mut self) -> Option<Result<String, ConnectionError>> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text)),
                Ok(Message::Close(_)) => return None,
                // Pings and pongs are handled by tungstenite itself, binary
                // frames are not part of our protocol.
                Ok(_) => continue,
                Err(err) => {
                    return Some(Err(ConnectionError::Generic {
                        msg: err.to_string(),
                    }))
                }
            }
        }
    }
}
