//! WebSocket upgrade handler relaying STOMP sessions to the broker.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Refuse the upgrade if no broker endpoint is configured
//! 2. Open a broker connection for this client
//! 3. Pump client frames to the broker through the [`RelayPolicy`]
//! 4. Pump broker frames back to the client, one frame per message
//! 5. Tear both directions down as soon as either side closes

use std::sync::Arc;

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::sync::mpsc;

use crate::domain::relay::RelayMode;
use crate::domain::stomp::{FrameSplitter, StompFrame, StreamChunk};
use crate::ports::{BrokerConnector, BrokerStream};

use super::policy::{FrameDecision, RelayPolicy};
use super::sessions::{ClientId, SessionTracker};

/// STOMP sub-protocols offered during the WebSocket handshake.
pub const STOMP_SUBPROTOCOLS: [&str; 3] = ["v12.stomp", "v11.stomp", "v10.stomp"];

const OUTBOUND_BUFFER: usize = 64;
const READ_BUFFER: usize = 8 * 1024;

type BrokerReader = ReadHalf<Box<dyn BrokerStream>>;
type BrokerWriter = WriteHalf<Box<dyn BrokerStream>>;

/// State required for relaying.
///
/// Extracted from the application state.
#[derive(Clone)]
pub struct RelayState {
    /// Broker connector; `None` when the relay is disabled.
    pub connector: Option<Arc<dyn BrokerConnector>>,
    /// Rules applied to client frames.
    pub policy: Arc<RelayPolicy>,
    /// How the relay is set up, for health reporting.
    pub mode: RelayMode,
    /// Sessions currently relayed.
    pub sessions: Arc<SessionTracker>,
}

impl RelayState {
    /// Create relay state backed by a broker connector.
    pub fn new(connector: Arc<dyn BrokerConnector>, policy: RelayPolicy, mode: RelayMode) -> Self {
        Self {
            connector: Some(connector),
            policy: Arc::new(policy),
            mode,
            sessions: Arc::new(SessionTracker::new()),
        }
    }

    /// Create state for a server running without a broker.
    pub fn disabled(policy: RelayPolicy) -> Self {
        Self {
            connector: None,
            policy: Arc::new(policy),
            mode: RelayMode::Disabled,
            sessions: Arc::new(SessionTracker::new()),
        }
    }
}

/// Handle WebSocket upgrade requests on the STOMP endpoint.
///
/// Answers `503 Service Unavailable` when no broker is configured.
pub async fn ws_handler(
    State(state): State<RelayState>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let Some(connector) = state.connector.clone() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "STOMP relay is not configured").into_response();
    };
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => return rejection.into_response(),
    };

    let policy = Arc::clone(&state.policy);
    let sessions = Arc::clone(&state.sessions);
    ws.protocols(STOMP_SUBPROTOCOLS)
        .on_upgrade(move |socket| handle_socket(socket, connector, policy, sessions))
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection.
async fn handle_socket(
    socket: WebSocket,
    connector: Arc<dyn BrokerConnector>,
    policy: Arc<RelayPolicy>,
    sessions: Arc<SessionTracker>,
) {
    let client_id = ClientId::new();
    let _session = sessions.open();
    let (mut sender, receiver) = socket.split();

    let connection = match connector.connect().await {
        Ok(connection) => connection,
        Err(e) => {
            tracing::error!(client_id = %client_id, error = %e, "Could not reach broker");
            let frame = StompFrame::error("Broker unavailable", e.to_string());
            let _ = sender.send(Message::Text(frame.encode())).await;
            let _ = sender.close().await;
            return;
        }
    };
    tracing::info!(client_id = %client_id, broker = %connection.address, "Relaying STOMP session");

    let (broker_reader, broker_writer) = tokio::io::split(connection.stream);
    let (outbound_tx, outbound_rx) = mpsc::channel(OUTBOUND_BUFFER);

    let writer_task = tokio::spawn(write_to_client(sender, outbound_rx));
    let mut broker_task = tokio::spawn(pump_broker_to_client(
        broker_reader,
        outbound_tx.clone(),
        client_id.clone(),
    ));
    let mut client_task = tokio::spawn(pump_client_to_broker(
        receiver,
        broker_writer,
        policy,
        outbound_tx,
        client_id.clone(),
    ));

    // Wait for either direction to finish
    tokio::select! {
        _ = &mut broker_task => client_task.abort(),
        _ = &mut client_task => broker_task.abort(),
    }

    // Once both pumps are gone their senders are dropped and the writer
    // drains what is left before closing the socket.
    let _ = writer_task.await;
    tracing::info!(client_id = %client_id, "STOMP session closed");
}

/// Owns the WebSocket sink; everything bound for the client goes through here.
async fn write_to_client(
    mut sender: SplitSink<WebSocket, Message>,
    mut outbound: mpsc::Receiver<Message>,
) {
    while let Some(message) = outbound.recv().await {
        let closing = matches!(message, Message::Close(_));
        if sender.send(message).await.is_err() || closing {
            break;
        }
    }
    let _ = sender.close().await;
}

async fn pump_broker_to_client(
    mut reader: BrokerReader,
    outbound: mpsc::Sender<Message>,
    client_id: ClientId,
) {
    let mut splitter = FrameSplitter::new();
    let mut buf = vec![0u8; READ_BUFFER];

    loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => {
                tracing::debug!(client_id = %client_id, "Broker closed connection");
                break;
            }
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(client_id = %client_id, error = %e, "Broker read error");
                break;
            }
        };
        splitter.push(&buf[..n]);

        loop {
            let message = match splitter.next_chunk() {
                Ok(None) => break,
                Ok(Some(StreamChunk::Heartbeat)) => Message::Text("\n".to_string()),
                Ok(Some(StreamChunk::Frame(bytes))) => match String::from_utf8(bytes) {
                    Ok(text) => Message::Text(text),
                    Err(e) => Message::Binary(e.into_bytes()),
                },
                Err(e) => {
                    tracing::warn!(client_id = %client_id, error = %e, "Dropping broker connection");
                    let frame = StompFrame::error("Broker frame rejected", e.to_string());
                    let _ = outbound.send(Message::Text(frame.encode())).await;
                    let _ = outbound.send(Message::Close(None)).await;
                    return;
                }
            };
            if outbound.send(message).await.is_err() {
                // Client writer is gone
                return;
            }
        }
    }

    let _ = outbound.send(Message::Close(None)).await;
}

async fn pump_client_to_broker(
    mut receiver: SplitStream<WebSocket>,
    mut writer: BrokerWriter,
    policy: Arc<RelayPolicy>,
    outbound: mpsc::Sender<Message>,
    client_id: ClientId,
) {
    while let Some(result) = receiver.next().await {
        let text = match result {
            Ok(Message::Text(text)) => text,
            Ok(Message::Binary(bytes)) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => {
                    tracing::warn!(client_id = %client_id, "Received non UTF-8 binary message");
                    break;
                }
            },
            // WebSocket protocol ping/pong - handled automatically by axum
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => continue,
            Ok(Message::Close(_)) => {
                tracing::debug!(client_id = %client_id, "Client sent close frame");
                break;
            }
            Err(e) => {
                tracing::debug!(client_id = %client_id, error = %e, "Receive error");
                break;
            }
        };

        match policy.inspect(&text) {
            FrameDecision::Forward(out) => {
                if let Err(e) = writer.write_all(out.as_bytes()).await {
                    tracing::warn!(client_id = %client_id, error = %e, "Broker write error");
                    break;
                }
            }
            FrameDecision::Reject(error) => {
                tracing::warn!(
                    client_id = %client_id,
                    reason = error.header("message").unwrap_or_default(),
                    "Rejected client frame"
                );
                let _ = outbound.send(Message::Text(error.encode())).await;
                let _ = outbound.send(Message::Close(None)).await;
                break;
            }
        }
    }

    let _ = writer.shutdown().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_state_has_no_connector() {
        let state = RelayState::disabled(RelayPolicy::new(None, vec!["/topic".to_string()]));
        assert!(state.connector.is_none());
        assert_eq!(state.mode, RelayMode::Disabled);
        assert_eq!(state.sessions.active(), 0);
    }

    #[test]
    fn offers_all_stomp_versions() {
        assert_eq!(STOMP_SUBPROTOCOLS[0], "v12.stomp");
        assert_eq!(STOMP_SUBPROTOCOLS.len(), 3);
    }
}
