//! Integration tests for relaying STOMP sessions over WebSocket.
//!
//! These tests run the real router on a local port and stand in for the
//! broker with a plain `TcpListener`:
//! 1. Client frames reach the broker with the relay's credentials
//! 2. Broker frames reach the client one per WebSocket message
//! 3. Either side closing ends the session
//! 4. Refused frames and unreachable brokers are reported as `ERROR`

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use secrecy::SecretString;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use stomp_relay::adapters::app_router;
use stomp_relay::adapters::websocket::SessionTracker;
use stomp_relay::application::build_relay_state;
use stomp_relay::config::{RelayConfig, ServerConfig};
use stomp_relay::domain::stomp::{StompCommand, StompFrame};

// =============================================================================
// Test Infrastructure
// =============================================================================

const WAIT: Duration = Duration::from_secs(5);

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

struct Relay {
    addr: SocketAddr,
    sessions: Arc<SessionTracker>,
}

impl Relay {
    async fn start(endpoint: String) -> Self {
        let config = RelayConfig {
            endpoint: Some(endpoint),
            username: Some("broker-user".to_string()),
            password: Some(SecretString::new("broker-pass".to_string())),
            ..Default::default()
        };
        let state = build_relay_state(&config).unwrap();
        let sessions = Arc::clone(&state.sessions);
        let app = app_router(state, &ServerConfig::default());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, sessions }
    }

    async fn connect(&self) -> Client {
        let (client, _) = connect_async(format!("ws://{}/websocket", self.addr))
            .await
            .unwrap();
        client
    }

    async fn wait_for_sessions(&self, expected: usize) {
        timeout(WAIT, async {
            while self.sessions.active() != expected {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap_or_else(|_| panic!("expected {} active sessions", expected));
    }
}

async fn broker() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("127.0.0.1:{}", listener.local_addr().unwrap().port());
    (listener, endpoint)
}

async fn accept(listener: &TcpListener) -> TcpStream {
    let (socket, _) = timeout(WAIT, listener.accept()).await.unwrap().unwrap();
    socket
}

/// Reads one NUL-terminated frame from the broker side of the connection.
async fn read_frame(socket: &mut TcpStream) -> String {
    let mut received = Vec::new();
    let mut buf = [0u8; 1024];
    while !received.contains(&0) {
        let n = timeout(WAIT, socket.read(&mut buf)).await.unwrap().unwrap();
        assert!(n > 0, "broker connection closed before a full frame");
        received.extend_from_slice(&buf[..n]);
    }
    String::from_utf8(received).unwrap()
}

async fn read_eof(socket: &mut TcpStream) -> Vec<u8> {
    let mut rest = Vec::new();
    timeout(WAIT, socket.read_to_end(&mut rest))
        .await
        .unwrap()
        .unwrap();
    rest
}

async fn next_text(client: &mut Client) -> String {
    loop {
        let message = timeout(WAIT, client.next())
            .await
            .unwrap()
            .expect("client stream ended")
            .unwrap();
        match message {
            Message::Text(_) => return message.to_text().unwrap().to_string(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("expected a text message, got {:?}", other),
        }
    }
}

async fn expect_closed(client: &mut Client) {
    loop {
        match timeout(WAIT, client.next()).await.unwrap() {
            None | Some(Err(_)) | Some(Ok(Message::Close(_))) => return,
            Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
            Some(Ok(other)) => panic!("expected close, got {:?}", other),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn relays_frames_with_broker_credentials() {
    let (listener, endpoint) = broker().await;
    let relay = Relay::start(endpoint).await;

    let mut client = relay.connect().await;
    let mut broker = accept(&listener).await;
    relay.wait_for_sessions(1).await;

    client
        .send(Message::text(
            "CONNECT\naccept-version:1.2\nhost:/\nlogin:guest\npasscode:guest\n\n\0".to_string(),
        ))
        .await
        .unwrap();
    let connect = StompFrame::parse(&read_frame(&mut broker).await)
        .unwrap()
        .unwrap();
    assert_eq!(connect.command(), StompCommand::Connect);
    assert_eq!(connect.header("login"), Some("broker-user"));
    assert_eq!(connect.header("passcode"), Some("broker-pass"));

    // Two frames in one TCP write arrive as two WebSocket messages.
    let connected = "CONNECTED\nversion:1.2\n\n\0";
    let message = "MESSAGE\ndestination:/topic/todos\nmessage-id:1\nsubscription:0\n\nhello\0";
    broker
        .write_all(format!("{connected}{message}").as_bytes())
        .await
        .unwrap();
    assert_eq!(next_text(&mut client).await, connected);
    assert_eq!(next_text(&mut client).await, message);

    let send = "SEND\ndestination:/topic/todos\n\n{\"id\":1}\0";
    client.send(Message::text(send.to_string())).await.unwrap();
    assert_eq!(read_frame(&mut broker).await, send);

    drop(broker);
    expect_closed(&mut client).await;
    relay.wait_for_sessions(0).await;
}

#[tokio::test]
async fn client_close_ends_broker_connection() {
    let (listener, endpoint) = broker().await;
    let relay = Relay::start(endpoint).await;

    let mut client = relay.connect().await;
    let mut broker = accept(&listener).await;
    relay.wait_for_sessions(1).await;

    client.close(None).await.unwrap();
    assert!(read_eof(&mut broker).await.is_empty());
    relay.wait_for_sessions(0).await;
}

#[tokio::test]
async fn forbidden_destination_is_never_relayed() {
    let (listener, endpoint) = broker().await;
    let relay = Relay::start(endpoint).await;

    let mut client = relay.connect().await;
    let mut broker = accept(&listener).await;

    let batched = "SEND\ndestination:/topic/ok\n\nhi\0SUBSCRIBE\nid:1\ndestination:/queue/admin\n\n\0";
    client.send(Message::text(batched.to_string())).await.unwrap();

    let error = StompFrame::parse(&next_text(&mut client).await)
        .unwrap()
        .unwrap();
    assert_eq!(error.command(), StompCommand::Error);
    assert_eq!(error.header("message"), Some("Destination not allowed"));
    expect_closed(&mut client).await;

    assert!(read_eof(&mut broker).await.is_empty());
    relay.wait_for_sessions(0).await;
}

#[tokio::test]
async fn unreachable_broker_is_reported_to_client() {
    let (listener, endpoint) = broker().await;
    drop(listener);
    let relay = Relay::start(endpoint).await;

    let mut client = relay.connect().await;

    let error = StompFrame::parse(&next_text(&mut client).await)
        .unwrap()
        .unwrap();
    assert_eq!(error.command(), StompCommand::Error);
    assert_eq!(error.header("message"), Some("Broker unavailable"));
    expect_closed(&mut client).await;
    relay.wait_for_sessions(0).await;
}
