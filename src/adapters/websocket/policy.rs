//! What the relay lets through from WebSocket clients to the broker.
//!
//! - `CONNECT` / `STOMP`: `login` and `passcode` are replaced with the
//!   relay's broker credentials, so clients never hold broker secrets.
//! - `SEND` / `SUBSCRIBE`: the destination must start with one of the
//!   configured prefixes.
//! - Everything else, heart-beats included, passes through as sent.
//!
//! One WebSocket message may batch several frames; every frame is checked.

use crate::domain::relay::RelayCredentials;
use crate::domain::stomp::StompFrame;

/// Outcome of inspecting one client message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameDecision {
    /// Send this text to the broker.
    Forward(String),

    /// Do not relay; answer the client with this `ERROR` frame.
    Reject(StompFrame),
}

#[derive(Debug, Clone)]
pub struct RelayPolicy {
    credentials: Option<RelayCredentials>,
    destination_prefixes: Vec<String>,
}

impl RelayPolicy {
    pub fn new(credentials: Option<RelayCredentials>, destination_prefixes: Vec<String>) -> Self {
        Self {
            credentials,
            destination_prefixes,
        }
    }

    /// Whether clients may send to or subscribe to `destination`.
    pub fn allows(&self, destination: &str) -> bool {
        self.destination_prefixes
            .iter()
            .any(|prefix| destination.starts_with(prefix.as_str()))
    }

    /// Decides what to do with one client message.
    ///
    /// A message may carry several NUL-terminated frames. Each one is
    /// checked and the message is forwarded only if all of them pass.
    pub fn inspect(&self, raw: &str) -> FrameDecision {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(end) = rest.find('\0') {
            let (frame, after) = rest.split_at(end + 1);
            match self.inspect_frame(frame) {
                FrameDecision::Forward(text) => out.push_str(&text),
                rejected => return rejected,
            }
            rest = after;
        }

        // Trailing EOLs are heart-beats; anything else is an unterminated frame.
        match self.inspect_frame(rest) {
            FrameDecision::Forward(text) => out.push_str(&text),
            rejected => return rejected,
        }
        FrameDecision::Forward(out)
    }

    fn inspect_frame(&self, raw: &str) -> FrameDecision {
        let mut frame = match StompFrame::parse(raw) {
            Ok(None) => return FrameDecision::Forward(raw.to_string()),
            Ok(Some(frame)) => frame,
            Err(e) => {
                return FrameDecision::Reject(StompFrame::error("Malformed frame", e.to_string()))
            }
        };

        let command = frame.command();

        if command.is_connect() {
            return match &self.credentials {
                Some(credentials) => {
                    frame.set_header("login", credentials.login());
                    frame.set_header("passcode", credentials.passcode());
                    FrameDecision::Forward(frame.encode())
                }
                None => FrameDecision::Forward(raw.to_string()),
            };
        }

        if command.targets_destination() {
            let rejection = match frame.header("destination") {
                None => Some(format!("{} frame has no destination header", command)),
                Some(destination) if !self.allows(destination) => Some(format!(
                    "Destination '{}' is not relayed to the broker",
                    destination
                )),
                Some(_) => None,
            };

            if let Some(details) = rejection {
                let mut error = StompFrame::error("Destination not allowed", details);
                if let Some(receipt) = frame.header("receipt") {
                    error.set_header("receipt-id", receipt);
                }
                return FrameDecision::Reject(error);
            }
        }

        FrameDecision::Forward(raw.to_string())
    }
}
