//! WebSocket adapters relaying STOMP clients to the external broker.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   WebSocket    ┌──────────────────────────────┐   TCP/TLS   ┌──────────┐
//! │ STOMP client │ ─────────────▶ │ ws_handler                   │ ──────────▶ │ ActiveMQ │
//! │ (browser)    │ ◀───────────── │  client → RelayPolicy → broker│ ◀────────── │ broker   │
//! └──────────────┘                │  broker → FrameSplitter → ws  │             └──────────┘
//!                                 └──────────────────────────────┘
//! ```
//!
//! Each client gets its own broker connection, opened through the
//! [`BrokerConnector`](crate::ports::BrokerConnector) port.
//!
//! # Components
//!
//! - [`handler`] - Axum WebSocket upgrade handler and the two frame pumps
//! - [`policy`] - Credential injection and destination filtering
//! - [`sessions`] - Client ids and the active session count

pub mod handler;
pub mod policy;
pub mod sessions;

pub use handler::{ws_handler, RelayState, STOMP_SUBPROTOCOLS};
pub use policy::{FrameDecision, RelayPolicy};
pub use sessions::{ClientId, SessionGuard, SessionTracker};
