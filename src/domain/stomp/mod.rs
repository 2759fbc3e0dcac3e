//! STOMP wire format.
//!
//! Only what the relay needs to inspect and rewrite client frames and to
//! cut the broker's byte stream into frames. Everything else is passed
//! through untouched.

mod command;
mod errors;
mod frame;
mod splitter;

pub use command::StompCommand;
pub use errors::FrameError;
pub use frame::StompFrame;
pub use splitter::{FrameSplitter, StreamChunk, MAX_FRAME_BYTES};
