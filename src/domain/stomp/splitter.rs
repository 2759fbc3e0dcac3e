//! Splits the broker's byte stream into whole frames.

use super::errors::FrameError;

/// Largest frame accepted from the broker.
pub const MAX_FRAME_BYTES: usize = 1024 * 1024;

/// One unit read off the broker stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamChunk {
    /// A bare EOL sent as a heart-beat.
    Heartbeat,
    /// A complete frame, NUL terminator included.
    Frame(Vec<u8>),
}

/// Buffers TCP reads and hands out complete frames.
///
/// Frames are delimited by their NUL terminator; bodies containing NUL
/// octets (binary payloads with `content-length`) are not supported.
#[derive(Debug)]
pub struct FrameSplitter {
    buffer: Vec<u8>,
    max_frame_bytes: usize,
}

impl FrameSplitter {
    pub fn new() -> Self {
        Self::with_limit(MAX_FRAME_BYTES)
    }

    pub fn with_limit(max_frame_bytes: usize) -> Self {
        Self {
            buffer: Vec::new(),
            max_frame_bytes,
        }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Takes the next complete chunk off the buffer, if there is one.
    pub fn next_chunk(&mut self) -> Result<Option<StreamChunk>, FrameError> {
        match self.buffer.first() {
            None => return Ok(None),
            Some(b'\n') => {
                self.buffer.drain(..1);
                return Ok(Some(StreamChunk::Heartbeat));
            }
            Some(b'\r') if self.buffer.get(1) == Some(&b'\n') => {
                self.buffer.drain(..2);
                return Ok(Some(StreamChunk::Heartbeat));
            }
            Some(_) => {}
        }

        match self.buffer.iter().position(|&b| b == 0) {
            Some(end) if end < self.max_frame_bytes => {
                Ok(Some(StreamChunk::Frame(self.buffer.drain(..=end).collect())))
            }
            Some(_) => Err(FrameError::TooLarge {
                limit: self.max_frame_bytes,
            }),
            None if self.buffer.len() >= self.max_frame_bytes => Err(FrameError::TooLarge {
                limit: self.max_frame_bytes,
            }),
            None => Ok(None),
        }
    }

    /// Bytes held that do not yet form a complete chunk.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for FrameSplitter {
    fn default() -> Self {
        Self::new()
    }
}
