//! STOMP framing errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("Frame has no command line")]
    MissingCommand,

    #[error("Unknown STOMP command: {0}")]
    UnknownCommand(String),

    #[error("Malformed header line: {0}")]
    MalformedHeader(String),

    #[error("Invalid escape sequence in header: {0}")]
    InvalidEscape(String),

    #[error("Frame headers are not terminated by a blank line")]
    MissingBlankLine,

    #[error("Frame is not terminated by a NUL octet")]
    Unterminated,

    #[error("Frame exceeds {limit} bytes")]
    TooLarge { limit: usize },
}
