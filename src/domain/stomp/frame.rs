//! STOMP frame parsing and encoding.
//!
//! ```text
//! COMMAND\n
//! header1:value1\n
//! header2:value2\n
//! \n
//! body^@
//! ```
//!
//! A WebSocket message carries one frame, or a bare EOL as a heart-beat.

use super::command::StompCommand;
use super::errors::FrameError;

/// A single STOMP frame.
///
/// Header order is preserved. Repeated headers are kept as sent; lookups
/// return the first occurrence, which is the one STOMP 1.2 says wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StompFrame {
    command: StompCommand,
    headers: Vec<(String, String)>,
    body: String,
}

impl StompFrame {
    pub fn new(command: StompCommand) -> Self {
        Self {
            command,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Builds an `ERROR` frame with a short `message` header and a body.
    pub fn error(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(StompCommand::Error)
            .with_header("message", message)
            .with_header("content-type", "text/plain")
            .with_body(details)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn command(&self) -> StompCommand {
        self.command
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// First value of the named header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces every occurrence of `name` with a single header holding
    /// `value`, keeping the position of the first occurrence.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.headers.iter().position(|(k, _)| k == name) {
            Some(first) => {
                self.headers[first].1 = value;
                let mut index = 0;
                self.headers.retain(|(k, _)| {
                    let keep = index <= first || k != name;
                    index += 1;
                    keep
                });
            }
            None => self.headers.push((name.to_string(), value)),
        }
    }

    /// Parses one frame.
    ///
    /// Returns `Ok(None)` for a heart-beat (only EOLs).
    pub fn parse(text: &str) -> Result<Option<Self>, FrameError> {
        let text = text.trim_start_matches(['\r', '\n']);
        if text.is_empty() {
            return Ok(None);
        }

        let content = text
            .trim_end_matches(['\r', '\n'])
            .strip_suffix('\0')
            .ok_or(FrameError::Unterminated)?;

        let (command_line, mut rest) = content
            .split_once('\n')
            .ok_or(FrameError::MissingBlankLine)?;
        let command_line = strip_cr(command_line);
        if command_line.is_empty() {
            return Err(FrameError::MissingCommand);
        }
        let command: StompCommand = command_line.parse()?;

        let mut headers = Vec::new();
        loop {
            let (line, after) = rest.split_once('\n').ok_or(FrameError::MissingBlankLine)?;
            rest = after;
            let line = strip_cr(line);
            if line.is_empty() {
                break;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| FrameError::MalformedHeader(line.to_string()))?;
            if command.escapes_headers() {
                headers.push((unescape(name)?, unescape(value)?));
            } else {
                headers.push((name.to_string(), value.to_string()));
            }
        }

        Ok(Some(Self {
            command,
            headers,
            body: rest.to_string(),
        }))
    }

    /// Encodes the frame, NUL terminator included.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(64 + self.body.len());
        out.push_str(self.command.as_str());
        out.push('\n');
        for (name, value) in &self.headers {
            if self.command.escapes_headers() {
                out.push_str(&escape(name));
                out.push(':');
                out.push_str(&escape(value));
            } else {
                out.push_str(name);
                out.push(':');
                out.push_str(value);
            }
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push('\0');
        out
    }
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ':' => out.push_str("\\c"),
            other => out.push(other),
        }
    }
    out
}

fn unescape(value: &str) -> Result<String, FrameError> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('c') => out.push(':'),
            _ => return Err(FrameError::InvalidEscape(value.to_string())),
        }
    }
    Ok(out)
}
