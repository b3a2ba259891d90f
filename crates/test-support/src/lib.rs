#![deny(unsafe_code)]

//! Shared test utilities for the bract workspace.
//!
//! The helpers cover the two things nearly every echo test needs: a writer
//! whose contents stay inspectable after it has been moved into an
//! [`Echo`](../echo/struct.Echo.html) context, and a parser that splits a
//! rendered message line into its label, elapsed time, and text.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory writer that can be cloned and inspected after being handed off.
///
/// Every clone appends to the same buffer, so a test can keep one handle and
/// move the other into the code under test.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the raw bytes written so far.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the buffer decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    /// Returns each newline-terminated line without its terminator.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Reports whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that rejects every write, used to exercise best-effort output paths.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "writer closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "writer closed"))
    }
}

/// A message line split into its parts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedLine {
    /// Label token, including an `:ABORT` suffix for abort lines.
    pub label: String,
    /// Milliseconds reported in the line.
    pub elapsed_ms: u128,
    /// Text following the closing bracket.
    pub message: String,
}

/// Parses `[<label> <N>ms] <message>`.
///
/// The label may itself contain spaces; the elapsed field is the last
/// space-separated token inside the brackets. Returns `None` for lines that do
/// not follow the format.
#[must_use]
pub fn parse_message_line(line: &str) -> Option<ParsedLine> {
    let rest = line.strip_prefix('[')?;
    let (header, message) = rest.split_once("ms] ")?;
    let (label, elapsed) = header.rsplit_once(' ')?;
    let elapsed_ms = elapsed.parse().ok()?;

    Some(ParsedLine {
        label: label.to_owned(),
        elapsed_ms,
        message: message.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_buffer() {
        let buffer = SharedBuffer::new();
        let mut writer = buffer.clone();
        writer.write_all(b"one\ntwo\n").expect("write succeeds");

        assert_eq!(buffer.lines(), vec!["one", "two"]);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn failing_writer_rejects_writes() {
        let mut writer = FailingWriter;
        assert!(writer.write_all(b"x").is_err());
        assert!(writer.flush().is_err());
    }

    #[test]
    fn parses_message_lines() {
        let parsed = parse_message_line("[demo 12ms] hello world").expect("parses");
        assert_eq!(parsed.label, "demo");
        assert_eq!(parsed.elapsed_ms, 12);
        assert_eq!(parsed.message, "hello world");
    }

    #[test]
    fn parses_labels_containing_spaces_and_abort_suffix() {
        let parsed = parse_message_line("[my app:ABORT 0ms] fatal").expect("parses");
        assert_eq!(parsed.label, "my app:ABORT");
        assert_eq!(parsed.elapsed_ms, 0);
    }

    #[test]
    fn rejects_other_lines() {
        assert!(parse_message_line("===== [ 1] Begin: x =====").is_none());
        assert!(parse_message_line("[demo xms] hello").is_none());
    }
}
