//! crates/echo/src/sink.rs
//! Writer wrapper that renders [`EchoLine`] values one line at a time.

use std::fmt::{self, Write as _};
use std::io::{self, Write};

use crate::line::EchoLine;

/// Streaming sink that renders [`EchoLine`] values into an [`io::Write`] target.
///
/// The sink owns the writer together with a reusable scratch buffer. Each
/// line is rendered into the scratch buffer first and handed to the writer in
/// a single [`write_all`](io::Write::write_all) call followed by a flush, so a
/// line reaches unbuffered targets such as stderr in one piece.
///
/// # Examples
///
/// ```
/// use echo::{EchoLine, EchoSink};
///
/// let mut sink = EchoSink::new(Vec::<u8>::new());
/// sink.write_line(&EchoLine::Abort { label: "demo", elapsed_ms: 3, text: "stop" })?;
///
/// assert_eq!(sink.into_inner(), b"[demo:ABORT 3ms] stop\n".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct EchoSink<W> {
    writer: W,
    scratch: String,
}

impl<W> EchoSink<W> {
    /// Creates a sink around `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            scratch: String::new(),
        }
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Mutably borrows the underlying writer.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> EchoSink<W>
where
    W: Write,
{
    /// Renders `line`, appends a newline, writes it, and flushes.
    pub fn write_line(&mut self, line: &EchoLine<'_>) -> io::Result<()> {
        self.scratch.clear();
        writeln!(self.scratch, "{line}").map_err(|fmt::Error| {
            io::Error::other("formatting an echo line failed")
        })?;
        self.writer.write_all(self.scratch.as_bytes())?;
        self.writer.flush()
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W> fmt::Debug for EchoSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EchoSink")
            .field("writer", &self.writer)
            .finish_non_exhaustive()
    }
}
