//! crates/echo/src/line.rs
//! Rendering of individual echo lines.

use std::fmt;

/// One diagnostic line, rendered through its [`Display`](fmt::Display) impl.
///
/// The rendered text never contains the trailing newline; [`EchoSink`](crate::EchoSink)
/// appends it when writing.
///
/// # Examples
///
/// ```
/// use echo::EchoLine;
///
/// let rendered = EchoLine::Message {
///     label: "demo",
///     elapsed_ms: 7,
///     text: format_args!("hello {}", 42),
/// }
/// .to_string();
/// assert_eq!(rendered, "[demo 7ms] hello 42");
///
/// let line = EchoLine::Abort { label: "demo", elapsed_ms: 9, text: "fatal" };
/// assert_eq!(line.to_string(), "[demo:ABORT 9ms] fatal");
/// ```
#[derive(Clone, Copy, Debug)]
pub enum EchoLine<'a> {
    /// A verbosity-gated message: `[<label> <elapsed>ms] <text>`.
    Message {
        /// Label token prefixing the line.
        label: &'a str,
        /// Milliseconds since the owning context was created.
        elapsed_ms: u128,
        /// Message body.
        text: fmt::Arguments<'a>,
    },
    /// An unconditional abort line: `[<label>:ABORT <elapsed>ms] <text>`.
    Abort {
        /// Label token prefixing the line.
        label: &'a str,
        /// Milliseconds since the owning context was created.
        elapsed_ms: u128,
        /// Abort message.
        text: &'a str,
    },
}

impl fmt::Display for EchoLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message {
                label,
                elapsed_ms,
                text,
            } => write!(f, "[{label} {elapsed_ms}ms] {text}"),
            Self::Abort {
                label,
                elapsed_ms,
                text,
            } => write!(f, "[{label}:ABORT {elapsed_ms}ms] {text}"),
        }
    }
}

/// Which end of a section a [`SectionMarker`] announces.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SectionEdge {
    /// `===== [ n] Begin: ... =====`
    Begin,
    /// `..... [ n]   End: ... .....`
    End,
}

/// Body of a section begin or end message.
///
/// The marker is echoed as an ordinary message, so the full line carries the
/// usual `[<label> <elapsed>ms]` prefix. Indices are right-aligned to a width
/// of two.
///
/// ```
/// use echo::{SectionEdge, SectionMarker};
///
/// let begin = SectionMarker::new(SectionEdge::Begin, 3, "warm cache");
/// assert_eq!(begin.to_string(), "===== [ 3] Begin: warm cache =====");
///
/// let end = SectionMarker::new(SectionEdge::End, 12, "warm cache");
/// assert_eq!(end.to_string(), "..... [12]   End: warm cache .....");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SectionMarker<'a> {
    edge: SectionEdge,
    index: u64,
    description: &'a str,
}

impl<'a> SectionMarker<'a> {
    /// Creates a marker for `edge` of the section `index`.
    #[must_use]
    pub const fn new(edge: SectionEdge, index: u64, description: &'a str) -> Self {
        Self {
            edge,
            index,
            description,
        }
    }

    /// Returns the announced edge.
    #[must_use]
    pub const fn edge(&self) -> SectionEdge {
        self.edge
    }

    /// Returns the section index.
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.index
    }

    /// Returns the section description.
    #[must_use]
    pub const fn description(&self) -> &'a str {
        self.description
    }
}

impl fmt::Display for SectionMarker<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            edge,
            index,
            description,
        } = self;
        match edge {
            SectionEdge::Begin => write!(f, "===== [{index:>2}] Begin: {description} ====="),
            SectionEdge::End => write!(f, "..... [{index:>2}]   End: {description} ....."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_line_format() {
        let rendered = EchoLine::Message {
            label: "bract",
            elapsed_ms: 0,
            text: format_args!("{} : {}", "count", 3),
        }
        .to_string();
        assert_eq!(rendered, "[bract 0ms] count : 3");
    }

    #[test]
    fn empty_label_keeps_separator() {
        let rendered = EchoLine::Message {
            label: "",
            elapsed_ms: 15,
            text: format_args!("x"),
        }
        .to_string();
        assert_eq!(rendered, "[ 15ms] x");
    }

    #[test]
    fn abort_line_format() {
        let line = EchoLine::Abort {
            label: "svc",
            elapsed_ms: 1234,
            text: "cannot continue",
        };
        assert_eq!(line.to_string(), "[svc:ABORT 1234ms] cannot continue");
    }

    #[test]
    fn section_indices_wider_than_two_digits_are_not_truncated() {
        let marker = SectionMarker::new(SectionEdge::Begin, 123, "big");
        assert_eq!(marker.to_string(), "===== [123] Begin: big =====");
    }

    #[test]
    fn section_end_keeps_three_space_gap() {
        let marker = SectionMarker::new(SectionEdge::End, 1, "");
        assert_eq!(marker.to_string(), "..... [ 1]   End:  .....");
        assert_eq!(marker.edge(), SectionEdge::End);
        assert_eq!(marker.index(), 1);
        assert_eq!(marker.description(), "");
    }
}
