#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `echo` prints verbosity-gated, timestamped diagnostic lines. A single
//! [`Echo`] context owns the verbosity flag, the label token that prefixes
//! every line, the start instant that elapsed times are measured from, and a
//! counter that hands out section indices.
//!
//! # Design
//!
//! The context is an explicit value rather than hidden process state. Share it
//! by reference or through an [`Arc`](std::sync::Arc); all configuration
//! lives behind atomics or locks so any thread may toggle verbosity or swap
//! the label while others are writing. Callers that want a single
//! process-wide instance opt in through [`global()`].
//!
//! Lines are rendered by [`EchoLine`] and written through an [`EchoSink`]
//! wrapping any [`io::Write`](std::io::Write) target, [`io::Stderr`](std::io::Stderr) by
//! default. Each line is written in one call and flushed while the sink lock
//! is held, so lines from concurrent callers never interleave.
//!
//! # Invariants
//!
//! - Nothing is written while the context is not verbose, except abort lines.
//! - [`Echo::echo_value`] returns its value unchanged whatever the verbosity.
//! - Section indices start at `1`, are strictly increasing, and are never
//!   reused within a context.
//! - Write failures are counted and otherwise ignored; diagnostics never fail
//!   the caller.
//!
//! # Errors
//!
//! No operation returns an error. [`Echo::abort`] returns an [`Abort`] value
//! describing fatal intent; the top-level caller decides when to exit.
//!
//! # Examples
//!
//! ```
//! use echo::Echo;
//!
//! let echo = Echo::with_writer(Vec::<u8>::new());
//! echo.echo("dropped, not verbose");
//!
//! echo.set_verbose(true);
//! echo.set_label("demo");
//! let answer = echo.echo_value("answer", 42);
//! assert_eq!(answer, 42);
//!
//! let section = echo.section("load config");
//! section.echo_begin();
//! section.echo_end();
//!
//! let output = String::from_utf8(echo.into_writer()).unwrap();
//! let lines: Vec<&str> = output.lines().collect();
//! assert_eq!(lines.len(), 3);
//! assert!(lines[0].starts_with("[demo "));
//! assert!(lines[0].ends_with("] answer : 42"));
//! assert!(lines[1].ends_with("===== [ 1] Begin: load config ====="));
//! assert!(lines[2].ends_with("..... [ 1]   End: load config ....."));
//! ```
//!
//! # See also
//!
//! - [`echo!`] and [`echo_value!`] for lazily formatted call sites.
//! - `tracing_bridge` (feature `tracing`) to route `tracing` events into echo
//!   output.

mod abort;
mod config;
mod context;
mod global;
mod line;
mod macros;
mod section;
mod sink;
#[cfg(feature = "tracing")]
pub mod tracing_bridge;

pub use abort::{Abort, DEFAULT_ABORT_EXIT_CODE};
pub use config::{DEFAULT_LABEL, EchoConfig};
pub use context::Echo;
pub use global::global;
pub use line::{EchoLine, SectionEdge, SectionMarker};
pub use section::{Section, SectionGuard};
pub use sink::EchoSink;
#[cfg(feature = "tracing")]
pub use tracing_bridge::{EchoLayer, init_tracing, init_tracing_with_filter};
