//! crates/echo/src/context.rs
//! The echo context: verbosity flag, label token, clock, section counter, sink.

use std::fmt::{self, Debug, Display};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

use crate::abort::Abort;
use crate::config::EchoConfig;
use crate::line::EchoLine;
use crate::section::{Section, SectionGuard};
use crate::sink::EchoSink;

/// Verbosity-gated diagnostic printer.
///
/// The context captures its start instant at construction; every line reports
/// milliseconds elapsed since then. Verbosity and label may be changed from
/// any thread through a shared reference and take effect for the next call.
///
/// `Echo<W>` is `Send + Sync` whenever `W: Send`, so a single context can be
/// shared through an [`Arc`] across worker threads.
///
/// # Examples
///
/// ```
/// use echo::Echo;
///
/// let echo = Echo::with_writer(Vec::<u8>::new());
/// echo.set_label("demo");
///
/// echo.echo("not written");
/// echo.set_verbose(true);
/// echo.echo("written");
///
/// let output = String::from_utf8(echo.into_writer()).unwrap();
/// assert_eq!(output.lines().count(), 1);
/// assert!(output.starts_with("[demo "));
/// assert!(output.ends_with("ms] written\n"));
/// ```
pub struct Echo<W = io::Stderr> {
    start: Instant,
    verbose: AtomicBool,
    label: RwLock<Arc<str>>,
    sections: AtomicU64,
    failed_writes: AtomicU64,
    sink: Mutex<EchoSink<W>>,
}

impl Echo<io::Stderr> {
    /// Creates a quiet context writing to stderr with the default label.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }

    /// Creates a context writing to stderr configured from `config`.
    #[must_use]
    pub fn from_config(config: &EchoConfig) -> Self {
        Self::with_config(io::stderr(), config)
    }
}

impl Default for Echo<io::Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Echo<W> {
    /// Creates a quiet context writing to `writer` with the default label.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self::with_config(writer, &EchoConfig::default())
    }

    /// Creates a context writing to `writer` configured from `config`.
    #[must_use]
    pub fn with_config(writer: W, config: &EchoConfig) -> Self {
        Self {
            start: Instant::now(),
            verbose: AtomicBool::new(config.verbose),
            label: RwLock::new(Arc::from(config.label.as_str())),
            sections: AtomicU64::new(0),
            failed_writes: AtomicU64::new(0),
            sink: Mutex::new(EchoSink::new(writer)),
        }
    }

    /// Reports whether gated messages are currently written.
    pub fn is_verbose(&self) -> bool {
        self.verbose.load(Ordering::Acquire)
    }

    /// Enables or disables gated messages for all subsequent calls.
    pub fn set_verbose(&self, verbose: bool) {
        self.verbose.store(verbose, Ordering::Release);
    }

    /// Returns the current label token.
    pub fn label(&self) -> Arc<str> {
        Arc::clone(&self.label.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replaces the label token. Any string is accepted, including `""`.
    pub fn set_label(&self, label: impl Into<Arc<str>>) {
        let label = label.into();
        *self.label.write().unwrap_or_else(PoisonError::into_inner) = label;
    }

    /// Returns a snapshot of the verbosity flag and label.
    pub fn config(&self) -> EchoConfig {
        EchoConfig {
            verbose: self.is_verbose(),
            label: self.label().to_string(),
        }
    }

    /// Applies the verbosity flag and label from `config`.
    pub fn apply(&self, config: &EchoConfig) {
        self.set_label(config.label.as_str());
        self.set_verbose(config.verbose);
    }

    /// Returns the instant elapsed times are measured from.
    pub const fn start(&self) -> Instant {
        self.start
    }

    /// Milliseconds elapsed since the context was created.
    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }

    /// Number of lines that could not be written.
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    /// Allocates the next section index and binds it to `description`.
    ///
    /// Nothing is written until [`Section::echo_begin`] or
    /// [`Section::echo_end`] is called.
    pub fn section(&self, description: impl Into<String>) -> Section<'_, W> {
        Section::new(self, self.next_section_index(), description.into())
    }

    /// Consumes the context and returns the writer.
    pub fn into_writer(self) -> W {
        self.sink
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_inner()
    }

    fn next_section_index(&self) -> u64 {
        self.sections.fetch_add(1, Ordering::AcqRel) + 1
    }
}

impl<W> Echo<W>
where
    W: Write,
{
    /// Writes `[<label> <elapsed>ms] <message>` when verbose.
    pub fn echo(&self, message: &str) {
        self.echo_fmt(format_args!("{message}"));
    }

    /// Writes `message` when verbose, rendering the arguments only then.
    ///
    /// This backs the [`echo!`](crate::echo!) macro.
    pub fn echo_fmt(&self, message: fmt::Arguments<'_>) {
        if !self.is_verbose() {
            return;
        }

        let label = self.label();
        self.emit(&EchoLine::Message {
            label: &label,
            elapsed_ms: self.elapsed_ms(),
            text: message,
        });
    }

    /// Writes `<message> : <value>` when verbose and returns `value` unchanged.
    ///
    /// ```
    /// use echo::Echo;
    ///
    /// let echo = Echo::with_writer(Vec::<u8>::new());
    /// let total = echo.echo_value("total", 2 + 3) * 2;
    /// assert_eq!(total, 10);
    /// ```
    pub fn echo_value<T>(&self, message: &str, value: T) -> T
    where
        T: Display,
    {
        self.echo_fmt(format_args!("{message} : {value}"));
        value
    }

    /// Like [`echo_value`](Self::echo_value) for values without a `Display`
    /// impl; the value is rendered with `{:?}`.
    ///
    /// ```
    /// use echo::Echo;
    ///
    /// let echo = Echo::with_writer(Vec::<u8>::new());
    /// echo.set_verbose(true);
    /// let found = echo.echo_value_debug("lookup", Some(7));
    /// assert_eq!(found, Some(7));
    ///
    /// let output = String::from_utf8(echo.into_writer()).unwrap();
    /// assert!(output.ends_with("ms] lookup : Some(7)\n"));
    /// ```
    pub fn echo_value_debug<T>(&self, message: &str, value: T) -> T
    where
        T: Debug,
    {
        self.echo_fmt(format_args!("{message} : {value:?}"));
        value
    }

    /// Opens a section whose begin line is written now and end line on drop.
    pub fn scoped_section(&self, description: impl Into<String>) -> SectionGuard<'_, W> {
        self.section(description).enter()
    }

    /// Writes `[<label>:ABORT <elapsed>ms] <message>` regardless of verbosity.
    ///
    /// The process keeps running; the returned [`Abort`] carries exit status
    /// `1` for the caller to act on.
    pub fn abort(&self, message: impl Into<String>) -> Abort {
        let message = message.into();
        let label = self.label();
        self.emit(&EchoLine::Abort {
            label: &label,
            elapsed_ms: self.elapsed_ms(),
            text: &message,
        });
        Abort::new(message)
    }

    /// Like [`abort`](Self::abort) with an explicit exit status.
    pub fn abort_with_code(&self, message: impl Into<String>, exit_code: u8) -> Abort {
        self.abort(message).with_exit_code(exit_code)
    }

    /// Flushes the writer, counting a failure like a failed line.
    pub fn flush(&self) {
        let result = self
            .sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush();
        self.record(result);
    }

    fn emit(&self, line: &EchoLine<'_>) {
        let result = self
            .sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write_line(line);
        self.record(result);
    }

    fn record(&self, result: io::Result<()>) {
        if let Err(error) = result {
            self.failed_writes.fetch_add(1, Ordering::Relaxed);
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "echo::sink", %error, "failed to write echo line");
            #[cfg(not(feature = "tracing"))]
            drop(error);
        }
    }
}

impl<W> fmt::Debug for Echo<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Echo")
            .field("start", &self.start)
            .field("verbose", &self.is_verbose())
            .field("label", &self.label())
            .field("sections", &self.sections.load(Ordering::Relaxed))
            .field("failed_writes", &self.failed_writes())
            .finish_non_exhaustive()
    }
}
