//! crates/echo/src/tracing_bridge.rs
//! Bridge between the tracing crate and echo output.
//!
//! [`EchoLayer`] is a tracing-subscriber layer that forwards the `message`
//! field of every event to [`Echo::echo`]. Forwarded events therefore obey the
//! context's verbosity flag and are rendered in the usual
//! `[<label> <elapsed>ms] <message>` format, which lets code instrumented with
//! the standard `tracing` macros share one diagnostic stream with direct echo
//! calls.
//!
//! Events whose target is `echo` or starts with `echo::` are skipped; those
//! are this crate's own reports about the sink and would otherwise loop back
//! into it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use echo::{Echo, init_tracing};
//!
//! let echo = Arc::new(Echo::new());
//! echo.set_verbose(true);
//! init_tracing(Arc::clone(&echo));
//!
//! tracing::info!("cache warmed");
//! ```

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::context::Echo;

/// A tracing layer that writes event messages through an [`Echo`] context.
pub struct EchoLayer<W> {
    echo: Arc<Echo<W>>,
}

impl<W> EchoLayer<W> {
    /// Creates a layer writing through `echo`.
    #[must_use]
    pub const fn new(echo: Arc<Echo<W>>) -> Self {
        Self { echo }
    }

    /// Returns the context events are written through.
    #[must_use]
    pub const fn echo(&self) -> &Arc<Echo<W>> {
        &self.echo
    }

    fn is_internal(target: &str) -> bool {
        target == "echo" || target.starts_with("echo::")
    }
}

impl<W> fmt::Debug for EchoLayer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EchoLayer")
            .field("echo", &self.echo)
            .finish()
    }
}

impl<S, W> Layer<S> for EchoLayer<W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: Write + Send + 'static,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if Self::is_internal(event.metadata().target()) || !self.echo.is_verbose() {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            self.echo.echo(&message);
        }
    }
}

/// Visitor to extract message from tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a global subscriber that writes events through `echo`.
///
/// # Panics
///
/// Panics if a global default subscriber has already been set.
pub fn init_tracing<W>(echo: Arc<Echo<W>>)
where
    W: Write + Send + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(EchoLayer::new(echo))
        .init();
}

/// Installs a global subscriber combining `filter` with an [`EchoLayer`].
///
/// ```rust,ignore
/// use std::sync::Arc;
///
/// use echo::{Echo, init_tracing_with_filter};
/// use tracing_subscriber::EnvFilter;
///
/// let echo = Arc::new(Echo::new());
/// init_tracing_with_filter(echo, EnvFilter::from_env("BRACT_LOG"));
/// ```
///
/// # Panics
///
/// Panics if a global default subscriber has already been set.
pub fn init_tracing_with_filter<W, F>(echo: Arc<Echo<W>>, filter: F)
where
    W: Write + Send + 'static,
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(EchoLayer::new(echo))
        .init();
}
