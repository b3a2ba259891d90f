//! crates/echo/src/abort.rs
//! Fatal-intent signal returned by [`Echo::abort`](crate::Echo::abort).

use std::num::NonZeroU8;
use std::process::ExitCode;

use thiserror::Error;

/// Exit status carried by an [`Abort`] unless overridden.
pub const DEFAULT_ABORT_EXIT_CODE: u8 = 1;

const DEFAULT_STATUS: NonZeroU8 = NonZeroU8::MIN;

/// The host program has decided it cannot continue.
///
/// [`Echo::abort`](crate::Echo::abort) writes the abort line and returns this
/// value instead of terminating the process. Return it from `main` through
/// [`ExitCode`], propagate it with `?`, or call [`exit`](Self::exit) to
/// terminate immediately.
///
/// The exit status is never zero, so an abort cannot be mistaken for success.
///
/// ```
/// use std::process::ExitCode;
///
/// use echo::Echo;
///
/// fn run(echo: &Echo<Vec<u8>>) -> Result<(), echo::Abort> {
///     Err(echo.abort("config missing"))
/// }
///
/// let echo = Echo::with_writer(Vec::<u8>::new());
/// let abort = run(&echo).unwrap_err();
/// assert_eq!(abort.exit_code(), 1);
/// assert_eq!(abort.to_string(), "aborted: config missing");
/// assert_eq!(ExitCode::from(abort), ExitCode::from(1));
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq, Error)]
#[error("aborted: {message}")]
#[must_use]
pub struct Abort {
    message: String,
    exit_code: NonZeroU8,
}

impl Abort {
    /// Creates an abort signal with the default exit status.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: DEFAULT_STATUS,
        }
    }

    /// Replaces the exit status.
    ///
    /// `0` would report success and falls back to
    /// [`DEFAULT_ABORT_EXIT_CODE`].
    pub const fn with_exit_code(mut self, exit_code: u8) -> Self {
        self.exit_code = match NonZeroU8::new(exit_code) {
            Some(status) => status,
            None => DEFAULT_STATUS,
        };
        self
    }

    /// Returns the abort message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the process exit status this abort maps to.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.exit_code.get()
    }

    /// Terminates the process with [`exit_code`](Self::exit_code).
    ///
    /// Destructors of the current stack do not run.
    pub fn exit(self) -> ! {
        std::process::exit(i32::from(self.exit_code()))
    }
}

impl From<Abort> for ExitCode {
    fn from(abort: Abort) -> Self {
        Self::from(abort.exit_code())
    }
}
