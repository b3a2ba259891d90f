//! crates/echo/src/macros.rs
//! Call-site macros over [`Echo`](crate::Echo).

/// Echoes a formatted message through a context.
///
/// The arguments are only rendered when the context is verbose.
///
/// # Example
/// ```
/// use echo::{Echo, echo};
///
/// let ctx = Echo::with_writer(Vec::<u8>::new());
/// ctx.set_verbose(true);
/// echo!(ctx, "loaded {} entries", 3);
///
/// let output = String::from_utf8(ctx.into_writer()).unwrap();
/// assert!(output.ends_with("ms] loaded 3 entries\n"));
/// ```
#[macro_export]
macro_rules! echo {
    ($echo:expr, $($arg:tt)+) => {
        $echo.echo_fmt(::std::format_args!($($arg)+))
    };
}

/// Echoes an expression's source text and value, then yields the value.
///
/// Prefix the expression with `?` to render it with `{:?}` instead of
/// `Display`.
///
/// # Example
/// ```
/// use echo::{Echo, echo_value};
///
/// let ctx = Echo::with_writer(Vec::<u8>::new());
/// ctx.set_verbose(true);
/// let width = echo_value!(ctx, 4 * 20);
/// assert_eq!(width, 80);
///
/// let output = String::from_utf8(ctx.into_writer()).unwrap();
/// assert!(output.ends_with("ms] 4 * 20 : 80\n"));
/// ```
///
/// ```
/// use echo::{Echo, echo_value};
///
/// let ctx = Echo::with_writer(Vec::<u8>::new());
/// ctx.set_verbose(true);
/// let parts = echo_value!(ctx, ?"a,b".split(',').collect::<Vec<_>>());
/// assert_eq!(parts, ["a", "b"]);
///
/// let output = String::from_utf8(ctx.into_writer()).unwrap();
/// assert!(output.ends_with(" : [\"a\", \"b\"]\n"));
/// ```
#[macro_export]
macro_rules! echo_value {
    ($echo:expr, ?$value:expr) => {
        $echo.echo_value_debug(::std::stringify!($value), $value)
    };
    ($echo:expr, $value:expr) => {
        $echo.echo_value(::std::stringify!($value), $value)
    };
}
