//! crates/echo/src/global.rs
//! Opt-in process-wide echo context.

use std::sync::OnceLock;

use crate::context::Echo;

static GLOBAL: OnceLock<Echo> = OnceLock::new();

/// Returns the process-wide context writing to stderr.
///
/// The context is created on first use, quiet and labelled
/// [`DEFAULT_LABEL`](crate::DEFAULT_LABEL); its clock starts then. Call this
/// early in `main` when elapsed times should be measured from program start.
///
/// ```
/// let echo = echo::global();
/// assert!(std::ptr::eq(echo, echo::global()));
/// ```
pub fn global() -> &'static Echo {
    GLOBAL.get_or_init(Echo::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_is_a_single_instance() {
        let first = global();
        let second = global();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn global_sections_share_one_counter() {
        let a = global().section("a").index();
        let b = global().section("b").index();
        assert!(b > a);
    }
}
