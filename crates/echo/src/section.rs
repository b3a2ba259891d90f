//! crates/echo/src/section.rs
//! Indexed sections with begin/end lines.

use std::fmt;
use std::io::{self, Write};

use crate::context::Echo;
use crate::line::{SectionEdge, SectionMarker};

/// A named unit of work with a context-unique index.
///
/// Sections are created by [`Echo::section`]. Begin and end lines are
/// independent: either may be written any number of times, in any order, or
/// not at all. Use [`enter`](Self::enter) or [`Echo::scoped_section`] when the
/// end line should follow the begin line structurally.
///
/// ```
/// use echo::Echo;
///
/// let echo = Echo::with_writer(Vec::<u8>::new());
/// echo.set_verbose(true);
///
/// let section = echo.section("index files");
/// section.echo_begin();
/// section.echo_end();
///
/// let output = String::from_utf8(echo.into_writer()).unwrap();
/// assert!(output.contains("===== [ 1] Begin: index files ====="));
/// assert!(output.contains("..... [ 1]   End: index files ....."));
/// ```
pub struct Section<'e, W = io::Stderr> {
    echo: &'e Echo<W>,
    index: u64,
    description: String,
}

impl<'e, W> Section<'e, W> {
    pub(crate) const fn new(echo: &'e Echo<W>, index: u64, description: String) -> Self {
        Self {
            echo,
            index,
            description,
        }
    }

    /// Returns the index allocated when the section was created.
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.index
    }

    /// Returns the description supplied when the section was created.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    fn marker(&self, edge: SectionEdge) -> SectionMarker<'_> {
        SectionMarker::new(edge, self.index, &self.description)
    }
}

impl<'e, W> Section<'e, W>
where
    W: Write,
{
    /// Echoes `===== [<index>] Begin: <description> =====`.
    pub fn echo_begin(&self) {
        self.echo
            .echo_fmt(format_args!("{}", self.marker(SectionEdge::Begin)));
    }

    /// Echoes `..... [<index>]   End: <description> .....`.
    pub fn echo_end(&self) {
        self.echo
            .echo_fmt(format_args!("{}", self.marker(SectionEdge::End)));
    }

    /// Echoes the begin line and returns a guard that echoes the end line on drop.
    pub fn enter(self) -> SectionGuard<'e, W> {
        self.echo_begin();
        SectionGuard { section: self }
    }
}

impl<W> fmt::Debug for Section<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("index", &self.index)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// RAII guard for an entered [`Section`].
///
/// Created by [`Section::enter`] or [`Echo::scoped_section`]. The begin line
/// has already been echoed; dropping the guard echoes the end line, including
/// during unwinding.
///
/// ```
/// use echo::Echo;
///
/// let echo = Echo::with_writer(Vec::<u8>::new());
/// echo.set_verbose(true);
/// {
///     let outer = echo.scoped_section("outer");
///     let _inner = echo.scoped_section("inner");
///     assert_eq!(outer.section().index(), 1);
/// }
///
/// let output = String::from_utf8(echo.into_writer()).unwrap();
/// let bodies: Vec<&str> = output
///     .lines()
///     .map(|line| line.split_once("ms] ").unwrap().1)
///     .collect();
/// assert_eq!(
///     bodies,
///     [
///         "===== [ 1] Begin: outer =====",
///         "===== [ 2] Begin: inner =====",
///         "..... [ 2]   End: inner .....",
///         "..... [ 1]   End: outer .....",
///     ]
/// );
/// ```
#[must_use = "dropping the guard immediately echoes the section end"]
pub struct SectionGuard<'e, W = io::Stderr>
where
    W: Write,
{
    section: Section<'e, W>,
}

impl<'e, W> SectionGuard<'e, W>
where
    W: Write,
{
    /// Returns the entered section.
    pub const fn section(&self) -> &Section<'e, W> {
        &self.section
    }
}

impl<W> Drop for SectionGuard<'_, W>
where
    W: Write,
{
    fn drop(&mut self) {
        self.section.echo_end();
    }
}

impl<W> fmt::Debug for SectionGuard<'_, W>
where
    W: Write,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionGuard")
            .field("section", &self.section)
            .finish()
    }
}
