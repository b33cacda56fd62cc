//! Multi-line rendering of a causal chain.
//!
//! [`MultiLinePrinter`] walks the chain lazily and produces one [`Line`] per
//! step:
//!
//! ```text
//! Hello World
//!   at app::handler (handler.rs:12)
//!   at app::main (main.rs:3)
//! Caused by: World
//!   at app::load (load.rs:40)
//! Caused by: connection reset
//! ```
//!
//! Library errors contribute their message and frames; foreign errors
//! contribute their message only.

use super::display_safe;
use crate::types::stack::Frame;
use crate::types::Error;
use core::fmt::{self, Display, Write};
use core::iter::{FusedIterator, Peekable, Take};
use core::slice;
use std::borrow::Cow;
use std::error::Error as StdError;

/// Prefixes and limits used when rendering [`Line`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFormatConfig {
    pub frame_prefix: String,
    pub cause_prefix: String,
    /// Frames shown per error; `None` shows all of them.
    pub max_frames: Option<usize>,
}

impl Default for TraceFormatConfig {
    fn default() -> Self {
        Self { frame_prefix: "  at ".into(), cause_prefix: "Caused by: ".into(), max_frames: None }
    }
}

impl TraceFormatConfig {
    /// Messages only, no frames.
    #[inline]
    pub fn compact() -> Self {
        Self { max_frames: Some(0), ..Default::default() }
    }

    #[inline]
    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = Some(max_frames);
        self
    }
}

/// One unit of multi-line output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Message of the top error.
    Message(Cow<'a, str>),
    /// A stack frame of the error rendered just before it.
    Frame(&'a Frame),
    /// Message of a cause.
    Cause(Cow<'a, str>),
}

impl Line<'_> {
    pub fn render<W: Write + ?Sized>(&self, config: &TraceFormatConfig, sink: &mut W) -> fmt::Result {
        match self {
            Self::Message(message) => sink.write_str(message),
            Self::Frame(frame) => write!(sink, "{}{frame}", config.frame_prefix),
            Self::Cause(message) => write!(sink, "{}{message}", config.cause_prefix),
        }
    }
}

impl Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(&TraceFormatConfig::default(), f)
    }
}

struct Lines<'a> {
    current: Option<&'a (dyn StdError + 'static)>,
    frames: Take<slice::Iter<'a, Frame>>,
    header_pending: bool,
    at_top: bool,
    max_frames: usize,
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        loop {
            let link = self.current?;

            if self.header_pending {
                self.header_pending = false;
                let (message, frames): (Cow<'a, str>, &'a [Frame]) = match link.downcast_ref::<Error>() {
                    Some(error) if self.max_frames == 0 => (Cow::Borrowed(error.message()), Default::default()),
                    Some(error) => (Cow::Borrowed(error.message()), error.stack().frames()),
                    None => (Cow::Owned(display_safe(link)), Default::default()),
                };
                self.frames = frames.iter().take(self.max_frames);

                let line = if self.at_top { Line::Message(message) } else { Line::Cause(message) };
                self.at_top = false;
                return Some(line);
            }

            if let Some(frame) = self.frames.next() {
                return Some(Line::Frame(frame));
            }

            self.current = link.source();
            self.header_pending = true;
        }
    }
}

/// Resumable renderer over an error's causal chain.
///
/// Either iterate it for [`Line`]s or call [`print`](Self::print) repeatedly;
/// each call renders one line and reports whether more remain. The sequence
/// is finite and cannot be restarted. Chains of any depth are handled
/// iteratively, and a foreign error whose `Display` fails is rendered as
/// [`UNPRINTABLE`](crate::types::UNPRINTABLE).
///
/// # Examples
///
/// ```
/// use errtrail::new;
///
/// let err = new!("outer: {}", std::io::Error::other("inner"));
/// let mut printer = err.multi_line_printer();
/// let mut out = String::new();
/// while printer.print(&mut out).unwrap() {
///     out.push('\n');
/// }
/// assert!(out.starts_with("outer: inner\n  at "));
/// assert!(out.ends_with("Caused by: inner"));
/// ```
pub struct MultiLinePrinter<'a> {
    lines: Peekable<Lines<'a>>,
    config: TraceFormatConfig,
}

impl<'a> MultiLinePrinter<'a> {
    #[inline]
    pub fn new(error: &'a Error) -> Self {
        Self::with_config(error, TraceFormatConfig::default())
    }

    pub fn with_config(error: &'a Error, config: TraceFormatConfig) -> Self {
        let lines = Lines {
            current: Some(error),
            frames: <&[Frame]>::default().iter().take(0),
            header_pending: true,
            at_top: true,
            max_frames: config.max_frames.unwrap_or(usize::MAX),
        };
        Self { lines: lines.peekable(), config }
    }

    /// Renders the next line into `sink`, without a trailing newline.
    ///
    /// Returns `Ok(true)` when more lines remain and `Ok(false)` once the
    /// last line has been written (or nothing was left to write).
    pub fn print<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<bool, fmt::Error> {
        let Some(line) = self.lines.next() else {
            return Ok(false);
        };
        line.render(&self.config, sink)?;
        Ok(self.lines.peek().is_some())
    }

    /// Renders every remaining line, separated by newlines.
    pub fn write_all<W: Write + ?Sized>(mut self, sink: &mut W) -> fmt::Result {
        let mut first = true;
        for line in self.lines.by_ref() {
            if !first {
                sink.write_char('\n')?;
            }
            first = false;
            line.render(&self.config, sink)?;
        }
        Ok(())
    }
}

impl<'a> Iterator for MultiLinePrinter<'a> {
    type Item = Line<'a>;

    #[inline]
    fn next(&mut self) -> Option<Line<'a>> {
        self.lines.next()
    }
}

impl FusedIterator for MultiLinePrinter<'_> {}
