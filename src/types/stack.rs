//! Call stacks captured at error construction.
//!
//! Capturing only records instruction pointers; symbol names, files and lines
//! are resolved the first time [`CallStack::frames`] is called and cached
//! afterwards. Frames belonging to this crate (and to the unwinder) are cut
//! off so the first frame is always the code that constructed the error.

use backtrace::Backtrace;
use core::fmt;
use core::panic::Location;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One resolved stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Frame {
    function: Option<String>,
    file: Option<String>,
    line: Option<u32>,
}

impl Frame {
    pub fn new(function: Option<String>, file: Option<String>, line: Option<u32>) -> Self {
        Self { function, file, line }
    }

    pub(crate) fn from_location(location: &Location<'_>) -> Self {
        Self { function: None, file: Some(location.file().to_owned()), line: Some(location.line()) }
    }

    /// Demangled function path without the trailing hash.
    #[inline]
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    #[inline]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Last path component of [`file`](Self::file).
    pub fn file_name(&self) -> Option<&str> {
        let file = self.file.as_deref()?;
        Some(Path::new(file).file_name().and_then(|n| n.to_str()).unwrap_or(file))
    }

    #[inline]
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    fn is_at(&self, location: &Location<'_>) -> bool {
        self.line == Some(location.line()) && self.is_in(location.file())
    }

    fn is_in(&self, file: &str) -> bool {
        self.file.as_deref().is_some_and(|f| Path::new(f).ends_with(file))
    }
}

impl fmt::Display for Frame {
    /// `function (file.rs:line)`, the layout used by the multi-line printer.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function().unwrap_or("<unknown>"))?;
        match (self.file_name(), self.line) {
            (Some(file), Some(line)) => write!(f, " ({file}:{line})"),
            (Some(file), None) => write!(f, " ({file})"),
            _ => Ok(()),
        }
    }
}

/// Lazily symbolized call stack, most recent call first.
pub struct CallStack {
    caller: &'static Location<'static>,
    raw: Mutex<Option<Backtrace>>,
    frames: OnceLock<Vec<Frame>>,
}

impl CallStack {
    /// Records the current stack. The caller of the outermost
    /// `#[track_caller]` function becomes the first frame.
    #[track_caller]
    pub fn capture() -> Self {
        Self {
            caller: Location::caller(),
            raw: Mutex::new(Some(Backtrace::new_unresolved())),
            frames: OnceLock::new(),
        }
    }

    /// Source location of the construction site; available without symbolizing.
    #[inline]
    pub fn location(&self) -> &'static Location<'static> {
        self.caller
    }

    pub fn frames(&self) -> &[Frame] {
        self.frames.get_or_init(|| {
            let raw = self.raw.lock().take();
            let resolved = match raw {
                Some(mut backtrace) => {
                    backtrace.resolve();
                    symbolize(&backtrace)
                },
                None => Vec::new(),
            };
            trim_to_caller(resolved, self.caller)
        })
    }

    /// The construction-site frame.
    pub fn first(&self) -> Frame {
        self.frames().first().cloned().unwrap_or_else(|| Frame::from_location(self.caller))
    }
}

impl fmt::Debug for CallStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("CallStack");
        s.field("caller", &self.caller);
        if let Some(frames) = self.frames.get() {
            s.field("frames", frames);
        }
        s.finish()
    }
}

fn symbolize(backtrace: &Backtrace) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(backtrace.frames().len());
    for frame in backtrace.frames() {
        for symbol in frame.symbols() {
            frames.push(Frame {
                function: symbol.name().map(|name| format!("{name:#}")),
                file: symbol.filename().map(|path| path.display().to_string()),
                line: symbol.lineno(),
            });
        }
    }
    frames
}

/// Drops every frame above the construction site.
///
/// Prefers an exact file and line match; falls back to the first frame in the
/// same file, and finally to a single frame built from the location itself
/// when no debug info is available.
pub(crate) fn trim_to_caller(mut frames: Vec<Frame>, caller: &Location<'_>) -> Vec<Frame> {
    let start = frames
        .iter()
        .position(|f| f.is_at(caller))
        .or_else(|| frames.iter().position(|f| f.is_in(caller.file())));

    match start {
        Some(start) => {
            frames.drain(..start);
            frames
        },
        None => vec![Frame::from_location(caller)],
    }
}
