//! Context snapshots captured when an error is constructed.
//!
//! Key features:
//! - [`ContextSource`] is the seam through which ambient key/value context
//!   (operation scopes, tracing spans, fixed maps) reaches an error.
//! - [`ContextMerger`] flattens an ordered list of sources into one
//!   [`ContextMap`]; sources added later win on key collision.
//! - [`capture`] takes the snapshot every constructor uses.
//!
//! Snapshots are copied by value, so an error never observes later changes
//! to the scopes that were active when it was built.
//!
//! # Examples
//!
//! ```
//! use errtrail::context::{ContextMerger, ContextSource};
//! use errtrail::{ContextMap, Value};
//!
//! let mut defaults = ContextMap::new();
//! defaults.insert("region".into(), Value::from("eu"));
//! defaults.insert("tier".into(), Value::from("free"));
//!
//! let mut overrides = ContextMap::new();
//! overrides.insert("tier".into(), Value::from("pro"));
//!
//! let merged = ContextMerger::new().source(&defaults).source(&overrides).merge();
//! assert_eq!(merged["region"], Value::from("eu"));
//! assert_eq!(merged["tier"], Value::from("pro"));
//! ```

#[cfg(feature = "tracing")]
mod span;

#[cfg(feature = "tracing")]
pub use span::SpanSource;

use crate::ops::OpStack;
use crate::types::ContextMap;
use smallvec::SmallVec;

/// Something that can contribute key/value pairs to a context snapshot.
pub trait ContextSource {
    /// Writes this source's entries into `into`, overwriting existing keys.
    fn collect(&self, into: &mut ContextMap);
}

impl ContextSource for ContextMap {
    fn collect(&self, into: &mut ContextMap) {
        into.extend(self.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

impl<S: ContextSource + ?Sized> ContextSource for &S {
    #[inline]
    fn collect(&self, into: &mut ContextMap) {
        (**self).collect(into)
    }
}

/// Ordered list of context sources, lowest precedence first.
#[derive(Default)]
pub struct ContextMerger<'a> {
    sources: SmallVec<[&'a dyn ContextSource; 4]>,
}

impl<'a> ContextMerger<'a> {
    #[inline]
    pub fn new() -> Self {
        Self { sources: SmallVec::new() }
    }

    /// Appends a source that overrides every source added before it.
    #[inline]
    pub fn source(mut self, source: &'a dyn ContextSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn merge(&self) -> ContextMap {
        let mut merged = ContextMap::new();
        for source in &self.sources {
            source.collect(&mut merged);
        }
        merged
    }
}

/// Snapshot of the ambient context on the current thread.
///
/// Operation scopes come first; with the `tracing` feature the current span's
/// name is layered on top under `span`.
pub fn capture() -> ContextMap {
    let merger = ContextMerger::new().source(&OpStack);

    #[cfg(feature = "tracing")]
    let merger = merger.source(&SpanSource);

    merger.merge()
}

/// Canonical form of a context key.
///
/// ASCII letters are lowercased and every character outside `[a-z0-9_.]` is
/// replaced with `_`.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c.to_ascii_lowercase() {
            c @ ('a'..='z' | '0'..='9' | '_' | '.') => c,
            _ => '_',
        })
        .collect()
}
