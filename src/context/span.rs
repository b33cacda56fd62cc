//! Tracing span context source.

use super::ContextSource;
use crate::types::{ContextMap, Value};
use tracing::Span;

/// Contributes the name of the current `tracing` span under the `span` key.
///
/// Nothing is written when no span is entered or the span is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpanSource;

impl ContextSource for SpanSource {
    fn collect(&self, into: &mut ContextMap) {
        if let Some(metadata) = Span::current().metadata() {
            into.insert("span".into(), Value::from(metadata.name()));
        }
    }
}
