//! Thread-local operation scopes.
//!
//! An operation scope names what the current thread is doing and carries
//! key/value pairs that every error built inside it inherits:
//!
//! ```
//! use errtrail::{new, ops, ContextMap, Value};
//!
//! let scope = ops::begin("checkout").set("Cart-Id", 42);
//! let err = new!("payment declined");
//! scope.end();
//!
//! let mut fields = ContextMap::new();
//! err.fill(&mut fields);
//! assert_eq!(fields["op"], Value::from("checkout"));
//! assert_eq!(fields["cart_id"], Value::from(42));
//! ```
//!
//! Scopes nest; inner scopes override outer ones on key collision. A scope is
//! popped by [`OpScope::end`] or when it is dropped, in any order.

use crate::context::{normalize_key, ContextSource};
use crate::types::{ContextMap, Value};
use core::cell::RefCell;
use core::marker::PhantomData;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "async-tokio")]
pub use crate::async_ext::spawn;

/// Key under which a scope records its own name.
pub const OP_KEY: &str = "op";

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

struct Scope {
    id: u64,
    values: ContextMap,
}

thread_local! {
    static SCOPES: RefCell<SmallVec<[Scope; 4]>> = RefCell::new(SmallVec::new());
}

/// Runs `f` on this thread's scope stack.
///
/// Once thread-local storage is being torn down the stack is gone: scopes
/// opened from then on are not recorded and reads see nothing.
fn with_scopes<R>(f: impl FnOnce(&mut SmallVec<[Scope; 4]>) -> R) -> Option<R> {
    match SCOPES.try_with(|scopes| f(&mut scopes.borrow_mut())) {
        Ok(result) => Some(result),
        Err(_) => {
            #[cfg(feature = "tracing")]
            tracing::trace!(target: "errtrail::ops", "operation scopes unavailable during thread teardown");
            None
        },
    }
}

/// Guard for an active operation scope.
///
/// Scopes are bound to the thread that opened them, so the guard is neither
/// `Send` nor `Sync`.
#[must_use = "the scope ends as soon as the guard is dropped"]
#[derive(Debug)]
pub struct OpScope {
    id: u64,
    _thread_bound: PhantomData<*const ()>,
}

impl OpScope {
    fn push(values: ContextMap) -> Self {
        let id = NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed);
        with_scopes(|scopes| scopes.push(Scope { id, values }));
        Self { id, _thread_bound: PhantomData }
    }

    /// Adds a key/value pair to this scope. The key is normalized.
    pub fn set(self, key: &str, value: impl Into<Value>) -> Self {
        let key = normalize_key(key);
        let value = value.into();
        with_scopes(|scopes| {
            if let Some(scope) = scopes.iter_mut().rev().find(|s| s.id == self.id) {
                scope.values.insert(key, value);
            }
        });
        self
    }

    /// Ends the scope. Equivalent to dropping the guard.
    #[inline]
    pub fn end(self) {}
}

impl Drop for OpScope {
    fn drop(&mut self) {
        let id = self.id;
        with_scopes(|scopes| {
            if let Some(pos) = scopes.iter().rposition(|s| s.id == id) {
                scopes.remove(pos);
            }
        });
    }
}

/// Opens a new scope named `name` on the current thread.
pub fn begin(name: impl Into<String>) -> OpScope {
    let mut values = ContextMap::new();
    values.insert(OP_KEY.into(), Value::Str(name.into()));
    OpScope::push(values)
}

/// Re-establishes a previously captured [`snapshot`] on the current thread,
/// typically on the far side of a thread or task spawn.
pub fn enter(snapshot: ContextMap) -> OpScope {
    OpScope::push(snapshot)
}

/// Flattened view of every active scope on this thread, outermost first.
pub fn snapshot() -> ContextMap {
    let mut merged = ContextMap::new();
    OpStack.collect(&mut merged);
    merged
}

/// [`ContextSource`] reading the current thread's operation scopes.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpStack;

impl ContextSource for OpStack {
    fn collect(&self, into: &mut ContextMap) {
        with_scopes(|scopes| {
            for scope in scopes.iter() {
                into.extend(scope.values.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        });
    }
}
