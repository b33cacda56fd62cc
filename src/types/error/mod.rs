//! The structured error value.
//!
//! This module provides [`Error`], a cheaply clonable handle to an error that
//! carries:
//! - a substituted message and the template it came from
//! - a context snapshot taken from the active [`ContextSource`](crate::context::ContextSource)s
//! - explicit key/value data added with [`Error::with`]
//! - the call stack of its construction site
//! - optionally a cause, which is either another [`Error`] or any foreign
//!   `std::error::Error`
//!
//! An error without a cause is a *root* error and is recorded in the
//! [registry](crate::registry) so it can be recovered after passing through
//! foreign wrappers.

use crate::context::{self, normalize_key};
use crate::hidden;
use crate::registry;
use crate::types::args::{render, Arg, ArgVec, BoxError};
use crate::types::printer::MultiLinePrinter;
use crate::types::stack::CallStack;
use crate::types::{ContextMap, Value};
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::error::Error as StdError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

mod chain;
mod traits;

pub use chain::{Chain, Link};

/// Data key holding the operation name set by [`Error::op`].
pub const ERROR_OP_KEY: &str = "error_op";
/// Derived key holding [`Error::clean_message`].
pub const ERROR_KEY: &str = "error";
/// Derived key holding [`Error::message`].
pub const TEXT_KEY: &str = "error_text";
/// Derived key holding the construction-site frame.
pub const LOCATION_KEY: &str = "error_location";

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Which of the two error shapes a value has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// No cause.
    Root,
    /// Has a cause, library or foreign.
    Wrapping,
}

pub(crate) enum Cause {
    Library(Error),
    Foreign(BoxError),
}

impl Cause {
    pub(crate) fn from_boxed(error: BoxError) -> Self {
        match error.downcast::<Error>() {
            Ok(error) => Self::Library(*error),
            Err(error) => Self::Foreign(error),
        }
    }

    pub(crate) fn as_dyn(&self) -> &(dyn StdError + 'static) {
        match self {
            Self::Library(error) => error,
            Self::Foreign(error) => &**error,
        }
    }
}

struct Node {
    id: u64,
    message: String,
    template: String,
    /// Identity marker appended to the `Display` output of root errors.
    marker: Option<String>,
    context: ContextMap,
    stack: CallStack,
    cause: Option<Cause>,
    data: RwLock<ContextMap>,
}

/// Structured error with context, call stack and an optional cause.
///
/// Cloning shares the same underlying error; equality is identity.
///
/// [`op`](Self::op) and [`with`](Self::with) mutate the shared value and are
/// meant to be chained directly onto the constructor, before the error is
/// handed to anyone else.
#[derive(Clone)]
#[must_use]
pub struct Error {
    inner: Arc<Node>,
}

impl Error {
    /// Creates an error from a template without arguments.
    ///
    /// Use [`new!`](crate::new) to substitute arguments.
    #[track_caller]
    pub fn new(template: impl Into<String>) -> Self {
        Self::from_args(template, ArgVec::new())
    }

    /// Creates an error from a template and pre-classified arguments.
    ///
    /// The first [`Arg::Error`] becomes the cause and turns the result into a
    /// wrapping error; without one the result is a root error.
    #[track_caller]
    pub fn from_args(template: impl Into<String>, args: ArgVec) -> Self {
        let template = template.into();
        let message = render(&template, &args);
        let cause = args.into_iter().find_map(Arg::into_error).map(Cause::from_boxed);
        Self::build(message, template, cause)
    }

    /// Wraps a foreign error. See [`wrap`](crate::wrap).
    #[track_caller]
    pub fn wrap<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        crate::bridge::wrap(error)
    }

    #[track_caller]
    pub(crate) fn build(message: String, template: String, cause: Option<Cause>) -> Self {
        let stack = CallStack::capture();
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let marker = cause.is_none().then(|| hidden::encode_id(id));
        let error = Self {
            inner: Arc::new(Node {
                id,
                message,
                template,
                marker,
                context: context::capture(),
                stack,
                cause,
                data: RwLock::new(ContextMap::new()),
            }),
        };
        if error.is_root() {
            registry::global().claim(&error);
        }
        error
    }

    /// Sets or replaces the operation name, stored under [`ERROR_OP_KEY`].
    pub fn op(self, name: impl Into<String>) -> Self {
        self.inner.data.write().insert(ERROR_OP_KEY.into(), Value::Str(name.into()));
        self
    }

    /// Adds a key/value pair. The key is normalized; a
    /// [`Hidden`](crate::hidden::Hidden) value is kept hidden.
    pub fn with(self, key: &str, value: impl Into<Value>) -> Self {
        self.inner.data.write().insert(normalize_key(key), value.into());
        self
    }

    /// Process-wide unique sequence number.
    #[inline]
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        if self.inner.cause.is_some() {
            Kind::Wrapping
        } else {
            Kind::Root
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.kind() == Kind::Root
    }

    /// The substituted message, without the identity marker `Display` adds.
    #[inline]
    pub fn message(&self) -> &str {
        &self.inner.message
    }

    /// The template the message was built from; arguments are never
    /// interpolated, so errors of the same shape share it.
    #[inline]
    pub fn clean_message(&self) -> &str {
        &self.inner.template
    }

    pub fn op_name(&self) -> Option<String> {
        self.inner.data.read().get(ERROR_OP_KEY).and_then(Value::as_str).map(str::to_owned)
    }

    /// Copy of the explicit data.
    pub fn data(&self) -> ContextMap {
        self.inner.data.read().clone()
    }

    pub fn data_value(&self, key: &str) -> Option<Value> {
        self.inner.data.read().get(&normalize_key(key)).cloned()
    }

    /// Context snapshot taken at construction.
    #[inline]
    pub fn context(&self) -> &ContextMap {
        &self.inner.context
    }

    #[inline]
    pub fn stack(&self) -> &CallStack {
        &self.inner.stack
    }

    /// The direct cause, if any.
    #[inline]
    pub fn cause(&self) -> Option<Link<'_>> {
        self.inner.cause.as_ref().map(|c| Link::new(c.as_dyn()))
    }

    /// Whether both handles point to the same error.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Writes this error's context and data into `into`, then those of every
    /// library error further down the chain that did not already set a key.
    ///
    /// Per error, explicit data beats the derived keys ([`ERROR_KEY`],
    /// [`TEXT_KEY`], [`LOCATION_KEY`]), which beat the context snapshot.
    /// Errors closer to the top beat everything below them.
    pub fn fill(&self, into: &mut ContextMap) {
        let nodes: SmallVec<[&Error; 8]> = self.chain().filter_map(|link| link.library()).collect();
        for node in nodes.iter().rev() {
            node.fill_own(into);
        }
    }

    fn fill_own(&self, into: &mut ContextMap) {
        into.extend(self.inner.context.iter().map(|(k, v)| (k.clone(), v.clone())));
        into.insert(ERROR_KEY.into(), Value::from(self.clean_message()));
        into.insert(TEXT_KEY.into(), Value::from(self.message()));
        into.insert(LOCATION_KEY.into(), Value::Str(self.stack().first().to_string()));
        let data = self.inner.data.read();
        into.extend(data.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Walks the causal chain to its end. An error without a cause is its own
    /// root cause.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    /// Iterates the causal chain, starting with `self`.
    #[inline]
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self)
    }

    /// First link in the chain of type `T`.
    pub fn find_cause<T: StdError + 'static>(&self) -> Option<&T> {
        self.chain().find_map(|link| link.as_error().downcast_ref::<T>())
    }

    #[inline]
    pub fn is_caused_by<T: StdError + 'static>(&self) -> bool {
        self.find_cause::<T>().is_some()
    }

    /// Renders the chain one line at a time. See [`MultiLinePrinter`].
    #[inline]
    pub fn multi_line_printer(&self) -> MultiLinePrinter<'_> {
        MultiLinePrinter::new(self)
    }

    pub(crate) fn marker(&self) -> Option<&str> {
        self.inner.marker.as_deref()
    }

    /// Non-owning handle; see [`WeakError`].
    pub(crate) fn downgrade(&self) -> WeakError {
        WeakError { id: self.id(), inner: Arc::downgrade(&self.inner) }
    }
}

/// Handle that does not keep its error alive.
#[derive(Clone)]
pub(crate) struct WeakError {
    id: u64,
    inner: Weak<Node>,
}

impl WeakError {
    #[inline]
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// The error, if any owner still holds it.
    #[inline]
    pub(crate) fn upgrade(&self) -> Option<Error> {
        self.inner.upgrade().map(|inner| Error { inner })
    }
}
