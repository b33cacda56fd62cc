//! Structured errors that remember where they came from.
//!
//! An [`Error`] carries a message and the template it was built from, a
//! snapshot of the ambient context, explicit key/value data, the call stack
//! of its construction site and an optional cause. Errors compose through
//! [`new!`] and [`wrap`], flatten into a [`ContextMap`] for structured
//! logging with [`Error::fill`], and render a multi-line trace with `{:#}` or
//! a [`MultiLinePrinter`].
//!
//! Root errors are recorded in a bounded [registry], so one that was turned
//! into text by foreign code can be recovered when the foreign error is
//! wrapped again.
//!
//! # Examples
//!
//! ## Building and wrapping
//!
//! ```
//! use errtrail::new;
//! use std::error::Error as _;
//!
//! let root = new!("user {} not found", 42).with("table", "users");
//! let err = new!("load profile: {}", root.clone()).op("profile");
//!
//! // A root error's text carries an invisible identity marker.
//! assert_eq!(errtrail::hidden::clean(err.message()), "load profile: user 42 not found");
//! assert_eq!(err.clean_message(), "load profile: {}");
//! assert!(err.source().is_some());
//! assert!(root.source().is_none());
//! ```
//!
//! ## Structured fields
//!
//! ```
//! use errtrail::{new, ops, ContextMap, Value};
//!
//! let _scope = ops::begin("import").set("batch", 7);
//! let err = new!("row {} rejected", 3).with("column", "email");
//!
//! let mut fields = ContextMap::new();
//! err.fill(&mut fields);
//! assert_eq!(fields["op"], Value::from("import"));
//! assert_eq!(fields["batch"], Value::from(7));
//! assert_eq!(fields["column"], Value::from("email"));
//! assert_eq!(fields["error"], Value::from("row {} rejected"));
//! ```
//!
//! ## Foreign errors
//!
//! ```
//! use errtrail::traits::ResultExt;
//! use std::io;
//!
//! fn open() -> errtrail::Result<std::fs::File> {
//!     std::fs::File::open("/no/such/file").trail_op("open")
//! }
//!
//! let err = open().unwrap_err();
//! assert!(err.is_caused_by::<io::Error>());
//! assert!(format!("{err:#}").contains("\n  at "));
//! ```

/// Ambient key/value context captured at construction
pub mod context;
/// Invisible markers for sensitive values and error identities
pub mod hidden;
/// Thread-local operation scopes
pub mod ops;
/// Bounded history of root errors
pub mod registry;
/// Conversion of foreign errors
pub mod bridge;
/// The `new!` constructor
pub mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Extension traits for `Result`
pub mod traits;
/// The error type and its building blocks
pub mod types;

/// Context-preserving futures (requires `async` feature)
#[cfg(feature = "async")]
pub mod async_ext;

pub use bridge::{wrap, wrap_boxed, wrap_opt};
pub use types::{
    CallStack, Chain, ContextMap, Error, Frame, Kind, Line, Link, MultiLinePrinter, Result,
    TraceFormatConfig, Value,
};
