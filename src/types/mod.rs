//! Error values and the data they carry.
//!
//! This module provides [`Error`] together with the pieces it is built from:
//! key/value [`Value`]s, captured [`CallStack`]s, message templates and the
//! [`MultiLinePrinter`].
//!
//! # Examples
//!
//! ```
//! use errtrail::{new, ContextMap, Value};
//!
//! let err = new!("connection to {} refused", "db-primary")
//!     .op("connect")
//!     .with("attempt", 3);
//!
//! let mut fields = ContextMap::new();
//! err.fill(&mut fields);
//! assert_eq!(fields["error"], Value::from("connection to {} refused"));
//! assert_eq!(fields["error_op"], Value::from("connect"));
//! assert_eq!(fields["attempt"], Value::from(3));
//! ```
use core::fmt::{self, Display};

pub mod args;
pub mod error;
pub mod printer;
pub mod stack;
pub mod value;

pub use args::{Arg, ArgVec, BoxError};
pub use error::*;
pub use printer::{Line, MultiLinePrinter, TraceFormatConfig};
pub use stack::{CallStack, Frame};
pub use value::{ContextMap, Value};

/// Text used when a foreign error's `Display` implementation fails.
pub const UNPRINTABLE: &str = "<unprintable error>";

/// Renders `value`, substituting [`UNPRINTABLE`] when its `Display`
/// implementation reports an error instead of panicking like `to_string`.
pub(crate) fn display_safe(value: &(impl Display + ?Sized)) -> String {
    let mut out = String::new();
    if fmt::write(&mut out, format_args!("{value}")).is_err() {
        out.clear();
        out.push_str(UNPRINTABLE);
    }
    out
}

/// Result alias for fallible functions returning [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
