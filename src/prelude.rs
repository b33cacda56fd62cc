//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use errtrail::prelude::*;
//!
//! fn read(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).trail_op("read")
//! }
//!
//! let err = read("/no/such/path").unwrap_err();
//! assert_eq!(err.op_name().as_deref(), Some("read"));
//! ```

// Macros
pub use crate::new;

// Core types
pub use crate::types::{ContextMap, Error, Result, Value};

// Free functions
pub use crate::bridge::{wrap, wrap_opt};
pub use crate::hidden::hide;

// Traits
pub use crate::traits::{ErrorResultExt, ResultExt};

#[cfg(feature = "async")]
pub use crate::async_ext::OpsFutureExt;
