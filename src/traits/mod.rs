//! Extension traits for `Result`.
//!
//! - [`ResultExt`]: converts the error of any `Result` into an [`Error`](crate::Error)
//!   through the [bridge](crate::bridge).
//! - [`ErrorResultExt`]: annotates a `Result` that already carries an
//!   [`Error`](crate::Error).
//!
//! # Examples
//!
//! ```
//! use errtrail::traits::{ErrorResultExt, ResultExt};
//!
//! fn load() -> errtrail::Result<String> {
//!     std::fs::read_to_string("/definitely/not/here.toml")
//!         .trail_op("load config")
//!         .err_with("path", "/definitely/not/here.toml")
//! }
//!
//! let err = load().unwrap_err();
//! assert_eq!(err.op_name().as_deref(), Some("load config"));
//! assert!(err.is_caused_by::<std::io::Error>());
//! ```

pub mod result_ext;

pub use result_ext::{ErrorResultExt, ResultExt};
