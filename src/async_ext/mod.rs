//! Operation context for async code.
//!
//! Operation scopes live in thread-local storage, which a multi-threaded
//! executor does not carry between polls. [`OpsFutureExt::in_current_ops`]
//! captures the caller's scopes once and re-installs them around every poll
//! of the wrapped future.
//!
//! # Feature Flag
//!
//! Requires the `async` feature; [`spawn`] additionally needs `async-tokio`.
//!
//! ```toml
//! [dependencies]
//! errtrail = { version = "0.3", features = ["async-tokio"] }
//! ```

mod ops_future;
#[cfg(feature = "async-tokio")]
mod tokio_ext;

pub use ops_future::{OpContextFuture, OpsFutureExt};
#[cfg(feature = "async-tokio")]
pub use tokio_ext::spawn;
