//! `Result` adapters built on [`wrap`](crate::wrap).

use crate::types::{Error, Value};
use std::error::Error as StdError;

/// Converts the error side of a `Result` into an [`Error`].
///
/// `Ok` values pass through untouched. The new error layer records the
/// caller's location.
///
/// # Examples
///
/// ```
/// use errtrail::traits::ResultExt;
///
/// let ok: Result<u8, std::io::Error> = Ok(1);
/// assert_eq!(ok.trail().unwrap(), 1);
///
/// let err: Result<u8, std::io::Error> = Err(std::io::Error::other("boom"));
/// let err = err.trail_op("read").unwrap_err();
/// assert_eq!(err.message(), "boom");
/// assert_eq!(err.op_name().as_deref(), Some("read"));
/// ```
pub trait ResultExt<T, E> {
    /// Wraps the error with [`wrap`](crate::wrap).
    fn trail(self) -> Result<T, Error>;

    /// Wraps the error and sets its operation name.
    ///
    /// An [`Error`] that passes through unchanged gets its operation name
    /// replaced.
    fn trail_op(self, name: &str) -> Result<T, Error>;

    /// Like [`trail_op`](Self::trail_op), computing the name only on error.
    fn trail_op_with<F>(self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T, E> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    #[inline]
    #[track_caller]
    fn trail(self) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(crate::bridge::wrap(error)),
        }
    }

    #[inline]
    #[track_caller]
    fn trail_op(self, name: &str) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(crate::bridge::wrap(error).op(name)),
        }
    }

    #[inline]
    #[track_caller]
    fn trail_op_with<F>(self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> String,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(crate::bridge::wrap(error).op(f())),
        }
    }
}

/// Annotates an [`Error`] carried by a `Result` without adding a layer.
pub trait ErrorResultExt<T> {
    /// See [`Error::op`].
    fn err_op(self, name: &str) -> Self;

    /// See [`Error::with`].
    fn err_with(self, key: &str, value: impl Into<Value>) -> Self;
}

impl<T> ErrorResultExt<T> for Result<T, Error> {
    #[inline]
    fn err_op(self, name: &str) -> Self {
        self.map_err(|e| e.op(name))
    }

    #[inline]
    fn err_with(self, key: &str, value: impl Into<Value>) -> Self {
        self.map_err(|e| e.with(key, value))
    }
}
