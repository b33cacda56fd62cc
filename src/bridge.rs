//! Conversion of foreign errors into [`Error`].
//!
//! A root [`Error`] that was formatted into some other error's message, or
//! stored as its `source`, is found again through the
//! [registry](crate::registry) so that context and stack recorded at the
//! root survive the trip through foreign code.
//!
//! ```
//! use std::io;
//!
//! let root = errtrail::Error::new("disk full");
//! let foreign = io::Error::other(format!("write failed: {root}"));
//!
//! let err = errtrail::wrap(foreign);
//! assert_eq!(err.message(), format!("write failed: {root}"));
//! assert_eq!(err.clean_message(), "write failed: disk full");
//! assert!(err.cause().and_then(|c| c.library()).is_some_and(|c| c.ptr_eq(&root)));
//! ```

use crate::hidden;
use crate::registry::{self, ErrorRegistry};
use crate::types::error::Cause;
use crate::types::{display_safe, BoxError, Error};
use std::error::Error as StdError;

/// Converts any error into an [`Error`].
///
/// An [`Error`] is returned unchanged. Anything else becomes a wrapping
/// error built at the caller: its message is the foreign error's text and
/// its clean message the same text with hidden markers removed. When a
/// registered root error is reachable from `error` it becomes the cause,
/// otherwise `error` itself does.
#[track_caller]
pub fn wrap<E>(error: E) -> Error
where
    E: StdError + Send + Sync + 'static,
{
    wrap_boxed(Box::new(error))
}

#[track_caller]
pub fn wrap_boxed(error: BoxError) -> Error {
    wrap_in(error, registry::global())
}

/// `None` stays `None`.
#[track_caller]
pub fn wrap_opt<E>(error: Option<E>) -> Option<Error>
where
    E: StdError + Send + Sync + 'static,
{
    match error {
        Some(error) => Some(wrap(error)),
        None => None,
    }
}

/// [`wrap_boxed`] against an explicit registry.
#[track_caller]
pub fn wrap_in(error: BoxError, registry: &dyn ErrorRegistry) -> Error {
    let error = match error.downcast::<Error>() {
        Ok(error) => return *error,
        Err(error) => error,
    };

    let message = display_safe(&*error);
    let template = hidden::clean(&message);
    let cause = match recover(&*error, registry) {
        Some(root) => Cause::Library(root),
        None => Cause::Foreign(error),
    };
    Error::build(message, template, Some(cause))
}

/// Finds the first registered root error reachable from `error`.
///
/// Each link of the `source` chain is checked twice: as a root [`Error`]
/// itself, then for identity markers in its rendered text. Only errors still
/// held by `registry` are returned.
pub fn recover(error: &(dyn StdError + 'static), registry: &dyn ErrorRegistry) -> Option<Error> {
    let mut current = Some(error);
    while let Some(link) = current {
        if let Some(root) = link.downcast_ref::<Error>().filter(|e| e.is_root()) {
            if let Some(found) = registry.lookup(root.id()) {
                return Some(found);
            }
        }

        let text = display_safe(link);
        if let Some(found) = hidden::extract_ids(&text).into_iter().find_map(|id| registry.lookup(id)) {
            return Some(found);
        }

        current = link.source();
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(target: "errtrail::bridge", error = %hidden::clean(&display_safe(error)), "no registered root");

    None
}
