use core::future::Future;

use tokio::task::JoinHandle;

use super::OpsFutureExt;

/// Spawns `future` on the current Tokio runtime with the caller's operation
/// context.
///
/// # Panics
///
/// Panics when called outside a Tokio runtime, like [`tokio::spawn`].
#[track_caller]
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(future.in_current_ops())
}
