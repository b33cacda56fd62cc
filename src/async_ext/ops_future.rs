use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use pin_project_lite::pin_project;

use crate::ops;
use crate::types::ContextMap;

pin_project! {
    /// Future that polls its inner future inside a fixed operation context.
    ///
    /// Errors built while the inner future runs see the captured scopes in
    /// their context, whichever thread polls them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use errtrail::async_ext::OpsFutureExt;
    /// use errtrail::{ops, ContextMap, Value};
    ///
    /// let scope = ops::begin("sync_user");
    /// let fut = async { errtrail::Error::new("timeout") }.in_current_ops();
    /// scope.end();
    ///
    /// # let err = block_on(fut);
    /// let mut fields = ContextMap::new();
    /// err.fill(&mut fields);
    /// assert_eq!(fields["op"], Value::from("sync_user"));
    /// # fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    /// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(fut)
    /// # }
    /// ```
    #[must_use = "futures do nothing unless polled"]
    pub struct OpContextFuture<Fut> {
        #[pin]
        inner: Fut,
        snapshot: ContextMap,
    }
}

impl<Fut> OpContextFuture<Fut> {
    #[inline]
    pub fn new(inner: Fut, snapshot: ContextMap) -> Self {
        Self { inner, snapshot }
    }

    /// The operation context installed around each poll.
    #[inline]
    pub fn snapshot(&self) -> &ContextMap {
        &self.snapshot
    }
}

impl<Fut: Future> Future for OpContextFuture<Fut> {
    type Output = Fut::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _scope = ops::enter(this.snapshot.clone());
        this.inner.poll(cx)
    }
}

/// Attaches the current operation context to a future.
pub trait OpsFutureExt: Future + Sized {
    /// Captures [`ops::snapshot`] now and installs it around every poll.
    #[inline]
    fn in_current_ops(self) -> OpContextFuture<Self> {
        OpContextFuture::new(self, ops::snapshot())
    }

    /// Installs `snapshot` around every poll.
    #[inline]
    fn in_ops(self, snapshot: ContextMap) -> OpContextFuture<Self> {
        OpContextFuture::new(self, snapshot)
    }
}

impl<F: Future> OpsFutureExt for F {}
