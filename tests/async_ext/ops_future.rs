use errtrail::async_ext::OpsFutureExt;
use errtrail::{ops, ContextMap, Error, Value};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Yields once before finishing so the future is polled twice.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

fn block_on<F: Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(fut)
}

#[test]
fn context_is_restored_on_every_poll() {
    let fut = {
        let _scope = ops::begin("sync").set("tenant", "acme");
        async {
            YieldOnce(false).await;
            Error::new("late failure")
        }
        .in_current_ops()
    };

    let err = block_on(fut);
    let mut fields = ContextMap::new();
    err.fill(&mut fields);
    assert_eq!(fields["op"], Value::from("sync"));
    assert_eq!(fields["tenant"], Value::from("acme"));
    assert!(ops::snapshot().is_empty());
}

#[test]
fn explicit_snapshot_is_installed() {
    let mut snapshot = ContextMap::new();
    snapshot.insert("op".into(), Value::from("replay"));

    let fut = async { ops::snapshot() }.in_ops(snapshot.clone());
    assert_eq!(fut.snapshot(), &snapshot);
    assert_eq!(block_on(fut), snapshot);
}
