//! Tests for Tokio integration.

use errtrail::{new, ops, ContextMap, Value};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn spawned_task_inherits_operation_context() {
    let handle = {
        let _scope = ops::begin("ingest").set("shard", 3);
        ops::spawn(async {
            tokio::task::yield_now().await;
            new!("shard {} unavailable", 3)
        })
    };

    let err = handle.await.expect("task completed");
    let mut fields = ContextMap::new();
    err.fill(&mut fields);
    assert_eq!(fields["op"], Value::from("ingest"));
    assert_eq!(fields["shard"], Value::from(3));
}

#[tokio::test]
async fn plain_tokio_spawn_loses_context() {
    let handle = {
        let _scope = ops::begin("ingest");
        tokio::task::spawn_blocking(ops::snapshot)
    };
    assert!(handle.await.expect("task completed").is_empty());
}
