//! Integration tests for async extensions.

mod ops_future;

#[cfg(feature = "async-tokio")]
mod tokio_tests;
