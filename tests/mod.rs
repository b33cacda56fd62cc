pub mod types;

#[cfg(feature = "async")]
pub mod async_ext;
