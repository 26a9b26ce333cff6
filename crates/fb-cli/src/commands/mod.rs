pub mod dispatch;
pub mod export;
pub mod list;
pub mod schema;
pub mod shared;
pub mod stats;
pub mod submit;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_support;
