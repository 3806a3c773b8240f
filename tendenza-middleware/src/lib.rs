//! Middleware wrappers for Tendenza connectors.
//!
//! The only layer shipped today is the result cache: a wrapper that memoizes
//! provider output with independent TTL windows per capability. Failures are
//! never cached, so a request that hits a classified error retries the inner
//! provider on the next call instead of replaying a stale failure.
#![warn(missing_docs)]

mod builder;
mod cache;

pub use builder::ConnectorBuilder;
pub use cache::{CacheMiddleware, CachingConnector};
