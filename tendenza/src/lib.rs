//! Tendenza turns a (country, date-range) selection into a safe, bounded,
//! parameterized query against a columnar warehouse and returns the top-5
//! weekly search terms per bucket.
//!
//! Overview
//! - Normalizes raw caller input (default-country policy, date-order repair,
//!   single-date expansion) before anything reaches the query layer.
//! - Routes every fetch through a TTL result cache with independent windows
//!   for slow-changing reference data and fast-changing query results.
//! - Executes through a pluggable `WarehouseConnector`; the shipped BigQuery
//!   connector binds typed parameters, enforces a byte-scan ceiling, and
//!   pins the session locality at construction.
//! - Classifies warehouse failures into a small taxonomy and renders exactly
//!   one user-facing message per failed request. No automatic retries: the
//!   system fails loudly rather than masking cost or correctness problems.
//!
//! Key behaviors and trade-offs
//! - Caching: within a TTL window an equal selection is served from memory
//!   without touching the warehouse; staleness is bounded by the TTL alone,
//!   there is no invalidation API. Failures are never cached.
//! - Halting: the pipeline returns `Result` rather than terminating the
//!   host; the caller decides how to stop rendering. An empty reference
//!   country set halts the request before any selection is built.
//! - Cost: the ceiling is enforced warehouse-side, so an over-budget query
//!   is rejected outright instead of being silently truncated.
//!
//! Examples
//! Building an orchestrator over the mock connector and running the
//! pipeline:
//! ```rust,ignore
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use tendenza::{DateInput, RawSelection, Tendenza};
//! use tendenza_mock::MockConnector;
//!
//! let t = Tendenza::builder()
//!     .with_connector(Arc::new(MockConnector::new()))
//!     .with_cache(&tendenza::CacheConfig::default())
//!     .build()?;
//!
//! let raw = RawSelection {
//!     country: None, // default-country policy applies
//!     dates: DateInput::Range(
//!         NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
//!         NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), // out of order: repaired
//!     ),
//! };
//! match t.top_terms_for(raw).await {
//!     Ok(result) => { /* render result.rows */ }
//!     Err(err) => eprintln!("{}", tendenza::report::user_message(&err)),
//! }
//! ```
//!
//! See `tendenza/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
/// Selection normalization: repair raw caller input into a valid selection.
pub mod normalize;
/// User-facing failure rendering.
pub mod report;
mod router;

pub use core::{Tendenza, TendenzaBuilder};
pub use normalize::{DateInput, RawSelection, default_country, normalize};

pub use tendenza_middleware::{CacheMiddleware, ConnectorBuilder};

// Re-export core types for convenience
pub use tendenza_core::{
    // Foundational types
    CacheConfig,
    Capability,
    CountrySet,
    ErrorKind,
    Middleware,
    QueryPlan,
    QueryResult,
    Selection,
    TableId,
    TendenzaConfig,
    TendenzaError,
    TopTermRow,

    WarehouseConnector,
};
