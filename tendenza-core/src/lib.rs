//! tendenza-core
//!
//! Core types, traits, and utilities shared across the tendenza ecosystem.
//!
//! - `types`: the data model (selections, country sets, ranked term rows).
//! - `plan`: parameterized query plans for the ranking and reference queries.
//! - `connector`: the `WarehouseConnector` trait and capability provider traits.
//! - `middleware`: the trait implemented by connector wrappers.
//!
//! Async runtime (Tokio)
//! ---------------------
//! Provider traits are `async_trait` object-safe contracts; the shipped
//! connectors and middleware assume a Tokio 1.x runtime.
#![warn(missing_docs)]

/// Connector capability traits and the primary `WarehouseConnector` interface.
pub mod connector;
/// Middleware trait implemented by connector wrappers.
pub mod middleware;
/// Parameterized query plans.
pub mod plan;
pub mod types;

pub use connector::WarehouseConnector;
pub use middleware::Middleware;
pub use plan::{ParameterType, QueryParameter, QueryPlan, TableId};
pub use tendenza_types::{Capability, CacheConfig, ErrorKind, TendenzaConfig, TendenzaError};
pub use types::{CountrySet, QueryResult, Selection, TopTermRow};
