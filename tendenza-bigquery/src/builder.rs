use std::sync::Arc;

use tendenza_core::plan::TableId;
use tendenza_core::TendenzaError;

use crate::auth::AccessTokenProvider;
use crate::BigQueryConnector;

/// The public Google Trends dataset the shipped query plans target.
pub const DEFAULT_TABLE: &str = "bigquery-public-data.google_trends.international_top_terms";

const DEFAULT_BASE_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";
const DEFAULT_MAXIMUM_BYTES_BILLED: i64 = 1_000_000_000;

/// Connector configuration.
///
/// `location` is session configuration: it is fixed here, at construction,
/// and the connector sends the same value with every call for the lifetime
/// of the process. Varying it per call is not representable.
#[derive(Debug, Clone)]
pub struct BigQueryConfig {
    /// Billing project the queries run under.
    pub project_id: String,
    /// Source table for both the reference and ranking queries.
    pub table: TableId,
    /// Warehouse locality the session is pinned to.
    pub location: String,
    /// Hard ceiling on bytes scanned per query; the service rejects the
    /// request outright when a query would exceed it.
    pub maximum_bytes_billed: i64,
    /// Ask the service to reuse its own cached results when valid. A hint
    /// only; the middleware cache is authoritative for this system.
    pub use_query_cache: bool,
    /// REST endpoint root, overridable for tests.
    pub base_url: String,
}

impl BigQueryConfig {
    /// Defaults for a project: public trends table, `US` locality, 1 GB
    /// ceiling, service-side cache reuse on.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            table: TableId::new(DEFAULT_TABLE).unwrap(),
            location: "US".to_owned(),
            maximum_bytes_billed: DEFAULT_MAXIMUM_BYTES_BILLED,
            use_query_cache: true,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

/// Builder for [`BigQueryConnector`].
pub struct BigQueryBuilder {
    cfg: BigQueryConfig,
    token: Option<Arc<dyn AccessTokenProvider>>,
    http: Option<reqwest::Client>,
}

impl BigQueryBuilder {
    /// Start from the default configuration for `project_id`.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            cfg: BigQueryConfig::new(project_id),
            token: None,
            http: None,
        }
    }

    /// Override the source table.
    #[must_use]
    pub fn table(mut self, table: TableId) -> Self {
        self.cfg.table = table;
        self
    }

    /// Pin the session to a different warehouse locality.
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.cfg.location = location.into();
        self
    }

    /// Override the per-query byte-scan ceiling.
    #[must_use]
    pub const fn maximum_bytes_billed(mut self, bytes: i64) -> Self {
        self.cfg.maximum_bytes_billed = bytes;
        self
    }

    /// Toggle the service-side cache-reuse hint.
    #[must_use]
    pub const fn use_query_cache(mut self, yes: bool) -> Self {
        self.cfg.use_query_cache = yes;
        self
    }

    /// Point the connector at a different endpoint root (tests).
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.cfg.base_url = base_url.into();
        self
    }

    /// Install the token source for bearer authentication.
    #[must_use]
    pub fn token_provider(mut self, provider: Arc<dyn AccessTokenProvider>) -> Self {
        self.token = Some(provider);
        self
    }

    /// Reuse an existing HTTP client instead of constructing one.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no token provider has been installed or the
    /// project id is empty.
    pub fn build(self) -> Result<BigQueryConnector, TendenzaError> {
        if self.cfg.project_id.is_empty() {
            return Err(TendenzaError::InvalidArg(
                "project id must be non-empty".to_owned(),
            ));
        }
        let token = self.token.ok_or_else(|| {
            TendenzaError::InvalidArg(
                "no token provider installed; add one via token_provider(...)".to_owned(),
            )
        })?;
        Ok(BigQueryConnector::from_parts(
            self.http.unwrap_or_default(),
            self.cfg,
            token,
        ))
    }
}
