use std::sync::Arc;

use tendenza_core::{Middleware, TendenzaError, WarehouseConnector};
use tendenza_middleware::ConnectorBuilder;
use tendenza_types::{CacheConfig, TendenzaConfig};

/// Orchestrator that runs the selection pipeline against one connector stack.
///
/// Owns the process-wide connector (and therefore the cache stores inside
/// it). Construct once at startup and share by reference; per-request
/// construction would defeat both the cache and the session-scoped
/// warehouse configuration.
pub struct Tendenza {
    pub(crate) connector: Arc<dyn WarehouseConnector>,
    pub(crate) cfg: TendenzaConfig,
}

/// Builder for constructing a `Tendenza` orchestrator with custom configuration.
pub struct TendenzaBuilder {
    connector: Option<Arc<dyn WarehouseConnector>>,
    cache: Option<CacheConfig>,
    layers: Vec<Box<dyn Middleware>>,
    cfg: TendenzaConfig,
}

impl Default for TendenzaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TendenzaBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no connector; you must register one via [`with_connector`].
    /// - No cache is applied unless [`with_cache`] is called; every request
    ///   then hits the warehouse, which is rarely what you want outside tests.
    /// - The default country preference list and calendar lower bound come
    ///   from [`TendenzaConfig::default`].
    ///
    /// [`with_connector`]: Self::with_connector
    /// [`with_cache`]: Self::with_cache
    #[must_use]
    pub fn new() -> Self {
        Self {
            connector: None,
            cache: None,
            layers: Vec::new(),
            cfg: TendenzaConfig::default(),
        }
    }

    /// Register the warehouse connector the pipeline executes through.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn WarehouseConnector>) -> Self {
        self.connector = Some(c);
        self
    }

    /// Apply the TTL result cache with the given configuration.
    ///
    /// Behavior and trade-offs:
    /// - The cache wraps the connector directly, so custom layers added via
    ///   [`layer`](Self::layer) observe cache hits as ordinary responses.
    /// - TTLs bound staleness; there is no invalidation API. A zero TTL
    ///   disables the store for that capability.
    #[must_use]
    pub fn with_cache(mut self, cache: &CacheConfig) -> Self {
        self.cache = Some(cache.clone());
        self
    }

    /// Add a custom middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.push(layer);
        self
    }

    /// Override the ordered country preference list used for default selection.
    #[must_use]
    pub fn preferred_countries<I, S>(mut self, prefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cfg.preferred_countries = prefs.into_iter().map(Into::into).collect();
        self
    }

    /// Override the lower bound of the default date window.
    #[must_use]
    pub const fn calendar_min_date(mut self, date: chrono::NaiveDate) -> Self {
        self.cfg.calendar_min_date = date;
        self
    }

    /// Build the `Tendenza` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connector has been registered via
    /// [`with_connector`](Self::with_connector).
    pub fn build(self) -> Result<Tendenza, TendenzaError> {
        let raw = self.connector.ok_or_else(|| {
            TendenzaError::InvalidArg(
                "no connector registered; add one via with_connector(...)".to_string(),
            )
        })?;

        let mut builder = ConnectorBuilder::new(raw);
        if let Some(cache) = &self.cache {
            builder = builder.with_cache(cache);
        }
        for layer in self.layers {
            builder = builder.layer(layer);
        }

        Ok(Tendenza {
            connector: builder.build(),
            cfg: self.cfg,
        })
    }
}

impl Tendenza {
    /// Start building a new `Tendenza` instance.
    ///
    /// Typical usage chains connector registration and caching, e.g.:
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let bq = Arc::new(
    ///     tendenza_bigquery::BigQueryConnector::builder("my-project")
    ///         .token_provider(token_source)
    ///         .build()?,
    /// );
    ///
    /// let t = tendenza::Tendenza::builder()
    ///     .with_connector(bq)
    ///     .with_cache(&tendenza::CacheConfig::default())
    ///     .preferred_countries(["Philippines", "United States"])
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> TendenzaBuilder {
        TendenzaBuilder::new()
    }

    /// The orchestrator configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &TendenzaConfig {
        &self.cfg
    }
}
