use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tendenza_core::connector::{CountriesProvider, TopTermsProvider};
use tendenza_core::{
    CountrySet, Middleware, QueryResult, Selection, WarehouseConnector,
};
use tendenza_types::{CacheConfig, Capability, TendenzaError};

#[async_trait]
trait CacheStore<K, V>: Send + Sync {
    async fn get(&self, key: &K) -> Option<V>;
    async fn put(&self, key: K, value: V);
}

/// Wall-clock TTL store. Concurrent callers for the same key may both run
/// the inner computation and race to `put`; entries are whole values, so the
/// loser simply overwrites with an equivalent result.
struct TtlStore<K, V> {
    inner: Cache<K, V>,
}

impl<K, V> TtlStore<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }
}

#[async_trait]
impl<K, V> CacheStore<K, V> for TtlStore<K, V>
where
    K: Clone + std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key).await
    }
    async fn put(&self, key: K, value: V) {
        self.inner.insert(key, value).await;
    }
}

/// Declarative wrapper that applies caching when building a connector stack.
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    /// Capture the cache configuration to apply at build time.
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn WarehouseConnector>) -> Arc<dyn WarehouseConnector> {
        let Self { cfg } = *self;
        Arc::new(CachingConnector::new(inner, &cfg))
    }

    fn name(&self) -> &'static str {
        "CachingMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "countries_ttl_ms": self.cfg.countries_ttl_ms,
            "top_terms_ttl_ms": self.cfg.top_terms_ttl_ms,
            "max_entries": self.cfg.max_entries,
        })
    }
}

// Per-capability typed stores; `None` means disabled (TTL=0).
struct Stores {
    countries: Option<Arc<dyn CacheStore<(), Arc<CountrySet>>>>,
    top_terms: Option<Arc<dyn CacheStore<Selection, Arc<QueryResult>>>>,
}

/// Connector wrapper that serves repeated calls from per-capability TTL
/// stores. Only successful results are stored.
pub struct CachingConnector {
    inner: Arc<dyn WarehouseConnector>,
    stores: Stores,
}

impl CachingConnector {
    fn maybe_store<K, V>(cfg: &CacheConfig, cap: Capability) -> Option<Arc<dyn CacheStore<K, V>>>
    where
        K: Clone + std::hash::Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let ttl = cfg.ttl_for(cap)?;
        let capacity = cfg.capacity_for(cap);
        let store = TtlStore::<K, V>::new(capacity, ttl);
        Some(Arc::new(store))
    }

    /// Wrap `inner` with stores sized and aged per `cfg`.
    #[must_use]
    pub fn new(inner: Arc<dyn WarehouseConnector>, cfg: &CacheConfig) -> Self {
        let stores = Stores {
            countries: Self::maybe_store(cfg, Capability::Countries),
            top_terms: Self::maybe_store(cfg, Capability::TopTerms),
        };
        Self { inner, stores }
    }
}

impl WarehouseConnector for CachingConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    fn as_countries_provider(&self) -> Option<&dyn CountriesProvider> {
        if self.inner.as_countries_provider().is_some() {
            Some(self as &dyn CountriesProvider)
        } else {
            None
        }
    }

    fn as_top_terms_provider(&self) -> Option<&dyn TopTermsProvider> {
        if self.inner.as_top_terms_provider().is_some() {
            Some(self as &dyn TopTermsProvider)
        } else {
            None
        }
    }
}

#[async_trait]
impl CountriesProvider for CachingConnector {
    async fn countries(&self) -> Result<CountrySet, TendenzaError> {
        if let Some(store) = &self.stores.countries {
            if let Some(v) = store.get(&()).await {
                return Ok((*v).clone());
            }
            let inner = self
                .inner
                .as_countries_provider()
                .ok_or_else(|| TendenzaError::unsupported("countries"))?;
            let value = inner.countries().await?;
            store.put((), Arc::new(value.clone())).await;
            return Ok(value);
        }
        self.inner
            .as_countries_provider()
            .ok_or_else(|| TendenzaError::unsupported("countries"))?
            .countries()
            .await
    }
}

#[async_trait]
impl TopTermsProvider for CachingConnector {
    async fn top_terms(&self, selection: &Selection) -> Result<QueryResult, TendenzaError> {
        if let Some(store) = &self.stores.top_terms {
            if let Some(v) = store.get(selection).await {
                return Ok((*v).clone());
            }
            let inner = self
                .inner
                .as_top_terms_provider()
                .ok_or_else(|| TendenzaError::unsupported("top-terms"))?;
            let value = inner.top_terms(selection).await?;
            store.put(selection.clone(), Arc::new(value.clone())).await;
            return Ok(value);
        }
        self.inner
            .as_top_terms_provider()
            .ok_or_else(|| TendenzaError::unsupported("top-terms"))?
            .top_terms(selection)
            .await
    }
}
