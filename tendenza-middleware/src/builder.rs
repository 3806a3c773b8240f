//! Builder for composing connectors with middleware layers.
//!
//! Middleware layers form an "onion" around the raw connector: the `layers`
//! vector stores them in outermost-first order for intuitive builder
//! semantics, and they are applied in reverse during `build()` so that
//! `layers[0]` ends up wrapping everything else.

use std::sync::Arc;

use tendenza_core::connector::WarehouseConnector;
use tendenza_core::Middleware;
use tendenza_types::CacheConfig;

/// Generic middleware builder for composing a connector with layered wrappers.
pub struct ConnectorBuilder {
    raw: Arc<dyn WarehouseConnector>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    /// Create a new builder from a raw, unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn WarehouseConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the result cache.
    ///
    /// The cache sits innermost so that layers added later observe cache
    /// hits as ordinary responses. If cache middleware already exists, it is
    /// removed and replaced.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != "CachingMiddleware");
        self.layers
            .push(Box::new(crate::cache::CacheMiddleware::new(cfg.clone())));
        self
    }

    /// Remove the cache if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != "CachingMiddleware");
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Build the wrapped connector according to the captured stack.
    ///
    /// Applies layers in reverse order (innermost to outermost) to construct
    /// the nesting `layers[0](layers[1](...(raw)))`.
    #[must_use]
    pub fn build(self) -> Arc<dyn WarehouseConnector> {
        let mut acc: Arc<dyn WarehouseConnector> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
