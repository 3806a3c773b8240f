//! Mock warehouse connector for CI-safe tests and examples.
//!
//! The mock reproduces the warehouse's ranking semantics deterministically:
//! candidate terms per weekly bucket are ranked by score descending with
//! ties broken by term ascending, and only the top five survive. Bucket
//! candidate counts are configurable so tests can exercise short buckets.

use async_trait::async_trait;
use tendenza_core::connector::{CountriesProvider, TopTermsProvider, WarehouseConnector};
use tendenza_core::{CountrySet, QueryResult, Selection, TendenzaError};

mod fixtures;

/// Mock connector. Provides deterministic data from static fixtures.
pub struct MockConnector {
    countries: Vec<String>,
    bucket_sizes: Vec<usize>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Connector backed by the default country and term fixtures.
    #[must_use]
    pub fn new() -> Self {
        Self {
            countries: fixtures::countries::all()
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            bucket_sizes: fixtures::terms::DEFAULT_BUCKET_SIZES.to_vec(),
        }
    }

    /// Connector reporting a custom reference country list.
    ///
    /// An empty list makes `countries()` return `NoReferenceData`, the same
    /// way a real connector reacts to an empty reference query.
    #[must_use]
    pub fn with_countries<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            countries: names.into_iter().map(Into::into).collect(),
            bucket_sizes: fixtures::terms::DEFAULT_BUCKET_SIZES.to_vec(),
        }
    }

    /// Override candidate counts per successive weekly bucket (cycled).
    #[must_use]
    pub fn bucket_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.bucket_sizes = sizes;
        self
    }

    fn maybe_fail(country: &str, capability: &'static str) -> Result<(), TendenzaError> {
        match country {
            "FAIL" => Err(TendenzaError::connector(
                "tendenza-mock",
                format!("forced failure: {capability}"),
            )),
            "QUOTA" => Err(TendenzaError::quota_exceeded(
                "tendenza-mock",
                "billing has been disabled for this project",
            )),
            "RATELIMIT" => Err(TendenzaError::rate_limited(
                "tendenza-mock",
                "too many concurrent queries",
            )),
            "MALFORMED" => Err(TendenzaError::malformed_request(
                "tendenza-mock",
                "query exceeded limit for bytes billed",
            )),
            _ => Ok(()),
        }
    }
}

impl WarehouseConnector for MockConnector {
    fn name(&self) -> &'static str {
        "tendenza-mock"
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_countries_provider(&self) -> Option<&dyn CountriesProvider> {
        Some(self as &dyn CountriesProvider)
    }
    fn as_top_terms_provider(&self) -> Option<&dyn TopTermsProvider> {
        Some(self as &dyn TopTermsProvider)
    }
}

#[async_trait]
impl CountriesProvider for MockConnector {
    async fn countries(&self) -> Result<CountrySet, TendenzaError> {
        CountrySet::new(self.countries.clone())
    }
}

#[async_trait]
impl TopTermsProvider for MockConnector {
    async fn top_terms(&self, selection: &Selection) -> Result<QueryResult, TendenzaError> {
        Self::maybe_fail(selection.country(), "top-terms")?;
        Ok(fixtures::terms::for_selection(selection, &self.bucket_sizes))
    }
}
