use async_trait::async_trait;

use crate::types::{CountrySet, QueryResult, Selection};
use tendenza_types::TendenzaError;

/// Focused role trait for connectors that provide the reference country set.
#[async_trait]
pub trait CountriesProvider: Send + Sync {
    /// Fetch the distinct country names backing the selector.
    ///
    /// Implementations must return `NoReferenceData` instead of an empty
    /// set; callers halt on that condition.
    async fn countries(&self) -> Result<CountrySet, TendenzaError>;
}

/// Focused role trait for connectors that rank top terms per weekly bucket.
#[async_trait]
pub trait TopTermsProvider: Send + Sync {
    /// Fetch top-5 weekly search terms for the given validated selection.
    async fn top_terms(&self, selection: &Selection) -> Result<QueryResult, TendenzaError>;
}

/// Main connector trait implemented by warehouse backends. Exposes
/// capability discovery.
pub trait WarehouseConnector: Send + Sync {
    /// A stable identifier for errors and logs (e.g., "tendenza-bigquery").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise the countries capability by returning a usable trait object
    /// reference when supported.
    fn as_countries_provider(&self) -> Option<&dyn CountriesProvider> {
        None
    }

    /// Advertise the top-terms capability by returning a usable trait object
    /// reference when supported.
    fn as_top_terms_provider(&self) -> Option<&dyn TopTermsProvider> {
        None
    }
}
