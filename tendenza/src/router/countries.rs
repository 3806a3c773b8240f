use crate::Tendenza;
use tendenza_core::{Capability, CountrySet, TendenzaError};

impl Tendenza {
    /// Fetch the reference country set backing the selector.
    ///
    /// Served from the cache within its TTL window when one is configured.
    /// An empty reference result surfaces as `NoReferenceData`; there is
    /// nothing to select from and the request must halt.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tendenza::countries", skip(self))
    )]
    pub async fn countries(&self) -> Result<CountrySet, TendenzaError> {
        self.connector
            .as_countries_provider()
            .ok_or_else(|| TendenzaError::unsupported(Capability::Countries.as_str()))?
            .countries()
            .await
    }
}
