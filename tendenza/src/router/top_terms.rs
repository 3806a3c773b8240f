use chrono::{NaiveDate, Utc};

use crate::Tendenza;
use crate::normalize::{RawSelection, normalize};
use tendenza_core::{Capability, QueryResult, Selection, TendenzaError};

impl Tendenza {
    /// Fetch top-5 weekly search terms for a validated selection.
    ///
    /// Behavior and trade-offs:
    /// - Served from the cache within its TTL window when one is configured;
    ///   a cache hit returns what a fresh execution produced earlier, with
    ///   staleness bounded by the TTL.
    /// - Fresh results are checked against the ranking invariants (at most
    ///   five gapless ranks per bucket, buckets in order); a provider that
    ///   emits a malformed ranking fails as `Data` instead of rendering
    ///   garbage.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tendenza::top_terms",
            skip(self, selection),
            fields(country = %selection.country()),
        )
    )]
    pub async fn top_terms(&self, selection: &Selection) -> Result<QueryResult, TendenzaError> {
        let result = self
            .connector
            .as_top_terms_provider()
            .ok_or_else(|| TendenzaError::unsupported(Capability::TopTerms.as_str()))?
            .top_terms(selection)
            .await?;
        result.validate()?;
        Ok(result)
    }

    /// Run the full pipeline for one caller interaction: fetch the country
    /// set, normalize the raw selection against it, fetch top terms.
    ///
    /// Any failure halts the request and propagates for the caller to render
    /// (see [`crate::report::user_message`]); no retries are attempted.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tendenza::top_terms_for", skip(self, raw))
    )]
    pub async fn top_terms_for(&self, raw: RawSelection) -> Result<QueryResult, TendenzaError> {
        let countries = self.countries().await?;
        let selection = normalize(raw, &countries, &self.cfg.preferred_countries)?;
        self.top_terms(&selection).await
    }

    /// The default date window offered to callers: from the configured
    /// calendar lower bound through today, clamped so the window is never
    /// inverted.
    #[must_use]
    pub fn default_window(&self) -> (NaiveDate, NaiveDate) {
        let today = Utc::now().date_naive();
        (self.cfg.calendar_min_date.min(today), today)
    }
}
