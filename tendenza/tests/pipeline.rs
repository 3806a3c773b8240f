use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::NaiveDate;
use tendenza::report::{NO_DATA_MESSAGE, QUOTA_MESSAGE, user_message};
use tendenza::{CacheConfig, DateInput, RawSelection, Tendenza};
use tendenza_core::connector::{CountriesProvider, TopTermsProvider, WarehouseConnector};
use tendenza_core::{CountrySet, QueryResult, Selection, TendenzaError, TopTermRow};
use tendenza_mock::MockConnector;

fn d(m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, day).unwrap()
}

fn raw(country: Option<&str>) -> RawSelection {
    RawSelection {
        country: country.map(str::to_owned),
        dates: DateInput::Range(d(6, 1), d(6, 14)),
    }
}

#[tokio::test]
async fn pipeline_returns_validated_ranked_buckets() {
    let t = Tendenza::builder()
        .with_connector(Arc::new(MockConnector::new().bucket_sizes(vec![3, 7])))
        .build()
        .unwrap();

    let result = t.top_terms_for(raw(Some("France"))).await.unwrap();
    result.validate().unwrap();

    // First bucket had three candidates (ranks 1-3), second had seven
    // (capped at ranks 1-5).
    assert_eq!(result.rows.len(), 3 + 5);
    let first: Vec<u32> = result
        .rows
        .iter()
        .filter(|r| r.date == d(6, 1))
        .map(|r| r.rank)
        .collect();
    let second: Vec<u32> = result
        .rows
        .iter()
        .filter(|r| r.date == d(6, 8))
        .map(|r| r.rank)
        .collect();
    assert_eq!(first, [1, 2, 3]);
    assert_eq!(second, [1, 2, 3, 4, 5]);
    assert_eq!(result.selection.country(), "France");
}

#[tokio::test]
async fn pipeline_applies_the_default_country_policy() {
    let t = Tendenza::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let result = t.top_terms_for(raw(None)).await.unwrap();
    assert_eq!(result.selection.country(), "Philippines");
}

#[tokio::test]
async fn quota_failures_halt_with_a_single_user_message() {
    // The executor classifies the failure; the reference set legitimately
    // contains the failing country so normalization keeps it.
    let t = Tendenza::builder()
        .with_connector(Arc::new(MockConnector::with_countries(vec!["QUOTA"])))
        .build()
        .unwrap();

    let err = t.top_terms_for(raw(Some("QUOTA"))).await.unwrap_err();
    assert_eq!(user_message(&err), QUOTA_MESSAGE);
}

#[tokio::test]
async fn an_empty_reference_set_halts_before_any_selection() {
    let t = Tendenza::builder()
        .with_connector(Arc::new(MockConnector::with_countries(
            Vec::<String>::new(),
        )))
        .build()
        .unwrap();

    let err = t.top_terms_for(raw(None)).await.unwrap_err();
    assert!(matches!(err, TendenzaError::NoReferenceData));
    assert_eq!(user_message(&err), NO_DATA_MESSAGE);
}

#[tokio::test]
async fn building_without_a_connector_is_rejected() {
    assert!(matches!(
        Tendenza::builder().build(),
        Err(TendenzaError::InvalidArg(_))
    ));
}

struct CountingConnector {
    inner: Arc<dyn WarehouseConnector>,
    countries_calls: Arc<AtomicUsize>,
    top_terms_calls: Arc<AtomicUsize>,
}

impl WarehouseConnector for CountingConnector {
    fn name(&self) -> &'static str {
        "counting"
    }
    fn as_countries_provider(&self) -> Option<&dyn CountriesProvider> {
        Some(self as &dyn CountriesProvider)
    }
    fn as_top_terms_provider(&self) -> Option<&dyn TopTermsProvider> {
        Some(self as &dyn TopTermsProvider)
    }
}

#[async_trait]
impl CountriesProvider for CountingConnector {
    async fn countries(&self) -> Result<CountrySet, TendenzaError> {
        self.countries_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .as_countries_provider()
            .unwrap()
            .countries()
            .await
    }
}

#[async_trait]
impl TopTermsProvider for CountingConnector {
    async fn top_terms(&self, selection: &Selection) -> Result<QueryResult, TendenzaError> {
        self.top_terms_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .as_top_terms_provider()
            .unwrap()
            .top_terms(selection)
            .await
    }
}

#[tokio::test]
async fn repeated_interactions_are_served_from_the_cache() {
    let countries_calls = Arc::new(AtomicUsize::new(0));
    let top_terms_calls = Arc::new(AtomicUsize::new(0));
    let t = Tendenza::builder()
        .with_connector(Arc::new(CountingConnector {
            inner: Arc::new(MockConnector::new()),
            countries_calls: countries_calls.clone(),
            top_terms_calls: top_terms_calls.clone(),
        }))
        .with_cache(&CacheConfig::default())
        .build()
        .unwrap();

    let first = t.top_terms_for(raw(Some("France"))).await.unwrap();
    let second = t.top_terms_for(raw(Some("France"))).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(countries_calls.load(Ordering::SeqCst), 1);
    assert_eq!(top_terms_calls.load(Ordering::SeqCst), 1);
}

struct BrokenRanking;

impl WarehouseConnector for BrokenRanking {
    fn name(&self) -> &'static str {
        "broken"
    }
    fn as_countries_provider(&self) -> Option<&dyn CountriesProvider> {
        Some(self as &dyn CountriesProvider)
    }
    fn as_top_terms_provider(&self) -> Option<&dyn TopTermsProvider> {
        Some(self as &dyn TopTermsProvider)
    }
}

#[async_trait]
impl CountriesProvider for BrokenRanking {
    async fn countries(&self) -> Result<CountrySet, TendenzaError> {
        CountrySet::new(vec!["France"])
    }
}

#[async_trait]
impl TopTermsProvider for BrokenRanking {
    async fn top_terms(&self, selection: &Selection) -> Result<QueryResult, TendenzaError> {
        // Rank 2 with no rank 1: a gap the orchestrator must reject.
        Ok(QueryResult {
            rows: vec![TopTermRow {
                term: "stray".to_owned(),
                date: selection.start(),
                score: Some(10),
                rank: 2,
            }],
            selection: selection.clone(),
        })
    }
}

#[tokio::test]
async fn malformed_provider_rankings_fail_loudly() {
    let t = Tendenza::builder()
        .with_connector(Arc::new(BrokenRanking))
        .build()
        .unwrap();

    let err = t.top_terms_for(raw(Some("France"))).await.unwrap_err();
    assert!(matches!(err, TendenzaError::Data(_)));
}

struct NoTerms;

impl WarehouseConnector for NoTerms {
    fn name(&self) -> &'static str {
        "no-terms"
    }
    fn as_countries_provider(&self) -> Option<&dyn CountriesProvider> {
        Some(self as &dyn CountriesProvider)
    }
}

#[async_trait]
impl CountriesProvider for NoTerms {
    async fn countries(&self) -> Result<CountrySet, TendenzaError> {
        CountrySet::new(vec!["France"])
    }
}

#[tokio::test]
async fn a_connector_without_the_capability_is_unsupported() {
    let t = Tendenza::builder()
        .with_connector(Arc::new(NoTerms))
        .build()
        .unwrap();

    let err = t.top_terms_for(raw(None)).await.unwrap_err();
    assert!(matches!(err, TendenzaError::Unsupported { .. }));
}

#[tokio::test]
async fn the_default_window_is_never_inverted() {
    let t = Tendenza::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .calendar_min_date(NaiveDate::from_ymd_opt(9999, 1, 1).unwrap())
        .build()
        .unwrap();

    let (start, end) = t.default_window();
    assert!(start <= end);
    assert_eq!(start, end, "a future lower bound clamps to today");
}
