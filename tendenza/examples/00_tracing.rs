use std::sync::Arc;

use chrono::NaiveDate;
use tendenza::{CacheConfig, DateInput, RawSelection, Tendenza};
use tendenza_mock::MockConnector;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,tendenza=trace,tendenza_bigquery=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let tendenza = Tendenza::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .with_cache(&CacheConfig::default())
        .build()?;

    let raw = RawSelection {
        country: Some("Philippines".to_owned()),
        dates: DateInput::Single(NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")),
    };

    // Run the same interaction twice: the second run is served from the
    // cache, which the spans make visible.
    let _ = tendenza.top_terms_for(raw.clone()).await?;
    let _ = tendenza.top_terms_for(raw).await?;

    Ok(())
}
