use std::sync::Arc;

use chrono::NaiveDate;
use tendenza::{CacheConfig, DateInput, RawSelection, Tendenza, report};
use tendenza_mock::MockConnector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Create a connector. The mock is deterministic and CI-safe; swap in
    //    tendenza_bigquery::BigQueryConnector for the real warehouse.
    let connector = Arc::new(MockConnector::new());

    // 2. Build the orchestrator with the default TTL cache.
    let tendenza = Tendenza::builder()
        .with_connector(connector)
        .with_cache(&CacheConfig::default())
        .build()?;

    // 3. Hand it raw UI input: no country picked yet, dates out of order.
    //    The normalizer repairs both.
    let raw = RawSelection {
        country: None,
        dates: DateInput::Range(
            NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date"),
            NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
        ),
    };

    // 4. Run the pipeline and render either the rows or the single
    //    user-facing failure message.
    match tendenza.top_terms_for(raw).await {
        Ok(result) => {
            println!(
                "Top terms in {} from {} to {}:",
                result.selection.country(),
                result.selection.start(),
                result.selection.end()
            );
            for row in &result.rows {
                println!(
                    "  {}  #{}  {}  (score {})",
                    row.date,
                    row.rank,
                    row.term,
                    row.score.map_or("n/a".to_owned(), |s| s.to_string())
                );
            }
        }
        Err(err) => eprintln!("{}", report::user_message(&err)),
    }

    Ok(())
}
