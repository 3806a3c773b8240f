use std::sync::Arc;

use chrono::NaiveDate;
use tendenza::{CacheConfig, DateInput, RawSelection, Tendenza, report};
use tendenza_bigquery::{BigQueryConnector, StaticTokenProvider};

/// Runs the pipeline against the real warehouse. Needs:
///   GOOGLE_PROJECT_ID  - billing project for the queries
///   GOOGLE_OAUTH_TOKEN - a bearer token with BigQuery read scope, e.g.
///                        `gcloud auth print-access-token`
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (Ok(project), Ok(token)) = (
        std::env::var("GOOGLE_PROJECT_ID"),
        std::env::var("GOOGLE_OAUTH_TOKEN"),
    ) else {
        eprintln!("set GOOGLE_PROJECT_ID and GOOGLE_OAUTH_TOKEN to run this example");
        return Ok(());
    };

    // The connector is built once; its locality setting is session-scoped
    // and rides along on every call.
    let bq = BigQueryConnector::builder(project)
        .token_provider(Arc::new(StaticTokenProvider::new(token)))
        .build()?;

    let tendenza = Tendenza::builder()
        .with_connector(Arc::new(bq))
        .with_cache(&CacheConfig::default())
        .build()?;

    let countries = tendenza.countries().await?;
    println!("{} countries available", countries.len());

    let raw = RawSelection {
        country: None,
        dates: DateInput::Range(
            NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            tendenza.default_window().1,
        ),
    };
    match tendenza.top_terms_for(raw).await {
        Ok(result) => {
            for row in result.rows.iter().take(10) {
                println!("  {}  #{}  {}", row.date, row.rank, row.term);
            }
        }
        Err(err) => eprintln!("{}", report::user_message(&err)),
    }

    Ok(())
}
