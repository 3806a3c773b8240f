//! The submitted request must carry the cost ceiling, the cache-reuse hint,
//! the session locality, and typed named parameters, never interpolated
//! values.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tendenza_bigquery::{BigQueryConnector, StaticTokenProvider};
use tendenza_core::connector::{CountriesProvider, TopTermsProvider, WarehouseConnector};
use tendenza_core::{Selection, TendenzaError};
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn connector(server: &MockServer) -> BigQueryConnector {
    BigQueryConnector::builder("test-project")
        .base_url(server.uri())
        .token_provider(Arc::new(StaticTokenProvider::new("test-token")))
        .build()
        .unwrap()
}

fn selection() -> Selection {
    Selection::new(
        "France",
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
    )
    .unwrap()
}

fn terms_body() -> serde_json::Value {
    json!({
        "kind": "bigquery#queryResponse",
        "jobComplete": true,
        "jobReference": {"projectId": "test-project", "jobId": "job_1", "location": "US"},
        "schema": {"fields": [
            {"name": "term", "type": "STRING"},
            {"name": "date", "type": "DATE"},
            {"name": "score", "type": "INTEGER"},
            {"name": "rank", "type": "INTEGER"}
        ]},
        "totalRows": "2",
        "rows": [
            {"f": [{"v": "heatwave"}, {"v": "2025-06-01"}, {"v": "100"}, {"v": "1"}]},
            {"f": [{"v": "typhoon"}, {"v": "2025-06-01"}, {"v": null}, {"v": "2"}]}
        ]
    })
}

#[tokio::test]
async fn top_terms_request_is_bounded_and_parameterized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/projects/test-project/queries"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "useLegacySql": false,
            "maximumBytesBilled": "1000000000",
            "useQueryCache": true,
            "parameterMode": "NAMED",
            "location": "US",
            "queryParameters": [
                {
                    "name": "start_date",
                    "parameterType": {"type": "DATE"},
                    "parameterValue": {"value": "2025-06-01"}
                },
                {
                    "name": "end_date",
                    "parameterType": {"type": "DATE"},
                    "parameterValue": {"value": "2025-06-14"}
                },
                {
                    "name": "country",
                    "parameterType": {"type": "STRING"},
                    "parameterValue": {"value": "France"}
                }
            ]
        })))
        .and(body_string_contains("@country"))
        .respond_with(ResponseTemplate::new(200).set_body_json(terms_body()))
        .expect(1)
        .mount(&server)
        .await;

    let bq = connector(&server);
    let result = bq.top_terms(&selection()).await.unwrap();

    assert_eq!(result.rows.len(), 2);
    assert_eq!(result.rows[0].term, "heatwave");
    assert_eq!(result.rows[0].score, Some(100));
    assert_eq!(result.rows[1].score, None, "NULL scores are tolerated");
    assert_eq!(result.selection, selection());
}

#[tokio::test]
async fn countries_request_runs_the_reference_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/projects/test-project/queries"))
        .and(body_string_contains("SELECT DISTINCT country_name"))
        .and(body_string_contains("ORDER BY country_name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobComplete": true,
            "jobReference": {"projectId": "test-project", "jobId": "job_2"},
            "schema": {"fields": [{"name": "country_name", "type": "STRING"}]},
            "rows": [
                {"f": [{"v": "France"}]},
                {"f": [{"v": "Philippines"}]},
                {"f": [{"v": "United States"}]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bq = connector(&server);
    let set = bq.countries().await.unwrap();
    assert_eq!(set.as_slice(), ["France", "Philippines", "United States"]);
}

#[tokio::test]
async fn empty_reference_result_halts_with_no_reference_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/projects/test-project/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobComplete": true,
            "jobReference": {"projectId": "test-project", "jobId": "job_3"},
            "schema": {"fields": [{"name": "country_name", "type": "STRING"}]}
        })))
        .mount(&server)
        .await;

    let bq = connector(&server);
    assert!(matches!(
        bq.countries().await,
        Err(TendenzaError::NoReferenceData)
    ));
}

#[tokio::test]
async fn connector_reports_its_identity() {
    let server = MockServer::start().await;
    let bq = connector(&server);
    assert_eq!(bq.name(), "tendenza-bigquery");
    assert_eq!(bq.vendor(), "Google BigQuery");
    assert!(bq.as_countries_provider().is_some());
    assert!(bq.as_top_terms_provider().is_some());
}
