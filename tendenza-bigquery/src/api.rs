//! Wire types and row decoding for the BigQuery `jobs.query` /
//! `jobs.getQueryResults` endpoints.
//!
//! BigQuery serializes every scalar cell as a JSON string (INT64 included)
//! and omits `rows` entirely for empty result sets; the decoders here absorb
//! both quirks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tendenza_core::plan::QueryParameter;
use tendenza_core::{TendenzaError, TopTermRow};

pub(crate) const CONNECTOR_NAME: &str = "tendenza-bigquery";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryRequest<'a> {
    pub query: &'a str,
    pub use_legacy_sql: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query_parameters: Vec<WireParameter>,
    pub maximum_bytes_billed: String,
    pub use_query_cache: bool,
    pub location: &'a str,
    pub timeout_ms: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireParameter {
    pub name: &'static str,
    pub parameter_type: WireParameterType,
    pub parameter_value: WireParameterValue,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireParameterType {
    #[serde(rename = "type")]
    pub ty: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireParameterValue {
    pub value: String,
}

impl From<&QueryParameter> for WireParameter {
    fn from(p: &QueryParameter) -> Self {
        Self {
            name: p.name,
            parameter_type: WireParameterType {
                ty: p.ty.as_str(),
            },
            parameter_value: WireParameterValue {
                value: p.value.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryResponse {
    pub job_complete: Option<bool>,
    pub job_reference: Option<JobReference>,
    pub schema: Option<TableSchema>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobReference {
    pub job_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TableSchema {
    pub fields: Vec<TableFieldSchema>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TableFieldSchema {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TableRow {
    pub f: Vec<TableCell>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TableCell {
    pub v: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<ErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorObject {
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorItem {
    pub reason: Option<String>,
}

fn data_err(msg: impl Into<String>) -> TendenzaError {
    TendenzaError::Data(msg.into())
}

fn column_index(schema: &TableSchema, name: &str) -> Result<usize, TendenzaError> {
    schema
        .fields
        .iter()
        .position(|f| f.name == name)
        .ok_or_else(|| data_err(format!("result schema is missing column `{name}`")))
}

fn cell<'a>(row: &'a TableRow, idx: usize) -> Result<&'a TableCell, TendenzaError> {
    row.f
        .get(idx)
        .ok_or_else(|| data_err(format!("row is missing cell {idx}")))
}

fn cell_str(row: &TableRow, idx: usize, name: &str) -> Result<String, TendenzaError> {
    match &cell(row, idx)?.v {
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        other => Err(data_err(format!(
            "column `{name}` is not a string cell: {other:?}"
        ))),
    }
}

fn cell_opt_i64(row: &TableRow, idx: usize, name: &str) -> Result<Option<i64>, TendenzaError> {
    match &cell(row, idx)?.v {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| data_err(format!("column `{name}` is not an integer: {s}"))),
        other => Err(data_err(format!(
            "column `{name}` has an unexpected shape: {other:?}"
        ))),
    }
}

fn cell_date(row: &TableRow, idx: usize, name: &str) -> Result<NaiveDate, TendenzaError> {
    let s = cell_str(row, idx, name)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .map_err(|_| data_err(format!("column `{name}` is not a date: {s}")))
}

/// Decode the reference-query result into an ordered country list.
pub(crate) fn decode_countries(
    schema: &TableSchema,
    rows: &[TableRow],
) -> Result<Vec<String>, TendenzaError> {
    let country = column_index(schema, "country_name")?;
    rows.iter()
        .map(|row| cell_str(row, country, "country_name"))
        .collect()
}

/// Decode the ranking-query result into ordered term rows.
pub(crate) fn decode_top_terms(
    schema: &TableSchema,
    rows: &[TableRow],
) -> Result<Vec<TopTermRow>, TendenzaError> {
    let term = column_index(schema, "term")?;
    let date = column_index(schema, "date")?;
    let score = column_index(schema, "score")?;
    let rank = column_index(schema, "rank")?;

    rows.iter()
        .map(|row| {
            let rank_value = cell_opt_i64(row, rank, "rank")?
                .ok_or_else(|| data_err("column `rank` is NULL"))?;
            let rank_value = u32::try_from(rank_value)
                .map_err(|_| data_err(format!("rank out of range: {rank_value}")))?;
            Ok(TopTermRow {
                term: cell_str(row, term, "term")?,
                date: cell_date(row, date, "date")?,
                score: cell_opt_i64(row, score, "score")?,
                rank: rank_value,
            })
        })
        .collect()
}

/// Map a non-success HTTP response onto the executor error taxonomy.
///
/// The service reason string is more specific than the status code (rate
/// limits surface as 403 with reason `rateLimitExceeded`), so reasons are
/// matched first and the status code is the fallback.
pub(crate) fn classify_failure(status: u16, body: &str) -> TendenzaError {
    let parsed: Option<ErrorObject> = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error);
    let msg = parsed
        .as_ref()
        .and_then(|e| e.message.clone())
        .unwrap_or_else(|| format!("HTTP {status}"));
    let reason = parsed
        .as_ref()
        .and_then(|e| e.errors.first())
        .and_then(|i| i.reason.as_deref())
        .unwrap_or("");

    match reason {
        "rateLimitExceeded" | "jobRateLimitExceeded" | "concurrentLimitExceeded" => {
            return TendenzaError::rate_limited(CONNECTOR_NAME, msg);
        }
        "accessDenied" | "billingNotEnabled" | "quotaExceeded" | "billingTierLimitExceeded" => {
            return TendenzaError::quota_exceeded(CONNECTOR_NAME, msg);
        }
        "invalid" | "invalidQuery" | "bytesBilledLimitExceeded" => {
            return TendenzaError::malformed_request(CONNECTOR_NAME, msg);
        }
        _ => {}
    }

    match status {
        403 => TendenzaError::quota_exceeded(CONNECTOR_NAME, msg),
        400 => TendenzaError::malformed_request(CONNECTOR_NAME, msg),
        429 => TendenzaError::rate_limited(CONNECTOR_NAME, msg),
        _ => TendenzaError::connector(CONNECTOR_NAME, msg),
    }
}
