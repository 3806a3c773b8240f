//! BigQuery connector for the tendenza analytical-query layer.
//!
//! Executes the core's parameterized query plans over the BigQuery REST API
//! (`jobs.query` + `jobs.getQueryResults`) with the cost and safety contract
//! the rest of the workspace relies on:
//!
//! - every request carries the byte-scan ceiling (`maximumBytesBilled`) and
//!   the service-side cache-reuse hint; a query that would blow the ceiling
//!   is rejected by the service, never silently truncated,
//! - scalar values are bound as typed named parameters, never interpolated,
//! - the warehouse locality is session-scoped: fixed when the connector is
//!   built and sent identically on every call,
//! - service failures are normalized into the workspace error taxonomy
//!   (quota/billing/access, malformed request, rate limited, unknown).
//!
//! The connector is built once at process startup and shared by reference;
//! see [`BigQueryBuilder`].
#![warn(missing_docs)]

use std::sync::Arc;

use async_trait::async_trait;

use tendenza_core::connector::{CountriesProvider, TopTermsProvider, WarehouseConnector};
use tendenza_core::plan::QueryPlan;
use tendenza_core::{CountrySet, QueryResult, Selection, TendenzaError};

mod api;
mod auth;
mod builder;

pub use auth::{AccessTokenProvider, StaticTokenProvider};
pub use builder::{BigQueryBuilder, BigQueryConfig, DEFAULT_TABLE};

use api::{
    CONNECTOR_NAME, QueryRequest, QueryResponse, TableRow, TableSchema, WireParameter,
    classify_failure, decode_countries, decode_top_terms,
};

// Long-poll window handed to the service per request; incomplete jobs are
// re-polled until done.
const POLL_TIMEOUT_MS: u64 = 10_000;

/// Warehouse connector backed by the BigQuery REST API.
pub struct BigQueryConnector {
    http: reqwest::Client,
    cfg: BigQueryConfig,
    token: Arc<dyn AccessTokenProvider>,
}

impl BigQueryConnector {
    /// Start building a connector for `project_id`.
    #[must_use]
    pub fn builder(project_id: impl Into<String>) -> BigQueryBuilder {
        BigQueryBuilder::new(project_id)
    }

    pub(crate) fn from_parts(
        http: reqwest::Client,
        cfg: BigQueryConfig,
        token: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self { http, cfg, token }
    }

    /// The configuration this session is pinned to.
    #[must_use]
    pub const fn config(&self) -> &BigQueryConfig {
        &self.cfg
    }

    async fn parse_response(resp: reqwest::Response) -> Result<QueryResponse, TendenzaError> {
        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| TendenzaError::connector(CONNECTOR_NAME, e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(classify_failure(status, &text));
        }
        serde_json::from_str(&text)
            .map_err(|e| TendenzaError::Data(format!("malformed service response: {e}")))
    }

    async fn jobs_query(&self, plan: &QueryPlan) -> Result<QueryResponse, TendenzaError> {
        let token = self.token.access_token().await?;
        let url = format!(
            "{}/projects/{}/queries",
            self.cfg.base_url, self.cfg.project_id
        );
        let body = QueryRequest {
            query: &plan.sql,
            use_legacy_sql: false,
            parameter_mode: (!plan.params.is_empty()).then_some("NAMED"),
            query_parameters: plan.params.iter().map(WireParameter::from).collect(),
            maximum_bytes_billed: self.cfg.maximum_bytes_billed.to_string(),
            use_query_cache: self.cfg.use_query_cache,
            location: &self.cfg.location,
            timeout_ms: POLL_TIMEOUT_MS,
        };
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| TendenzaError::connector(CONNECTOR_NAME, e.to_string()))?;
        Self::parse_response(resp).await
    }

    async fn get_query_results(
        &self,
        job_id: &str,
        page_token: Option<&str>,
    ) -> Result<QueryResponse, TendenzaError> {
        let token = self.token.access_token().await?;
        let url = format!(
            "{}/projects/{}/queries/{job_id}",
            self.cfg.base_url, self.cfg.project_id
        );
        let timeout_ms = POLL_TIMEOUT_MS.to_string();
        let mut req = self.http.get(&url).bearer_auth(&token).query(&[
            ("location", self.cfg.location.as_str()),
            ("timeoutMs", timeout_ms.as_str()),
        ]);
        if let Some(tok) = page_token {
            req = req.query(&[("pageToken", tok)]);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| TendenzaError::connector(CONNECTOR_NAME, e.to_string()))?;
        Self::parse_response(resp).await
    }

    /// Execute a plan to completion: submit, poll until the job finishes,
    /// and drain every result page. On any classified failure the request
    /// halts; partial pages are discarded.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tendenza_bigquery::run_query",
            skip(self, plan),
            fields(params = plan.params.len(), location = %self.cfg.location),
        )
    )]
    async fn run_query(
        &self,
        plan: &QueryPlan,
    ) -> Result<(TableSchema, Vec<TableRow>), TendenzaError> {
        let mut page = self.jobs_query(plan).await?;
        while page.job_complete != Some(true) {
            let job_id = page
                .job_reference
                .as_ref()
                .map(|j| j.job_id.clone())
                .ok_or_else(|| {
                    TendenzaError::Data("incomplete response without a job reference".to_owned())
                })?;
            page = self.get_query_results(&job_id, None).await?;
        }

        let schema = page
            .schema
            .ok_or_else(|| TendenzaError::Data("completed response without a schema".to_owned()))?;
        let mut rows = page.rows;
        let job_id = page.job_reference.map(|j| j.job_id);
        let mut next = page.page_token;
        while let Some(tok) = next {
            let job_id = job_id.as_deref().ok_or_else(|| {
                TendenzaError::Data("paged response without a job reference".to_owned())
            })?;
            let more = self.get_query_results(job_id, Some(&tok)).await?;
            rows.extend(more.rows);
            next = more.page_token;
        }
        Ok((schema, rows))
    }
}

impl WarehouseConnector for BigQueryConnector {
    fn name(&self) -> &'static str {
        CONNECTOR_NAME
    }
    fn vendor(&self) -> &'static str {
        "Google BigQuery"
    }

    fn as_countries_provider(&self) -> Option<&dyn CountriesProvider> {
        Some(self as &dyn CountriesProvider)
    }
    fn as_top_terms_provider(&self) -> Option<&dyn TopTermsProvider> {
        Some(self as &dyn TopTermsProvider)
    }
}

#[async_trait]
impl CountriesProvider for BigQueryConnector {
    async fn countries(&self) -> Result<CountrySet, TendenzaError> {
        let plan = QueryPlan::countries(&self.cfg.table);
        let (schema, rows) = self.run_query(&plan).await?;
        CountrySet::new(decode_countries(&schema, &rows)?)
    }
}

#[async_trait]
impl TopTermsProvider for BigQueryConnector {
    async fn top_terms(&self, selection: &Selection) -> Result<QueryResult, TendenzaError> {
        let plan = QueryPlan::top_terms(&self.cfg.table, selection);
        let (schema, rows) = self.run_query(&plan).await?;
        Ok(QueryResult {
            rows: decode_top_terms(&schema, &rows)?,
            selection: selection.clone(),
        })
    }
}
