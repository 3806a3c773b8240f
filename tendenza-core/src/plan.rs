//! Parameterized query plans for the ranking and reference queries.
//!
//! Plans carry the SQL text and a list of typed scalar parameters; values
//! are never interpolated into the text. The only splice is the source table
//! identifier, which cannot be bound as a parameter and is therefore guarded
//! by the [`TableId`] newtype's character whitelist.

use serde::{Deserialize, Serialize};

use crate::types::Selection;
use tendenza_types::TendenzaError;

/// Scalar parameter types accepted by the warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    /// UTF-8 string.
    String,
    /// Calendar date, bound as `YYYY-MM-DD`.
    Date,
}

impl ParameterType {
    /// Wire name of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Date => "DATE",
        }
    }
}

/// A named, typed scalar bound to a query plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParameter {
    /// Parameter name as referenced in the SQL text (without the `@`).
    pub name: &'static str,
    /// Scalar type the warehouse should coerce the value to.
    pub ty: ParameterType,
    /// Value rendered in the wire format for `ty`.
    pub value: String,
}

/// Fully qualified source table identifier.
///
/// Identifiers cannot be bound as parameters, so the only defense against
/// splicing garbage into the SQL text is rejecting anything beyond
/// `[A-Za-z0-9_.-]` up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableId(String);

impl TableId {
    /// Validate and wrap a `project.dataset.table` path.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty identifier or one containing
    /// characters outside the whitelist.
    pub fn new(id: impl Into<String>) -> Result<Self, TendenzaError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TendenzaError::InvalidArg(
                "table identifier must be non-empty".to_owned(),
            ));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            return Err(TendenzaError::InvalidArg(format!(
                "table identifier contains unsupported characters: {id}"
            )));
        }
        Ok(Self(id))
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A parameterized query plan: SQL text plus bound scalars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPlan {
    /// Standard-SQL text referencing parameters by `@name`.
    pub sql: String,
    /// Ordered scalar bindings.
    pub params: Vec<QueryParameter>,
}

impl QueryPlan {
    /// Ranking plan: top-5 terms per weekly bucket for one selection.
    ///
    /// Ties on score break by term ascending, which makes the ranking
    /// deterministic across engines and re-runs.
    #[must_use]
    pub fn top_terms(table: &TableId, selection: &Selection) -> Self {
        let sql = format!(
            "WITH weekly_terms AS (\n\
             \x20 SELECT\n\
             \x20   term,\n\
             \x20   DATE(week) AS week_date,\n\
             \x20   score,\n\
             \x20   ROW_NUMBER() OVER (\n\
             \x20     PARTITION BY country_name, DATE(week)\n\
             \x20     ORDER BY score DESC, term ASC\n\
             \x20   ) AS rnk\n\
             \x20 FROM `{table}`\n\
             \x20 WHERE DATE(week) BETWEEN @start_date AND @end_date\n\
             \x20   AND country_name = @country\n\
             )\n\
             SELECT term, week_date AS date, score, rnk AS rank\n\
             FROM weekly_terms\n\
             WHERE rnk <= 5\n\
             ORDER BY date, rank",
            table = table.as_str()
        );
        Self {
            sql,
            params: vec![
                QueryParameter {
                    name: "start_date",
                    ty: ParameterType::Date,
                    value: selection.start().format("%Y-%m-%d").to_string(),
                },
                QueryParameter {
                    name: "end_date",
                    ty: ParameterType::Date,
                    value: selection.end().format("%Y-%m-%d").to_string(),
                },
                QueryParameter {
                    name: "country",
                    ty: ParameterType::String,
                    value: selection.country().to_owned(),
                },
            ],
        }
    }

    /// Reference plan: distinct country names in natural order.
    #[must_use]
    pub fn countries(table: &TableId) -> Self {
        let sql = format!(
            "SELECT DISTINCT country_name\n\
             FROM `{table}`\n\
             WHERE country_name IS NOT NULL\n\
             ORDER BY country_name",
            table = table.as_str()
        );
        Self {
            sql,
            params: Vec::new(),
        }
    }
}
