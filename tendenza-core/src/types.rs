//! Data model for the analytical-query pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tendenza_types::TendenzaError;

/// Maximum number of ranked rows a single date bucket may carry.
pub const MAX_RANK: u32 = 5;

/// A validated (country, inclusive date window) triple driving one query.
///
/// Construction enforces the invariants the query builder relies on: the
/// country is non-empty and the window is ordered. Instances are immutable
/// and hashable so they can key the result cache directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    country: String,
    start: NaiveDate,
    end: NaiveDate,
}

impl Selection {
    /// Build a selection, rejecting an empty country or an inverted window.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `country` is empty or `start > end`. Raw
    /// caller input is repaired by the selection normalizer before it gets
    /// here; this constructor is the backstop, not the repair path.
    pub fn new(
        country: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, TendenzaError> {
        let country = country.into();
        if country.is_empty() {
            return Err(TendenzaError::InvalidArg(
                "selection country must be non-empty".to_owned(),
            ));
        }
        if start > end {
            return Err(TendenzaError::InvalidArg(format!(
                "selection window is inverted: {start} > {end}"
            )));
        }
        Ok(Self {
            country,
            start,
            end,
        })
    }

    /// Country name as stored in the warehouse.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Inclusive window start.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Inclusive window end.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Ordered set of distinct country names obtained from the warehouse.
///
/// Non-empty by construction: an empty reference set means there is nothing
/// to select from and the request must halt, so it cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySet(Vec<String>);

impl CountrySet {
    /// Build a set from warehouse output, preserving order and dropping
    /// duplicates and empty names.
    ///
    /// # Errors
    /// Returns `NoReferenceData` when nothing usable remains; callers halt
    /// the request instead of presenting a broken selector.
    pub fn new<I, S>(names: I) -> Result<Self, TendenzaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !name.is_empty() && !out.contains(&name) {
                out.push(name);
            }
        }
        if out.is_empty() {
            return Err(TendenzaError::NoReferenceData);
        }
        Ok(Self(out))
    }

    /// Whether `name` is a member of the set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    /// First entry in the set's natural order.
    #[must_use]
    pub fn first(&self) -> &str {
        &self.0[0]
    }

    /// Number of countries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for interface symmetry with collection types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate member names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Members as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// One ranked term within a weekly date bucket.
///
/// `score` is optional because the source dataset carries NULL scores for
/// some weeks; `rank` is assigned by the ranking query and runs 1..=5 within
/// a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTermRow {
    /// Search term text.
    pub term: String,
    /// Weekly bucket date.
    pub date: NaiveDate,
    /// Relative interest score, when the source reports one.
    pub score: Option<i64>,
    /// Position within the bucket, 1-based.
    pub rank: u32,
}

/// Ordered ranking rows plus the selection that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Rows grouped by bucket date ascending, then rank ascending.
    pub rows: Vec<TopTermRow>,
    /// Provenance: the selection that drove the query.
    pub selection: Selection,
}

impl QueryResult {
    /// Check the structural invariants of a ranking result.
    ///
    /// Verifies that rows are grouped by strictly increasing bucket date,
    /// that each bucket carries gapless ranks `1..=n` with `n <= 5`, and
    /// that every bucket date falls inside the selection window.
    ///
    /// # Errors
    /// Returns `Data` describing the first violation found. The orchestrator
    /// runs this after every fresh fetch so a provider emitting a malformed
    /// ranking fails loudly instead of rendering garbage.
    pub fn validate(&self) -> Result<(), TendenzaError> {
        let mut bucket: Option<NaiveDate> = None;
        let mut expected_rank = 1u32;

        for row in &self.rows {
            if row.date < self.selection.start() || row.date > self.selection.end() {
                return Err(TendenzaError::Data(format!(
                    "bucket {} outside the selection window",
                    row.date
                )));
            }
            match bucket {
                Some(current) if row.date == current => {}
                Some(current) if row.date < current => {
                    return Err(TendenzaError::Data(format!(
                        "buckets out of order: {} after {current}",
                        row.date
                    )));
                }
                _ => {
                    bucket = Some(row.date);
                    expected_rank = 1;
                }
            }
            if row.rank != expected_rank {
                return Err(TendenzaError::Data(format!(
                    "bucket {} has rank {} where {expected_rank} was expected",
                    row.date, row.rank
                )));
            }
            if row.rank > MAX_RANK {
                return Err(TendenzaError::Data(format!(
                    "bucket {} exceeds {MAX_RANK} rows",
                    row.date
                )));
            }
            expected_rank += 1;
        }
        Ok(())
    }

    /// True when the query matched nothing in range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
