//! Validation and repair of raw caller input.
//!
//! The normalizer never rejects what it can repair: out-of-order windows are
//! swapped, a single date expands to a one-day window, and an unknown or
//! missing country falls back to the default-country policy. What it cannot
//! repair does not reach it: an empty reference set fails upstream as
//! `NoReferenceData`.

use chrono::NaiveDate;

use tendenza_core::{CountrySet, Selection, TendenzaError};

/// Date input as a UI widget delivers it: one date or a (possibly
/// out-of-order) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    /// A single date; becomes a one-day window.
    Single(NaiveDate),
    /// A start/end pair, in whatever order the caller produced it.
    Range(NaiveDate, NaiveDate),
}

/// Unvalidated selection input from the UI collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSelection {
    /// Country pick, if the caller made one yet.
    pub country: Option<String>,
    /// Raw date input.
    pub dates: DateInput,
}

/// Pick the default country: the first preference present in the set, or
/// the set's first entry in natural order when none match.
#[must_use]
pub fn default_country<'a>(countries: &'a CountrySet, prefs: &'a [String]) -> &'a str {
    prefs
        .iter()
        .map(String::as_str)
        .find(|p| countries.contains(p))
        .unwrap_or_else(|| countries.first())
}

/// Produce a valid [`Selection`] from raw input.
///
/// - A single date becomes `(d, d)`.
/// - An inverted range is swapped silently; this is normalization, not an
///   error.
/// - A supplied country present in the set wins; anything else (missing or
///   unknown) is repaired by the default-country policy.
///
/// # Errors
/// Only propagates [`Selection::new`] failures, which cannot occur on
/// repaired input; the signature keeps the backstop visible.
pub fn normalize(
    raw: RawSelection,
    countries: &CountrySet,
    prefs: &[String],
) -> Result<Selection, TendenzaError> {
    let (start, end) = match raw.dates {
        DateInput::Single(d) => (d, d),
        DateInput::Range(a, b) if a > b => (b, a),
        DateInput::Range(a, b) => (a, b),
    };
    let country = match raw.country {
        Some(c) if countries.contains(&c) => c,
        _ => default_country(countries, prefs).to_owned(),
    };
    Selection::new(country, start, end)
}
