use chrono::{Datelike, Days, NaiveDate, Weekday};
use tendenza_core::types::MAX_RANK;
use tendenza_core::{QueryResult, Selection, TopTermRow};

/// Candidate counts applied to successive buckets when the caller does not
/// override them.
pub const DEFAULT_BUCKET_SIZES: &[usize] = &[6, 3, 7, 5];

const TERM_POOL: &[&str] = &[
    "basketball",
    "concert",
    "earthquake",
    "election",
    "football",
    "heatwave",
    "holiday",
    "lottery",
    "movie",
    "recipe",
    "typhoon",
    "weather",
];

/// All weekly bucket dates (Sundays) inside the inclusive window.
pub fn weekly_buckets(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = start;
    while d <= end && d.weekday() != Weekday::Sun {
        match d.succ_opt() {
            Some(next) => d = next,
            None => return out,
        }
    }
    while d <= end {
        out.push(d);
        match d.checked_add_days(Days::new(7)) {
            Some(next) => d = next,
            None => break,
        }
    }
    out
}

// Candidates rotate through the pool per bucket so adjacent weeks differ.
fn candidates(bucket: NaiveDate, n: usize) -> Vec<(String, i64)> {
    let offset = (bucket.ordinal() as usize / 7) % TERM_POOL.len();
    (0..n)
        .map(|i| {
            let term = TERM_POOL[(offset + i) % TERM_POOL.len()].to_owned();
            let score = 100 - 7 * i as i64;
            (term, score)
        })
        .collect()
}

/// Rank candidates the way the warehouse query does: score descending, term
/// ascending on ties, top five survive.
fn rank_bucket(bucket: NaiveDate, mut cands: Vec<(String, i64)>) -> Vec<TopTermRow> {
    cands.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    cands
        .into_iter()
        .take(MAX_RANK as usize)
        .enumerate()
        .map(|(i, (term, score))| TopTermRow {
            term,
            date: bucket,
            score: Some(score),
            rank: i as u32 + 1,
        })
        .collect()
}

/// Deterministic ranking result for a selection.
pub fn for_selection(selection: &Selection, bucket_sizes: &[usize]) -> QueryResult {
    let mut rows = Vec::new();
    for (i, bucket) in weekly_buckets(selection.start(), selection.end())
        .into_iter()
        .enumerate()
    {
        let n = if bucket_sizes.is_empty() {
            0
        } else {
            bucket_sizes[i % bucket_sizes.len()]
        };
        rows.extend(rank_bucket(bucket, candidates(bucket, n)));
    }
    QueryResult {
        rows,
        selection: selection.clone(),
    }
}
