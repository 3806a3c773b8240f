use chrono::NaiveDate;
use tendenza_core::{ParameterType, QueryPlan, Selection, TableId, TendenzaError};

fn table() -> TableId {
    TableId::new("bigquery-public-data.google_trends.international_top_terms").unwrap()
}

fn selection() -> Selection {
    Selection::new(
        "Philippines",
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
    )
    .unwrap()
}

#[test]
fn top_terms_binds_three_typed_parameters() {
    let plan = QueryPlan::top_terms(&table(), &selection());

    assert_eq!(plan.params.len(), 3);
    assert_eq!(plan.params[0].name, "start_date");
    assert_eq!(plan.params[0].ty, ParameterType::Date);
    assert_eq!(plan.params[0].value, "2025-01-01");
    assert_eq!(plan.params[1].name, "end_date");
    assert_eq!(plan.params[1].ty, ParameterType::Date);
    assert_eq!(plan.params[1].value, "2025-02-01");
    assert_eq!(plan.params[2].name, "country");
    assert_eq!(plan.params[2].ty, ParameterType::String);
    assert_eq!(plan.params[2].value, "Philippines");
}

#[test]
fn top_terms_sql_references_parameters_not_values() {
    let plan = QueryPlan::top_terms(&table(), &selection());

    assert!(plan.sql.contains("@start_date"));
    assert!(plan.sql.contains("@end_date"));
    assert!(plan.sql.contains("@country"));
    // The bound values must never leak into the text.
    assert!(!plan.sql.contains("Philippines"));
    assert!(!plan.sql.contains("2025-01-01"));
}

#[test]
fn top_terms_sql_caps_each_bucket_at_five() {
    let plan = QueryPlan::top_terms(&table(), &selection());

    assert!(plan.sql.contains("ROW_NUMBER() OVER"));
    assert!(plan.sql.contains("PARTITION BY country_name, DATE(week)"));
    assert!(plan.sql.contains("WHERE rnk <= 5"));
    assert!(plan.sql.contains("ORDER BY date, rank"));
}

#[test]
fn top_terms_sql_breaks_score_ties_by_term() {
    let plan = QueryPlan::top_terms(&table(), &selection());
    assert!(plan.sql.contains("ORDER BY score DESC, term ASC"));
}

#[test]
fn countries_plan_is_parameterless_and_ordered() {
    let plan = QueryPlan::countries(&table());

    assert!(plan.params.is_empty());
    assert!(plan.sql.contains("SELECT DISTINCT country_name"));
    assert!(plan.sql.contains("country_name IS NOT NULL"));
    assert!(plan.sql.contains("ORDER BY country_name"));
}

#[test]
fn table_id_rejects_splice_attempts() {
    assert!(matches!(
        TableId::new("dataset.table` WHERE 1=1 --"),
        Err(TendenzaError::InvalidArg(_))
    ));
    assert!(matches!(
        TableId::new(""),
        Err(TendenzaError::InvalidArg(_))
    ));
    assert!(TableId::new("proj.dataset.table_v2").is_ok());
}

#[test]
fn selection_rejects_inverted_window_and_empty_country() {
    let a = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
    let b = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    assert!(matches!(
        Selection::new("France", a, b),
        Err(TendenzaError::InvalidArg(_))
    ));
    assert!(matches!(
        Selection::new("", b, a),
        Err(TendenzaError::InvalidArg(_))
    ));
}
