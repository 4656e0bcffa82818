#[path = "../common/mod.rs"]
mod common;

use lux::query::{FilterParams, FilterQuery, FilterRow, Search};

fn ids(rows: &[FilterRow]) -> Vec<i64> {
    rows.iter().map(|row| row.0).collect()
}

fn search(params: FilterParams) -> Vec<FilterRow> {
    let fixture = common::collection();
    FilterQuery::new(fixture.store())
        .search(&params)
        .unwrap()
        .data
}

#[test]
fn test_unconstrained_returns_everything_ordered_by_label() {
    let rows = search(FilterParams::default());
    assert_eq!(ids(&rows), vec![4, 5, 3, 1, 2]);
}

#[test]
fn test_label_match_is_case_insensitive() {
    let rows = search(FilterParams {
        label: Some("VASE".into()),
        ..Default::default()
    });
    assert_eq!(ids(&rows), vec![2]);
    assert_eq!(rows[0].1.as_deref(), Some("Vase with Handles"));
    assert_eq!(rows[0].2.as_deref(), Some("1905"));
}

#[test]
fn test_wildcards_in_input_match_literally() {
    let percent = search(FilterParams {
        label: Some("%".into()),
        ..Default::default()
    });
    assert_eq!(ids(&percent), vec![4]);

    let underscore = search(FilterParams {
        label: Some("_".into()),
        ..Default::default()
    });
    assert!(underscore.is_empty());
}

#[test]
fn test_agent_match_aggregates_per_object() {
    let rows = search(FilterParams {
        agent: Some("monet".into()),
        ..Default::default()
    });
    assert_eq!(ids(&rows), vec![1]);
    assert_eq!(rows[0].3.as_deref(), Some("Claude Monet"));

    let mut classifiers: Vec<&str> = rows[0].4.as_deref().unwrap().split(',').collect();
    classifiers.sort_unstable();
    assert_eq!(classifiers, vec!["Oil", "Paintings"]);
}

fn names(column: &Option<String>) -> Vec<&str> {
    let mut names: Vec<&str> = column.as_deref().unwrap_or_default().split(',').collect();
    names.sort_unstable();
    names
}

#[test]
fn test_classifier_match_keeps_every_classifier() {
    let rows = search(FilterParams {
        classifier: Some("oil".into()),
        ..Default::default()
    });
    assert_eq!(ids(&rows), vec![1]);
    assert_eq!(names(&rows[0].4), vec!["Oil", "Paintings"]);
}

#[test]
fn test_agent_match_keeps_every_agent() {
    let rows = search(FilterParams {
        agent: Some("potter".into()),
        ..Default::default()
    });
    assert_eq!(ids(&rows), vec![2]);
    assert_eq!(names(&rows[0].3), vec!["Anonymous Potter", "Studio Workshop"]);
}

#[test]
fn test_row_is_the_same_whatever_matched_it() {
    let unconstrained = search(FilterParams::default());
    let by_department = search(FilterParams {
        department: Some("european".into()),
        ..Default::default()
    });

    let expected = unconstrained.iter().find(|row| row.0 == 1).unwrap();
    assert_eq!(by_department.len(), 1);
    assert_eq!(names(&by_department[0].3), names(&expected.3));
    assert_eq!(names(&by_department[0].4), names(&expected.4));
}

#[test]
fn test_predicates_are_anded() {
    let rows = search(FilterParams {
        department: Some("decorative".into()),
        ..Default::default()
    });
    assert_eq!(ids(&rows), vec![4, 2]);

    let rows = search(FilterParams {
        department: Some("decorative".into()),
        classifier: Some("ceramic".into()),
        ..Default::default()
    });
    assert_eq!(ids(&rows), vec![2]);

    let rows = search(FilterParams {
        department: Some("decorative".into()),
        agent: Some("monet".into()),
        ..Default::default()
    });
    assert!(rows.is_empty());
}

#[test]
fn test_row_limit_caps_response() {
    let fixture = common::collection();
    let response = FilterQuery::new(fixture.store())
        .with_row_limit(2)
        .search(&FilterParams::default())
        .unwrap();
    assert_eq!(ids(&response.data), vec![4, 5]);
    assert_eq!(response.columns[0], "ID");
}
