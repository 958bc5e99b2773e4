//! Tests for trace splitting and district/national sums.

mod common;

use coc_transform::{get_district_sum, get_national_sum, get_sub_dfs, DashError, KeyedTable};
use common::{facility_frame, i64_values, str_values};

const KEY: [&str; 6] = ["id", "date", "year", "month", "facility_id", "facility_name"];

fn two_years() -> KeyedTable {
    let df = facility_frame(&[
        ("A", 2020, 1, 1),
        ("B", 2020, 1, 2),
        ("A", 2020, 3, 4),
        ("A", 2021, 2, 8),
        ("B", 2021, 2, 16),
        ("A", 2021, 1, 32),
    ]);
    KeyedTable::with_key(df, &KEY).unwrap()
}

#[test]
fn test_sub_dfs_one_trace_per_value() {
    let table = two_years();

    let traces = get_sub_dfs(&table, "year", &["2020", "2021"], &["month"], None).unwrap();

    assert_eq!(traces.names().collect::<Vec<_>>(), vec!["2020", "2021"]);
    let t2020 = traces.get("2020").unwrap();
    assert_eq!(str_values(t2020, "month"), vec!["Jan", "Mar"]);
    assert_eq!(i64_values(t2020, "value"), vec![Some(3), Some(4)]);
    let t2021 = traces.get("2021").unwrap();
    assert_eq!(str_values(t2021, "month"), vec!["Feb", "Jan"]);
    assert_eq!(i64_values(t2021, "value"), vec![Some(24), Some(32)]);
}

#[test]
fn test_sub_dfs_order_follows_calendar() {
    let table = two_years();
    let order = ["Jan", "Feb", "Mar"];

    let traces = get_sub_dfs(&table, "year", &["2020", "2021"], &["month"], Some(&order[..])).unwrap();

    let t2021 = traces.get("2021").unwrap();
    assert_eq!(str_values(t2021, "month"), vec!["Jan", "Feb", "Mar"]);
    assert_eq!(i64_values(t2021, "value"), vec![Some(32), Some(24), None]);
    let t2020 = traces.get("2020").unwrap();
    assert_eq!(i64_values(t2020, "value"), vec![Some(3), None, Some(4)]);
}

#[test]
fn test_sub_dfs_traces_add_up_to_whole_table() {
    let table = two_years();

    let traces = get_sub_dfs(&table, "id", &["A", "B"], &["year"], None).unwrap();

    let from_traces: i64 = traces
        .iter()
        .flat_map(|(_, df)| i64_values(df, "value"))
        .flatten()
        .sum();
    let whole: i64 = i64_values(table.frame(), "value").into_iter().flatten().sum();
    assert_eq!(from_traces, whole);
}

#[test]
fn test_sub_dfs_unknown_value_gives_empty_trace() {
    let table = two_years();

    let traces = get_sub_dfs(&table, "year", &["1999"], &["month"], None).unwrap();

    assert_eq!(traces.len(), 1);
    assert_eq!(traces.get("1999").unwrap().height(), 0);
}

#[test]
fn test_sub_dfs_requires_key_levels() {
    let table = two_years();

    let err = get_sub_dfs(&table, "value", &["1"], &["month"], None).unwrap_err();
    assert!(matches!(err, DashError::NotAKeyLevel(l) if l == "value"));

    let unkeyed = KeyedTable::unkeyed(table.into_frame());
    assert!(get_sub_dfs(&unkeyed, "year", &["2020"], &["month"], None).is_err());
}

#[test]
fn test_sub_dfs_order_needs_single_level() {
    let table = two_years();
    let order = ["Jan"];

    let err = get_sub_dfs(&table, "year", &["2020"], &["month", "id"], Some(&order[..])).unwrap_err();
    assert!(matches!(err, DashError::InvalidData(_)));
}

#[test]
fn test_district_sum_groups_by_id_and_month() {
    let df = facility_frame(&[("A", 2021, 1, 1), ("A", 2021, 1, 2), ("B", 2021, 1, 4)]);

    let out = get_district_sum(&df, "value").unwrap();

    assert_eq!(
        out.get_column_names_str(),
        vec!["id", "date", "year", "month", "value"]
    );
    assert_eq!(str_values(&out, "id"), vec!["A", "B"]);
    assert_eq!(i64_values(&out, "value"), vec![Some(3), Some(4)]);
}

#[test]
fn test_national_sum_collapses_districts() {
    let df = facility_frame(&[("A", 2021, 2, 1), ("B", 2021, 2, 2), ("B", 2021, 1, 4)]);

    let out = get_national_sum(&df, "value").unwrap();

    assert_eq!(out.get_column_names_str(), vec!["date", "year", "month", "value"]);
    assert_eq!(str_values(&out, "month"), vec!["Jan", "Feb"]);
    assert_eq!(i64_values(&out, "value"), vec![Some(4), Some(3)]);
}

#[test]
fn test_sum_missing_indicator_fails() {
    let df = facility_frame(&[("A", 2021, 1, 1)]);

    assert!(matches!(
        get_national_sum(&df, "tb_cases"),
        Err(DashError::ColumnNotFound(c)) if c == "tb_cases"
    ));
}
