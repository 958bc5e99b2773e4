#![allow(dead_code)]

use chrono::NaiveDate;
use coc_transform::MONTH_ORDER;
use polars::prelude::*;

pub fn epoch_days(year: i32, month: u32) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap()
        .signed_duration_since(epoch)
        .num_days() as i32
}

pub fn date_column(months: &[(i32, u32)]) -> Column {
    let days: Vec<i32> = months.iter().map(|(y, m)| epoch_days(*y, *m)).collect();
    Series::new("date".into(), days)
        .cast(&DataType::Date)
        .unwrap()
        .into()
}

/// Facility rows `(id, year, month, value)` with the standard key columns and
/// one indicator column named `value`.
pub fn facility_frame(rows: &[(&str, i32, u32, i64)]) -> DataFrame {
    let ids: Vec<&str> = rows.iter().map(|r| r.0).collect();
    let months: Vec<(i32, u32)> = rows.iter().map(|r| (r.1, r.2)).collect();
    let years: Vec<i64> = rows.iter().map(|r| r.1 as i64).collect();
    let month_names: Vec<&str> = rows.iter().map(|r| MONTH_ORDER[r.2 as usize - 1]).collect();
    let names: Vec<String> = rows.iter().map(|r| format!("{} HC", r.0)).collect();
    let values: Vec<i64> = rows.iter().map(|r| r.3).collect();

    DataFrame::new(vec![
        Series::new("id".into(), ids.clone()).into(),
        date_column(&months),
        Series::new("year".into(), years).into(),
        Series::new("month".into(), month_names).into(),
        Series::new("facility_id".into(), ids).into(),
        Series::new("facility_name".into(), names).into(),
        Series::new("value".into(), values).into(),
    ])
    .unwrap()
}

pub fn i64_values(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
    df.column(name).unwrap().i64().unwrap().iter().collect()
}

pub fn f64_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name).unwrap().f64().unwrap().iter().collect()
}

pub fn str_values(df: &DataFrame, name: &str) -> Vec<String> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect()
}

pub fn date_days(df: &DataFrame) -> Vec<i32> {
    df.column("date")
        .unwrap()
        .cast(&DataType::Int32)
        .unwrap()
        .i32()
        .unwrap()
        .into_no_null_iter()
        .collect()
}
