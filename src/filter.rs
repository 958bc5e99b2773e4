//! Row and column selection ahead of aggregation.

use std::collections::HashMap;

use polars::prelude::*;
use tracing::debug;

use crate::calendar::{epoch_days, DateRange};
use crate::error::DashError;
use crate::schema::index;
use crate::table::require_columns;

/// Look up one of several named tables. A missing key is not an error.
pub fn filter_by_policy<'a>(dfs: &'a HashMap<String, DataFrame>, key: &str) -> Option<&'a DataFrame> {
    let df = dfs.get(key);
    if df.is_none() {
        debug!(key, "no table for policy");
    }
    df
}

/// Keep `persist_columns` followed by the single `indicator` column.
///
/// Names listed more than once are kept once, at their first position.
pub fn filter_by_indicator<S: AsRef<str>>(
    df: &DataFrame,
    indicator: &str,
    persist_columns: &[S],
) -> Result<DataFrame, DashError> {
    let mut keep: Vec<&str> = Vec::with_capacity(persist_columns.len() + 1);
    for name in persist_columns.iter().map(AsRef::as_ref).chain([indicator]) {
        if !keep.contains(&name) {
            keep.push(name);
        }
    }
    require_columns(df, &keep)?;

    Ok(df.select(keep)?)
}

/// Restrict rows to `range`, sorted by date.
///
/// Rows come back in ascending date order unless the range is reversed, in
/// which case the order is flipped so it reads from reference to target.
pub fn filter_by_dates(df: &DataFrame, range: &DateRange) -> Result<DataFrame, DashError> {
    require_columns(df, &[index::DATE])?;

    let date = || col(index::DATE).cast(DataType::Date);
    let bound = |d| lit(epoch_days(d)).cast(DataType::Date);

    let mut lazy = df.clone().lazy().sort(
        [index::DATE],
        SortMultipleOptions::default().with_maintain_order(true),
    );
    if let Some(min) = range.min {
        lazy = lazy.filter(date().gt_eq(bound(min)));
    }
    if let Some(max) = range.max {
        lazy = lazy.filter(date().lt_eq(bound(max)));
    }
    if range.reversed {
        lazy = lazy.reverse();
    }

    let out = lazy.collect()?;
    debug!(
        rows_in = df.height(),
        rows_out = out.height(),
        reversed = range.reversed,
        "filtered by dates"
    );
    Ok(out)
}

/// Keep only the rows of one district/facility id.
pub fn filter_by_district(df: &DataFrame, district: &str) -> Result<DataFrame, DashError> {
    require_columns(df, &[index::ID])?;

    let out = df
        .clone()
        .lazy()
        .filter(col(index::ID).cast(DataType::String).eq(lit(district)))
        .collect()?;
    Ok(out)
}
