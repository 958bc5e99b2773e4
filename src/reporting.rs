//! Per-date tallies of facility reporting status.

use polars::prelude::*;
use tracing::debug;

use crate::error::DashError;
use crate::schema::{index, status};
use crate::table::KeyedTable;

/// Reporting state of a facility for one month, as coded in status tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Positive,
    NoPositive,
    NoFormReport,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [
        ReportStatus::Positive,
        ReportStatus::NoPositive,
        ReportStatus::NoFormReport,
    ];

    /// Cell value marking this status.
    pub fn label(self) -> &'static str {
        match self {
            Self::Positive => status::POSITIVE,
            Self::NoPositive => status::NO_POSITIVE,
            Self::NoFormReport => status::NO_FORM_REPORT,
        }
    }

    /// Legend text shown in charts.
    pub fn description(self) -> &'static str {
        match self {
            Self::Positive => "Reported a positive number",
            Self::NoPositive => "Did not report a positive number",
            Self::NoFormReport => "Did not report on their 105:1 form",
        }
    }
}

/// Counts of facilities per date in each reporting status.
///
/// Each table is keyed by date and has one count column per status column
/// of the input.
#[derive(Debug, Clone)]
pub struct ReportingCounts {
    pub positive: KeyedTable,
    pub no_positive: KeyedTable,
    pub no_form_report: KeyedTable,
}

impl ReportingCounts {
    pub fn get(&self, status: ReportStatus) -> &KeyedTable {
        match status {
            ReportStatus::Positive => &self.positive,
            ReportStatus::NoPositive => &self.no_positive,
            ReportStatus::NoFormReport => &self.no_form_report,
        }
    }

    /// `(description, table)` pairs in legend order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &KeyedTable)> {
        ReportStatus::ALL
            .into_iter()
            .map(move |s| (s.description(), self.get(s)))
    }
}

/// For each date, count the cells of every status column equal to `label`.
///
/// Dates appear in order of first occurrence.
pub fn count_label(table: &KeyedTable, label: &str) -> Result<KeyedTable, DashError> {
    table.require_key_level(index::DATE)?;

    let counts: Vec<Expr> = table
        .value_columns()
        .iter()
        .map(|c| {
            col(c.as_str())
                .cast(DataType::String)
                .eq(lit(label))
                .sum()
                .cast(DataType::Int64)
                .alias(c.as_str())
        })
        .collect();

    let out = table
        .frame()
        .clone()
        .lazy()
        .group_by_stable([col(index::DATE)])
        .agg(counts)
        .collect()?;
    KeyedTable::with_key(out, &[index::DATE])
}

/// Tally, per date, how many facilities fell into each reporting status.
///
/// `data` is rekeyed by `index_columns` first, which must include `id` and
/// `date`; every other non-key column is treated as a status column.
pub fn reporting_count_transform<S: AsRef<str>>(
    data: KeyedTable,
    index_columns: &[S],
) -> Result<ReportingCounts, DashError> {
    let data = data.check_index(index_columns)?.drop_level(index::ID)?;

    let counts = ReportingCounts {
        positive: count_label(&data, ReportStatus::Positive.label())?,
        no_positive: count_label(&data, ReportStatus::NoPositive.label())?,
        no_form_report: count_label(&data, ReportStatus::NoFormReport.label())?,
    };

    debug!(
        dates = counts.positive.height(),
        columns = data.value_columns().len(),
        "counted reporting status"
    );
    Ok(counts)
}
