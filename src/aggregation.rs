use polars::prelude::*;
use tracing::{debug, warn};

use crate::error::DashError;
use crate::schema::index;
use crate::table::{cols, is_summable, require_columns, KeyedTable};

const ORDER_COL: &str = "__order";

/// Named sub-tables split off one table, one per chart series.
///
/// Traces keep the order in which their values were requested.
#[derive(Debug, Clone, Default)]
pub struct TraceCollection {
    traces: Vec<(String, DataFrame)>,
}

impl TraceCollection {
    pub fn get(&self, name: &str) -> Option<&DataFrame> {
        self.traces
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, df)| df)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.traces.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataFrame)> {
        self.traces.iter().map(|(n, df)| (n.as_str(), df))
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    fn insert(&mut self, name: &str, df: DataFrame) {
        match self.traces.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = df,
            None => self.traces.push((name.to_string(), df)),
        }
    }
}

impl IntoIterator for TraceCollection {
    type Item = (String, DataFrame);
    type IntoIter = std::vec::IntoIter<(String, DataFrame)>;

    fn into_iter(self) -> Self::IntoIter {
        self.traces.into_iter()
    }
}

/// Split `table` into one trace per value of the `select_index` key level.
///
/// Each trace is group-summed by `new_index` and sorted by it. With `order`,
/// rows are rearranged to follow it (single-level `new_index` only); order
/// values without data become all-null rows.
pub fn get_sub_dfs<S: AsRef<str>>(
    table: &KeyedTable,
    select_index: &str,
    values: &[S],
    new_index: &[S],
    order: Option<&[S]>,
) -> Result<TraceCollection, DashError> {
    table.require_key_level(select_index)?;
    for level in new_index {
        table.require_key_level(level.as_ref())?;
    }
    if order.is_some() && new_index.len() != 1 {
        return Err(DashError::InvalidData(format!(
            "reordering needs exactly one grouping level, got {}",
            new_index.len()
        )));
    }

    let frame = table.frame();
    let sums: Vec<Expr> = frame
        .get_columns()
        .iter()
        .filter(|c| !table.key().iter().any(|k| k.as_str() == c.name().as_str()))
        .filter(|c| is_summable(c.dtype()))
        .map(|c| col(c.name().as_str()).sum())
        .collect();
    let group_by = cols(new_index);

    let mut traces = TraceCollection::default();
    for value in values {
        let value = value.as_ref();
        let mut sub_df = frame
            .clone()
            .lazy()
            .filter(col(select_index).cast(DataType::String).eq(lit(value)))
            .group_by(group_by.clone())
            .agg(sums.clone())
            .sort(
                new_index.iter().map(|n| n.as_ref()).collect::<Vec<_>>(),
                SortMultipleOptions::default(),
            )
            .collect()?;

        if sub_df.height() == 0 {
            warn!(select_index, value, "no rows for trace");
        }
        if let Some(order) = order {
            sub_df = reindex(sub_df, new_index[0].as_ref(), order)?;
        }
        traces.insert(value, sub_df);
    }

    debug!(select_index, traces = traces.len(), "split into traces");
    Ok(traces)
}

/// Rearrange rows to follow `order` on column `by`, like pandas `reindex`.
fn reindex<S: AsRef<str>>(df: DataFrame, by: &str, order: &[S]) -> Result<DataFrame, DashError> {
    let dtype = df.column(by)?.dtype().clone();
    let labels: Vec<&str> = order.iter().map(AsRef::as_ref).collect();
    let order_series = Series::new(by.into(), labels).cast(&dtype)?;

    let columns: Vec<Expr> = df
        .get_column_names_str()
        .iter()
        .map(|c| col(*c))
        .collect();

    let out = DataFrame::new(vec![order_series.into()])?
        .lazy()
        .with_row_index(ORDER_COL, None)
        .join(
            df.lazy(),
            [col(by)],
            [col(by)],
            JoinArgs::new(JoinType::Left),
        )
        .sort([ORDER_COL], SortMultipleOptions::default())
        .select(columns)
        .collect()?;
    Ok(out)
}

/// Sum `indicator` per district and month. Returns a flat table.
pub fn get_district_sum(df: &DataFrame, indicator: &str) -> Result<DataFrame, DashError> {
    group_sum(
        df,
        &[index::ID, index::DATE, index::YEAR, index::MONTH],
        indicator,
    )
}

/// Sum `indicator` over the whole country per month. Returns a flat table.
pub fn get_national_sum(df: &DataFrame, indicator: &str) -> Result<DataFrame, DashError> {
    group_sum(df, &[index::DATE, index::YEAR, index::MONTH], indicator)
}

pub(crate) fn group_sum(df: &DataFrame, keys: &[&str], indicator: &str) -> Result<DataFrame, DashError> {
    require_columns(df, keys)?;
    require_columns(df, &[indicator])?;

    let out = df
        .clone()
        .lazy()
        .group_by(cols(keys))
        .agg([col(indicator).sum()])
        .sort(keys.to_vec(), SortMultipleOptions::default())
        .collect()?;
    Ok(out)
}
