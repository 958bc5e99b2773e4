use std::collections::HashMap;

use pyo3::prelude::*;
use pyo3::types::PyDict;
use pyo3_polars::PyDataFrame;

use crate::aggregation;
use crate::calendar::{DateRange, YearMonth};
use crate::config::TransformConfig;
use crate::error::DashError;
use crate::filter;
use crate::logging::{self, LogConfig};
use crate::percentage::{self, AggregationMode, Scope};
use crate::reporting;
use crate::table::KeyedTable;

/// Transformation entry points for the dashboard callbacks.
///
/// Tables cross the boundary as polars frames with key columns first; polars
/// has no index, so the key travels as column order only.
#[pyclass]
pub struct DashboardTransformer {
    config: TransformConfig,
}

#[pymethods]
impl DashboardTransformer {
    #[new]
    #[pyo3(signature = (config_path=None))]
    fn new(config_path: Option<&str>) -> PyResult<Self> {
        let config = match config_path {
            Some(path) => TransformConfig::from_json_file(path)?,
            None => TransformConfig::default(),
        };
        logging::init_logging(&LogConfig::from(&config));
        Ok(Self { config })
    }

    // ── Indexing ────────────────────────────────────────────────────────────

    /// Reorder so the expected key columns come first.
    #[pyo3(signature = (df, index=None))]
    fn check_index(&self, df: PyDataFrame, index: Option<Vec<String>>) -> PyResult<PyDataFrame> {
        let expected = index.unwrap_or_else(|| self.config.index_columns.clone());
        let table = logging::timed("check_index", || {
            KeyedTable::unkeyed(df.0).check_index(&expected)
        })?;
        Ok(PyDataFrame(table.into_frame()))
    }

    // ── Filtering ───────────────────────────────────────────────────────────

    #[staticmethod]
    fn filter_df_by_policy(dfs: HashMap<String, PyDataFrame>, key: &str) -> Option<PyDataFrame> {
        let dfs: HashMap<String, _> = dfs.into_iter().map(|(k, v)| (k, v.0)).collect();
        filter::filter_by_policy(&dfs, key).cloned().map(PyDataFrame)
    }

    /// Keep the persist columns plus one indicator column.
    #[pyo3(signature = (df, indicator, persist_columns=None))]
    fn filter_df_by_indicator(
        &self,
        df: PyDataFrame,
        indicator: &str,
        persist_columns: Option<Vec<String>>,
    ) -> PyResult<PyDataFrame> {
        let persist = persist_columns.unwrap_or_else(|| self.config.persist_columns.clone());
        let out = filter::filter_by_indicator(&df.0, indicator, &persist)?;
        Ok(PyDataFrame(out))
    }

    #[staticmethod]
    #[pyo3(signature = (df, target_year=None, target_month=None, reference_year=None, reference_month=None))]
    fn filter_df_by_dates(
        df: PyDataFrame,
        target_year: Option<&str>,
        target_month: Option<&str>,
        reference_year: Option<&str>,
        reference_month: Option<&str>,
    ) -> PyResult<PyDataFrame> {
        let out = logging::timed("filter_df_by_dates", || -> Result<_, DashError> {
            let range = DateRange::new(
                YearMonth::from_parts(target_year, target_month)?,
                YearMonth::from_parts(reference_year, reference_month)?,
            )?;
            filter::filter_by_dates(&df.0, &range)
        })?;
        Ok(PyDataFrame(out))
    }

    #[staticmethod]
    fn filter_by_district(df: PyDataFrame, district: &str) -> PyResult<PyDataFrame> {
        Ok(PyDataFrame(filter::filter_by_district(&df.0, district)?))
    }

    // ── Aggregation ─────────────────────────────────────────────────────────

    /// Split into traces keyed by `values`; `df` must carry `key` columns.
    #[staticmethod]
    #[pyo3(signature = (df, key, select_index, values, new_index, order=None))]
    fn get_sub_dfs<'py>(
        py: Python<'py>,
        df: PyDataFrame,
        key: Vec<String>,
        select_index: &str,
        values: Vec<String>,
        new_index: Vec<String>,
        order: Option<Vec<String>>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let traces = logging::timed("get_sub_dfs", || -> Result<_, DashError> {
            let table = KeyedTable::with_key(df.0, &key)?;
            aggregation::get_sub_dfs(&table, select_index, &values, &new_index, order.as_deref())
        })?;

        let dict = PyDict::new(py);
        for (name, trace) in traces {
            dict.set_item(name, PyDataFrame(trace))?;
        }
        Ok(dict)
    }

    #[staticmethod]
    fn get_district_sum(df: PyDataFrame, indicator: &str) -> PyResult<PyDataFrame> {
        Ok(PyDataFrame(aggregation::get_district_sum(&df.0, indicator)?))
    }

    #[staticmethod]
    fn get_national_sum(df: PyDataFrame, indicator: &str) -> PyResult<PyDataFrame> {
        Ok(PyDataFrame(aggregation::get_national_sum(&df.0, indicator)?))
    }

    // ── Population rates ────────────────────────────────────────────────────

    /// `ind_type` other than "Absolute" divides by the target population.
    #[pyo3(signature = (df, pop, pop_tgt, ind_type, indicator, all_country=false))]
    fn get_percentage(
        &self,
        df: PyDataFrame,
        pop: PyDataFrame,
        pop_tgt: PyDataFrame,
        ind_type: &str,
        indicator: &str,
        all_country: bool,
    ) -> PyResult<PyDataFrame> {
        let table = logging::timed("get_percentage", || {
            percentage::get_percentage(
                &df.0,
                &pop.0,
                &pop_tgt.0,
                AggregationMode::from_label(ind_type),
                indicator,
                Scope::from_all_country(all_country),
                &self.config,
            )
        })?;
        Ok(PyDataFrame(table.into_frame()))
    }

    // ── Reporting status ────────────────────────────────────────────────────

    /// Returns {description: per-date counts}.
    fn reporting_count_transform<'py>(
        &self,
        py: Python<'py>,
        data: PyDataFrame,
    ) -> PyResult<Bound<'py, PyDict>> {
        let counts = logging::timed("reporting_count_transform", || {
            reporting::reporting_count_transform(
                KeyedTable::unkeyed(data.0),
                &self.config.index_columns,
            )
        })?;

        let dict = PyDict::new(py);
        for (description, table) in counts.iter() {
            dict.set_item(description, PyDataFrame(table.frame().clone()))?;
        }
        Ok(dict)
    }
}
