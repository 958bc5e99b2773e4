pub mod aggregation;
pub mod calendar;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod percentage;
pub mod reporting;
pub mod schema;
pub mod table;

#[cfg(feature = "python")]
mod python;

pub use aggregation::{get_district_sum, get_national_sum, get_sub_dfs, TraceCollection};
pub use calendar::{DateRange, Month, YearMonth, MONTH_ORDER};
pub use config::TransformConfig;
pub use error::DashError;
pub use filter::{filter_by_dates, filter_by_district, filter_by_indicator, filter_by_policy};
pub use percentage::{get_percentage, AggregationMode, PopulationTarget, Scope};
pub use reporting::{reporting_count_transform, ReportStatus, ReportingCounts};
pub use table::KeyedTable;

#[cfg(feature = "python")]
mod py_module {
    use pyo3::prelude::*;
    use pyo3::types::PyModule;

    use crate::python::DashboardTransformer;
    use crate::{calendar, schema};

    /// Export schema constants as Python submodules
    fn add_schema_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Index
        let index = PyModule::new(m.py(), "index")?;
        index.add("ID", schema::index::ID)?;
        index.add("DATE", schema::index::DATE)?;
        index.add("YEAR", schema::index::YEAR)?;
        index.add("MONTH", schema::index::MONTH)?;
        index.add("FACILITY_ID", schema::index::FACILITY_ID)?;
        index.add("FACILITY_NAME", schema::index::FACILITY_NAME)?;
        index.add("ALL", schema::index::ALL.to_vec())?;
        m.add_submodule(&index)?;

        // Population
        let population = PyModule::new(m.py(), "population")?;
        population.add("DISTRICT", schema::population::DISTRICT)?;
        population.add("YEAR", schema::population::YEAR)?;
        population.add("AGE", schema::population::AGE)?;
        m.add_submodule(&population)?;

        // Population target
        let target = PyModule::new(m.py(), "target")?;
        target.add("INDICATOR", schema::target::INDICATOR)?;
        target.add("SEX", schema::target::SEX)?;
        target.add("AGES", schema::target::AGES)?;
        m.add_submodule(&target)?;

        // Status
        let status = PyModule::new(m.py(), "status")?;
        status.add("POSITIVE", schema::status::POSITIVE)?;
        status.add("NO_POSITIVE", schema::status::NO_POSITIVE)?;
        status.add("NO_FORM_REPORT", schema::status::NO_FORM_REPORT)?;
        m.add_submodule(&status)?;

        m.add("MONTH_ORDER", calendar::MONTH_ORDER.to_vec())?;
        m.add("ABSOLUTE", schema::mode::ABSOLUTE)?;

        Ok(())
    }

    /// Module name must equal the `[lib] name` so Python finds `PyInit_coc_transform`.
    #[pymodule]
    pub(crate) fn coc_transform(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<DashboardTransformer>()?;
        add_schema_exports(m)?;
        Ok(())
    }

}
