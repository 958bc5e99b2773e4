//! Conversion of monthly indicator counts into rates over a target
//! population.

use polars::prelude::*;
use tracing::{debug, warn};

use crate::aggregation::group_sum;
use crate::config::TransformConfig;
use crate::error::DashError;
use crate::schema::{index, mode, target};
use crate::table::{cols, require_columns, KeyedTable};

/// How indicator values are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMode {
    Absolute,
    Percentage,
}

impl AggregationMode {
    /// `"Absolute"` selects raw counts, anything else a population rate.
    pub fn from_label(label: &str) -> Self {
        if label == mode::ABSOLUTE {
            Self::Absolute
        } else {
            Self::Percentage
        }
    }
}

/// Geographic level results are grouped at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    District,
    Country,
}

impl Scope {
    pub fn from_all_country(all_country: bool) -> Self {
        if all_country {
            Self::Country
        } else {
            Self::District
        }
    }

    /// Key of the returned table.
    pub fn index(self) -> &'static [&'static str] {
        match self {
            Self::District => &[index::ID, index::YEAR, index::MONTH, index::DATE],
            Self::Country => &[index::YEAR, index::MONTH, index::DATE],
        }
    }

    fn data_join_keys(self) -> &'static [&'static str] {
        match self {
            Self::District => &[index::ID, index::YEAR],
            Self::Country => &[index::YEAR],
        }
    }

    fn population_join_keys(self, config: &TransformConfig) -> Vec<String> {
        let pop = &config.population;
        match self {
            Self::District => vec![pop.district_column.clone(), pop.year_column.clone()],
            Self::Country => vec![pop.year_column.clone()],
        }
    }
}

/// Demographic selector for an indicator's denominator population.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationTarget {
    /// Population column to divide by (e.g. `female`, `total`).
    pub sex: String,
    pub ages: Vec<String>,
}

impl PopulationTarget {
    /// Read the target for `indicator` from the specification table.
    ///
    /// The first matching row in input order is used.
    pub fn parse(targets: &DataFrame, indicator: &str) -> Result<Self, DashError> {
        require_columns(targets, &[target::INDICATOR, target::SEX, target::AGES])?;

        let rows = targets
            .clone()
            .lazy()
            .filter(col(target::INDICATOR).cast(DataType::String).eq(lit(indicator)))
            .select([
                col(target::SEX).cast(DataType::String),
                col(target::AGES).cast(DataType::String),
            ])
            .collect()?;

        if rows.height() == 0 {
            return Err(DashError::PopulationTargetNotFound(indicator.to_string()));
        }
        if rows.height() > 1 {
            warn!(
                indicator,
                rows = rows.height(),
                "several population targets, using the first"
            );
        }

        let sex = rows
            .column(target::SEX)?
            .str()?
            .get(0)
            .ok_or_else(|| DashError::InvalidData(format!("null sex for indicator '{indicator}'")))?
            .trim()
            .to_string();
        let ages = rows
            .column(target::AGES)?
            .str()?
            .get(0)
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        Ok(Self { sex, ages })
    }
}

/// Group `data` by `scope` and, outside `Absolute` mode, divide by the
/// target population to get an annualised rate.
///
/// Rows whose population is zero or missing get a null value.
pub fn get_percentage(
    data: &DataFrame,
    population: &DataFrame,
    targets: &DataFrame,
    aggregation: AggregationMode,
    indicator: &str,
    scope: Scope,
    config: &TransformConfig,
) -> Result<KeyedTable, DashError> {
    let key = scope.index();

    if aggregation == AggregationMode::Absolute {
        let summed = group_sum(data, key, indicator)?;
        return KeyedTable::with_key(summed, key);
    }

    let pop_target = PopulationTarget::parse(targets, indicator)?;
    let pop_cols = &config.population;
    let pop_keys = scope.population_join_keys(config);
    let data_keys = scope.data_join_keys();
    require_columns(population, &pop_keys)?;
    require_columns(population, &[pop_cols.age_column.as_str(), pop_target.sex.as_str()])?;

    let ages = Series::new("ages".into(), pop_target.ages.clone());
    let pop_in = population
        .clone()
        .lazy()
        .filter(
            col(pop_cols.age_column.as_str())
                .cast(DataType::String)
                .is_in(lit(ages).implode(), false),
        )
        .with_columns(join_key_casts(&pop_keys, &pop_cols.year_column))
        .group_by(cols(&pop_keys))
        .agg([col(pop_target.sex.as_str()).cast(DataType::Float64).sum()]);

    let data_in = group_sum(data, key, indicator)?
        .lazy()
        .with_columns(join_key_casts(data_keys, index::YEAR));

    let sex = pop_target.sex.as_str();
    let rate = col(indicator).cast(DataType::Float64) / col(sex) * lit(config.annualization_factor);

    let out = data_in
        .join(
            pop_in,
            cols(data_keys),
            cols(&pop_keys),
            JoinArgs::new(JoinType::Left),
        )
        .group_by(cols(key))
        .agg([col(indicator).sum(), col(sex).sum()])
        .with_column(
            when(col(sex).eq(lit(0.0)))
                .then(lit(NULL).cast(DataType::Float64))
                .otherwise(rate)
                .alias(indicator),
        )
        .select(cols(key).into_iter().chain([col(indicator)]).collect::<Vec<_>>())
        .sort(key.to_vec(), SortMultipleOptions::default())
        .collect()?;

    debug!(
        indicator,
        sex,
        ages = ?pop_target.ages,
        rows = out.height(),
        "computed population rate"
    );
    KeyedTable::with_key(out, key)
}

/// Join keys compare as strings, except the year which compares as an integer.
fn join_key_casts<S: AsRef<str>>(keys: &[S], year: &str) -> Vec<Expr> {
    keys.iter()
        .map(|k| {
            let k = k.as_ref();
            if k == year {
                col(k).cast(DataType::Int64)
            } else {
                col(k).cast(DataType::String)
            }
        })
        .collect()
}
