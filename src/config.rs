use std::path::Path;

use serde::Deserialize;

use crate::error::DashError;
use crate::schema::{index, population};

/// Settings shared by all transformations of one dashboard.
///
/// Every field is optional in the JSON form and falls back to the default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Expected composite key of raw facility tables.
    pub index_columns: Vec<String>,
    /// Columns kept next to the indicator by `filter_by_indicator`.
    pub persist_columns: Vec<String>,
    /// Months per population year; monthly counts are scaled by this.
    pub annualization_factor: f64,
    pub population: PopulationColumns,
    /// Default filter for `logging::init_logging`.
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopulationColumns {
    pub district_column: String,
    pub year_column: String,
    pub age_column: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            index_columns: index::ALL.iter().map(|c| c.to_string()).collect(),
            persist_columns: Vec::new(),
            annualization_factor: 12.0,
            population: PopulationColumns::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for PopulationColumns {
    fn default() -> Self {
        Self {
            district_column: population::DISTRICT.to_string(),
            year_column: population::YEAR.to_string(),
            age_column: population::AGE.to_string(),
        }
    }
}

impl TransformConfig {
    pub fn from_json_str(json: &str) -> Result<Self, DashError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DashError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), DashError> {
        if self.index_columns.is_empty() {
            return Err(DashError::Config("index_columns must not be empty".into()));
        }
        if !self.annualization_factor.is_finite() || self.annualization_factor <= 0.0 {
            return Err(DashError::Config(format!(
                "annualization_factor must be positive, got {}",
                self.annualization_factor
            )));
        }
        Ok(())
    }
}
