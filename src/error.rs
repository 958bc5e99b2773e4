use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("'{0}' is not a key level of the table")]
    NotAKeyLevel(String),

    #[error("Unknown month: '{0}'. Expected one of Jan..Dec")]
    UnknownMonth(String),

    #[error("Invalid year: '{0}'")]
    InvalidYear(String),

    #[error("At least one (year, month) pair is required to filter by dates")]
    MissingDateBounds,

    #[error("No population target defined for indicator '{0}'")]
    PopulationTargetNotFound(String),

    #[error("InvalidData: {0}")]
    InvalidData(String),

    #[error("Config: {0}")]
    Config(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(feature = "python")]
impl From<DashError> for pyo3::PyErr {
    fn from(err: DashError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};

        match err {
            DashError::ColumnNotFound(_)
            | DashError::NotAKeyLevel(_)
            | DashError::PopulationTargetNotFound(_) => PyKeyError::new_err(err.to_string()),
            DashError::UnknownMonth(_)
            | DashError::InvalidYear(_)
            | DashError::MissingDateBounds
            | DashError::InvalidData(_) => PyValueError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}
