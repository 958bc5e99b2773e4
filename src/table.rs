//! Tables addressed by a composite key.
//!
//! polars frames carry no row index, so the key is kept as metadata next to
//! the frame and the key columns are placed first.

use polars::prelude::*;
use tracing::debug;

use crate::error::DashError;

#[derive(Debug, Clone)]
pub struct KeyedTable {
    frame: DataFrame,
    key: Vec<String>,
}

impl KeyedTable {
    /// Wrap a frame without a key.
    pub fn unkeyed(frame: DataFrame) -> Self {
        Self {
            frame,
            key: Vec::new(),
        }
    }

    /// Wrap a frame keyed by `key`. The key columns must exist.
    pub fn with_key<S: AsRef<str>>(frame: DataFrame, key: &[S]) -> Result<Self, DashError> {
        let key: Vec<String> = key.iter().map(|k| k.as_ref().to_string()).collect();
        require_columns(&frame, &key)?;

        let mut ordered: Vec<String> = key.clone();
        ordered.extend(
            frame
                .get_column_names_str()
                .iter()
                .filter(|c| !key.iter().any(|k| k == *c))
                .map(|c| c.to_string()),
        );
        let frame = frame.select(ordered)?;

        Ok(Self { frame, key })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn key(&self) -> &[String] {
        &self.key
    }

    pub fn is_keyed(&self) -> bool {
        !self.key.is_empty()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Columns that are not part of the key, in frame order.
    pub fn value_columns(&self) -> Vec<String> {
        self.frame
            .get_column_names_str()
            .iter()
            .filter(|c| !self.key.iter().any(|k| k == *c))
            .map(|c| c.to_string())
            .collect()
    }

    /// Ensure the table is keyed by `expected`, rekeying when it is not.
    ///
    /// An unkeyed table never matches. Applying this twice gives the same
    /// table as applying it once.
    pub fn check_index<S: AsRef<str>>(self, expected: &[S]) -> Result<Self, DashError> {
        let matches = self.key.len() == expected.len()
            && self
                .key
                .iter()
                .zip(expected)
                .all(|(have, want)| have == want.as_ref());
        if matches {
            return Ok(self);
        }

        debug!(current = ?self.key, "rekeying table");
        Self::with_key(self.frame, expected)
    }

    /// Remove a key level together with its column.
    pub fn drop_level(mut self, level: &str) -> Result<Self, DashError> {
        let pos = self
            .key
            .iter()
            .position(|k| k == level)
            .ok_or_else(|| DashError::NotAKeyLevel(level.to_string()))?;
        self.key.remove(pos);
        self.frame = self.frame.drop(level)?;
        Ok(self)
    }

    pub(crate) fn require_key_level(&self, level: &str) -> Result<(), DashError> {
        if self.key.iter().any(|k| k == level) {
            Ok(())
        } else {
            Err(DashError::NotAKeyLevel(level.to_string()))
        }
    }
}

pub(crate) fn require_columns<S: AsRef<str>>(df: &DataFrame, required: &[S]) -> Result<(), DashError> {
    for name in required {
        let name = name.as_ref();
        if df.column(name).is_err() {
            return Err(DashError::ColumnNotFound(name.to_string()));
        }
    }
    Ok(())
}

/// Whether a column can take part in a group sum.
pub(crate) fn is_summable(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
            | DataType::Boolean
    )
}

pub(crate) fn cols<S: AsRef<str>>(names: &[S]) -> Vec<Expr> {
    names.iter().map(|n| col(n.as_ref())).collect()
}
