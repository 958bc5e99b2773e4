//! Month vocabulary and calendar-month date ranges.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::DashError;

/// Month abbreviations in calendar order.
pub const MONTH_ORDER: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Calendar number, Jan = 1 ... Dec = 12.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn as_str(self) -> &'static str {
        MONTH_ORDER[self as usize]
    }
}

impl FromStr for Month {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MONTH_ORDER
            .iter()
            .position(|m| *m == s)
            .map(|i| Month::ALL[i])
            .ok_or_else(|| DashError::UnknownMonth(s.to_string()))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar month in a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: Month,
}

impl YearMonth {
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// Build from the raw dropdown values.
    ///
    /// Returns `Ok(None)` when either part is missing or blank, so a
    /// half-filled pair behaves like an absent one.
    pub fn from_parts(year: Option<&str>, month: Option<&str>) -> Result<Option<Self>, DashError> {
        let (Some(year), Some(month)) = (
            year.map(str::trim).filter(|y| !y.is_empty()),
            month.map(str::trim).filter(|m| !m.is_empty()),
        ) else {
            return Ok(None);
        };

        let year: i32 = year
            .parse()
            .map_err(|_| DashError::InvalidYear(year.to_string()))?;
        Ok(Some(Self::new(year, month.parse()?)))
    }

    /// First day of the month.
    pub fn first_day(self) -> Result<NaiveDate, DashError> {
        NaiveDate::from_ymd_opt(self.year, self.month.number(), 1)
            .ok_or_else(|| DashError::InvalidYear(self.year.to_string()))
    }
}

/// Inclusive date bounds derived from a target and a reference month.
///
/// `min <= max` always holds when both are set. `reversed` records that the
/// reference month came after the target month, so rows should be read back
/// from reference to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
    pub reversed: bool,
}

impl DateRange {
    /// A missing reference leaves the range open below the target, a missing
    /// target leaves it open above the reference.
    pub fn new(target: Option<YearMonth>, reference: Option<YearMonth>) -> Result<Self, DashError> {
        match (target, reference) {
            (Some(target), Some(reference)) => {
                let target = target.first_day()?;
                let reference = reference.first_day()?;
                if reference <= target {
                    Ok(Self {
                        min: Some(reference),
                        max: Some(target),
                        reversed: false,
                    })
                } else {
                    Ok(Self {
                        min: Some(target),
                        max: Some(reference),
                        reversed: true,
                    })
                }
            }
            (Some(target), None) => Ok(Self {
                min: None,
                max: Some(target.first_day()?),
                reversed: false,
            }),
            (None, Some(reference)) => Ok(Self {
                min: Some(reference.first_day()?),
                max: None,
                reversed: false,
            }),
            (None, None) => Err(DashError::MissingDateBounds),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min.is_none_or(|min| date >= min) && self.max.is_none_or(|max| date <= max)
    }
}

/// Days since 1970-01-01, the physical representation of a polars `Date`.
pub(crate) fn epoch_days(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    date.signed_duration_since(epoch).num_days() as i32
}
