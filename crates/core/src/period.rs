//! Reporting periods and inclusive date windows.
//!
//! "Today" is always passed in by the caller so every window is reproducible.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing period codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Chart period is not one of 7, 30, 90, 365.
    #[error("Invalid period: {0}. Expected one of 7, 30, 90, 365")]
    InvalidChartPeriod(String),

    /// Stats period is not one of week, month, year.
    #[error("Invalid period: {0}. Expected one of week, month, year")]
    InvalidStatsPeriod(String),

    /// Window start is after its end.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange {
        /// Requested start.
        start: NaiveDate,
        /// Requested end.
        end: NaiveDate,
    },
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day, inclusive.
    pub start: NaiveDate,
    /// Last day, inclusive.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Creates a window, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The `days` calendar days ending on `end`, inclusive.
    #[must_use]
    pub fn ending_on(end: NaiveDate, days: u32) -> Self {
        let back = u64::from(days.max(1) - 1);
        let start = end.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// Number of days in the window.
    #[must_use]
    pub fn len_days(&self) -> u32 {
        let span = (self.end - self.start).num_days() + 1;
        u32::try_from(span).unwrap_or(u32::MAX)
    }

    /// Returns true if `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The window of equal length immediately before this one.
    #[must_use]
    pub fn previous(&self) -> Self {
        let end = self.start.pred_opt().unwrap_or(NaiveDate::MIN);
        Self::ending_on(end, self.len_days())
    }

    /// Iterates every day of the window, oldest first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Length of the chart and comparison windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartPeriod {
    /// 7 days.
    Week,
    /// 30 days.
    #[default]
    Month,
    /// 90 days.
    Quarter,
    /// 365 days.
    Year,
}

impl ChartPeriod {
    /// Number of days covered.
    #[must_use]
    pub const fn days(self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    /// The window of `days()` days ending today.
    #[must_use]
    pub fn window(self, today: NaiveDate) -> DateWindow {
        DateWindow::ending_on(today, self.days())
    }

    /// Parses an optional query value, defaulting to 30 days.
    pub fn parse_or_default(value: Option<&str>) -> Result<Self, PeriodError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(v) => v.parse(),
        }
    }
}

impl FromStr for ChartPeriod {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "7" => Ok(Self::Week),
            "30" => Ok(Self::Month),
            "90" => Ok(Self::Quarter),
            "365" => Ok(Self::Year),
            _ => Err(PeriodError::InvalidChartPeriod(s.to_string())),
        }
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.days())
    }
}

/// Calendar-aligned window for category statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    /// Since Monday of the current week.
    Week,
    /// Since the first day of the current month.
    #[default]
    Month,
    /// Since January 1 of the current year.
    Year,
}

impl StatsPeriod {
    /// The window from the start of the current period through today.
    #[must_use]
    pub fn window(self, today: NaiveDate) -> DateWindow {
        let start = match self {
            Self::Week => {
                let back = u64::from(today.weekday().num_days_from_monday());
                today.checked_sub_days(Days::new(back)).unwrap_or(today)
            }
            Self::Month => today.with_day(1).unwrap_or(today),
            Self::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
        };
        DateWindow { start, end: today }
    }

    /// Parses an optional query value, defaulting to month.
    pub fn parse_or_default(value: Option<&str>) -> Result<Self, PeriodError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(v) => v.parse(),
        }
    }
}

impl FromStr for StatsPeriod {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(PeriodError::InvalidStatsPeriod(s.to_string())),
        }
    }
}
