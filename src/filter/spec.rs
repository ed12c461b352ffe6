//! Filter configuration — which rows of a dataset to keep.
//!
//! Purpose
//! -------
//! Collect every filtering option in one explicit structure so call sites
//! state their intent (inclusion ranges, clock windows, weekdays, months,
//! exclusions) instead of passing ad-hoc flags.
//!
//! Key behaviors
//! -------------
//! - [`FilterSpec`] fields are independently optional; `None` disables the
//!   stage. `FilterSpec::default()` keeps every row.
//! - Builder methods chain: `FilterSpec::new().include(..).times(..)`.
//! - [`TimeWindow`] is an inclusive clock window that may wrap past
//!   midnight (`23:00`–`04:00`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Weekday numbers lie in `0..=6` (Monday = 0) and months in `1..=12`;
//!   the validating builders enforce this and [`FilterSpec::validate`]
//!   re-checks specs whose fields were set directly.
//!
//! Testing notes
//! -------------
//! - Unit tests cover window parsing and wrap-around, set validation, and
//!   builder chaining.
use std::{collections::BTreeSet, str::FromStr};

use chrono::{NaiveTime, Weekday};

use crate::{
    filter::errors::{FilterError, FilterResult},
    range::{DateRange, RangeToken},
};

/// `TimeWindow` — inclusive time-of-day window.
///
/// When `start <= end` a time `t` matches iff `start <= t <= end`. When
/// `start > end` the window wraps past midnight and `t` matches iff
/// `t >= start` or `t <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        TimeWindow { start, end }
    }

    /// Parse a window from two `"HH:MM"` (or `"HH:MM:SS"`) strings.
    pub fn parse(start: &str, end: &str) -> FilterResult<Self> {
        Ok(TimeWindow { start: parse_clock(start)?, end: parse_clock(end)? })
    }

    pub fn contains(&self, time: &NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= *time && *time <= self.end
        } else {
            *time >= self.start || *time <= self.end
        }
    }
}

impl FromStr for TimeWindow {
    type Err = FilterError;

    /// Parse `"HH:MM-HH:MM"`.
    fn from_str(text: &str) -> FilterResult<Self> {
        let (start, end) = text
            .split_once('-')
            .ok_or_else(|| FilterError::InvalidTimeOfDay { text: text.to_string() })?;
        TimeWindow::parse(start.trim(), end.trim())
    }
}

/// `FilterSpec` — optional filtering stages applied in a fixed order.
///
/// Fields
/// ------
/// - `include`: `Option<DateRange>`
///   Keep only rows selected by this range (resolved against the input).
/// - `times`: `Option<Vec<TimeWindow>>`
///   Keep rows whose clock time falls in any window; windows are unioned.
/// - `days_of_week`: `Option<BTreeSet<u32>>`
///   Keep rows whose weekday number (Monday = 0 … Sunday = 6) is listed.
/// - `months`: `Option<BTreeSet<u32>>`
///   Keep rows whose month number (1 … 12) is listed.
/// - `blacklist`: `Option<DateRange>`
///   Drop rows whose timestamp is selected by this range (resolved against
///   the input, not against the earlier stages' output).
///
/// Notes
/// -----
/// - Stage order is fixed by `filter::time_filter`, not by field order or
///   builder call order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub include: Option<DateRange>,
    pub times: Option<Vec<TimeWindow>>,
    pub days_of_week: Option<BTreeSet<u32>>,
    pub months: Option<BTreeSet<u32>>,
    pub blacklist: Option<DateRange>,
}

impl FilterSpec {
    /// A spec with every stage disabled.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(mut self, range: impl Into<DateRange>) -> Self {
        self.include = Some(range.into());
        self
    }

    /// Restrict to a single clock window.
    pub fn times(mut self, window: TimeWindow) -> Self {
        self.times = Some(vec![window]);
        self
    }

    /// Restrict to the union of several clock windows.
    pub fn time_windows(mut self, windows: impl IntoIterator<Item = TimeWindow>) -> Self {
        self.times = Some(windows.into_iter().collect());
        self
    }

    /// Restrict to the given weekdays.
    pub fn weekdays(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.days_of_week = Some(days.into_iter().map(|d| d.num_days_from_monday()).collect());
        self
    }

    /// Restrict to weekday numbers (Monday = 0 … Sunday = 6).
    ///
    /// # Errors
    /// `FilterError::InvalidDayOfWeek` for a number above 6.
    pub fn days_of_week(mut self, days: impl IntoIterator<Item = u32>) -> FilterResult<Self> {
        let days: BTreeSet<u32> = days.into_iter().collect();
        check_days(&days)?;
        self.days_of_week = Some(days);
        Ok(self)
    }

    /// Restrict to month numbers (January = 1 … December = 12).
    ///
    /// # Errors
    /// `FilterError::InvalidMonth` for a number outside `1..=12`.
    pub fn months(mut self, months: impl IntoIterator<Item = u32>) -> FilterResult<Self> {
        let months: BTreeSet<u32> = months.into_iter().collect();
        check_months(&months)?;
        self.months = Some(months);
        Ok(self)
    }

    pub fn blacklist(mut self, range: impl Into<DateRange>) -> Self {
        self.blacklist = Some(range.into());
        self
    }

    /// Add more exclusions to an existing blacklist (or start one).
    pub fn extend_blacklist(mut self, range: impl Into<DateRange>) -> Self {
        let range = range.into();
        self.blacklist = Some(match self.blacklist.take() {
            Some(existing) => existing.extend(range),
            None => range,
        });
        self
    }

    /// Whether every stage is disabled.
    pub fn is_noop(&self) -> bool {
        self.include.is_none()
            && self.times.is_none()
            && self.days_of_week.is_none()
            && self.months.is_none()
            && self.blacklist.is_none()
    }

    /// Re-check the calendar sets of a spec whose fields were set directly.
    pub fn validate(&self) -> FilterResult<()> {
        if let Some(days) = &self.days_of_week {
            check_days(days)?;
        }
        if let Some(months) = &self.months {
            check_months(months)?;
        }
        Ok(())
    }
}

impl From<RangeToken> for FilterSpec {
    /// Shorthand for a spec that only includes `token`.
    fn from(token: RangeToken) -> Self {
        FilterSpec::new().include(token)
    }
}

fn check_days(days: &BTreeSet<u32>) -> FilterResult<()> {
    match days.iter().find(|&&d| d > 6) {
        Some(&day) => Err(FilterError::InvalidDayOfWeek { day }),
        None => Ok(()),
    }
}

fn check_months(months: &BTreeSet<u32>) -> FilterResult<()> {
    match months.iter().find(|&&m| !(1..=12).contains(&m)) {
        Some(&month) => Err(FilterError::InvalidMonth { month }),
        None => Ok(()),
    }
}

fn parse_clock(text: &str) -> FilterResult<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map_err(|_| FilterError::InvalidTimeOfDay { text: text.to_string() })
}
