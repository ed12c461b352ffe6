//! Calendar-partial labels such as `"2017"`, `"2017-03"`, or `"2/9/17"`.
//!
//! Purpose
//! -------
//! Turn a partial date/time string into the half-open span of wall-clock
//! time it denotes, so that "every timestamp whose prefix matches this label"
//! becomes a pair of comparisons against a sorted index.
//!
//! Key behaviors
//! -------------
//! - Parse ISO-style labels at year, month, day, hour, minute, or second
//!   resolution (`"2017"`, `"2017-03"`, `"2017-03-14"`, `"2017-03-14 07"`,
//!   `"2017-03-14T07:40"`, `"2017-03-14 07:40:05"`).
//! - Parse US-style day labels `M/D/YY` and `M/D/YYYY` (`"2/9/17"`).
//! - Precompute `[start, end)` at construction so resolution never has to
//!   re-do calendar arithmetic.
//!
//! Conventions
//! -----------
//! - Two-digit years map 00–68 to 2000–2068 and 69–99 to 1969–1999.
//! - `end` is exclusive; a day label covers `[00:00, next day 00:00)`.
use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::range::errors::{RangeError, RangeResult};

/// Granularity of a [`CalendarLabel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resolution {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

/// `CalendarLabel` — a partial date/time and the span it covers.
///
/// Invariants
/// ----------
/// - `start < end`, both computed with checked calendar arithmetic.
/// - `start` is the first instant of the labelled period; `end` the first
///   instant after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarLabel {
    resolution: Resolution,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl CalendarLabel {
    /// Label for a whole calendar year.
    pub fn year(year: i32) -> RangeResult<Self> {
        let start = first_of_month(year, 1)?;
        let end = first_of_month(year + 1, 1)?;
        Ok(Self::from_parts(Resolution::Year, start, end))
    }

    /// Label for a whole calendar month.
    pub fn month(year: i32, month: u32) -> RangeResult<Self> {
        let start = first_of_month(year, month)?;
        let end = if month == 12 { first_of_month(year + 1, 1)? } else { first_of_month(year, month + 1)? };
        Ok(Self::from_parts(Resolution::Month, start, end))
    }

    /// Label for a whole day.
    pub fn day(date: NaiveDate) -> RangeResult<Self> {
        Self::with_width(Resolution::Day, date.and_time(NaiveTime::MIN), TimeDelta::days(1))
    }

    /// Label for one clock hour of a day.
    pub fn hour(date: NaiveDate, hour: u32) -> RangeResult<Self> {
        let start = date.and_hms_opt(hour, 0, 0).ok_or_else(|| invalid(format!("{date} {hour:02}")))?;
        Self::with_width(Resolution::Hour, start, TimeDelta::hours(1))
    }

    /// Label for one clock minute of a day.
    pub fn minute(date: NaiveDate, hour: u32, minute: u32) -> RangeResult<Self> {
        let start = date
            .and_hms_opt(hour, minute, 0)
            .ok_or_else(|| invalid(format!("{date} {hour:02}:{minute:02}")))?;
        Self::with_width(Resolution::Minute, start, TimeDelta::minutes(1))
    }

    /// Label for one clock second (sub-second readings inside it match).
    pub fn second(at: NaiveDateTime) -> RangeResult<Self> {
        let start = at.with_nanosecond(0).ok_or_else(|| invalid(at.to_string()))?;
        Self::with_width(Resolution::Second, start, TimeDelta::seconds(1))
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// First instant covered by the label.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// First instant after the label (exclusive end).
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whether `ts` falls inside the labelled period.
    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        self.start <= *ts && *ts < self.end
    }

    fn from_parts(resolution: Resolution, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        CalendarLabel { resolution, start, end }
    }

    fn with_width(resolution: Resolution, start: NaiveDateTime, width: TimeDelta) -> RangeResult<Self> {
        let end = start.checked_add_signed(width).ok_or_else(|| invalid(start.to_string()))?;
        Ok(Self::from_parts(resolution, start, end))
    }
}

impl FromStr for CalendarLabel {
    type Err = RangeError;

    fn from_str(text: &str) -> RangeResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(malformed(text, "empty label"));
        }
        if trimmed.contains('/') {
            return parse_us_day(trimmed);
        }

        let (date_part, time_part) = match trimmed.split_once(['T', ' ']) {
            Some((d, t)) => (d, Some(t.trim())),
            None => (trimmed, None),
        };
        let date_fields: Vec<&str> = date_part.split('-').collect();

        match (date_fields.as_slice(), time_part) {
            ([y], None) => CalendarLabel::year(parse_year(text, y)?),
            ([y, m], None) => CalendarLabel::month(parse_year(text, y)?, parse_field(text, m)?),
            ([y, m, d], time) => {
                let date = NaiveDate::from_ymd_opt(
                    parse_year(text, y)?,
                    parse_field(text, m)?,
                    parse_field(text, d)?,
                )
                .ok_or_else(|| invalid(text.to_string()))?;
                match time {
                    None => CalendarLabel::day(date),
                    Some(clock) => parse_clock(text, date, clock),
                }
            }
            _ => Err(malformed(text, "expected YYYY, YYYY-MM, or YYYY-MM-DD[ HH[:MM[:SS]]]")),
        }
    }
}

impl fmt::Display for CalendarLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.start;
        match self.resolution {
            Resolution::Year => write!(f, "{:04}", s.year()),
            Resolution::Month => write!(f, "{:04}-{:02}", s.year(), s.month()),
            Resolution::Day => write!(f, "{}", s.format("%Y-%m-%d")),
            Resolution::Hour => write!(f, "{}", s.format("%Y-%m-%d %H")),
            Resolution::Minute => write!(f, "{}", s.format("%Y-%m-%d %H:%M")),
            Resolution::Second => write!(f, "{}", s.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

// ---- Parsing helpers ----

fn parse_clock(text: &str, date: NaiveDate, clock: &str) -> RangeResult<CalendarLabel> {
    let fields: Vec<&str> = clock.split(':').collect();
    match fields.as_slice() {
        [h] => CalendarLabel::hour(date, parse_field(text, h)?),
        [h, m] => CalendarLabel::minute(date, parse_field(text, h)?, parse_field(text, m)?),
        [h, m, s] => {
            let at = date
                .and_hms_opt(parse_field(text, h)?, parse_field(text, m)?, parse_field(text, s)?)
                .ok_or_else(|| invalid(text.to_string()))?;
            CalendarLabel::second(at)
        }
        _ => Err(malformed(text, "expected HH, HH:MM, or HH:MM:SS after the date")),
    }
}

fn parse_us_day(text: &str) -> RangeResult<CalendarLabel> {
    let fields: Vec<&str> = text.split('/').collect();
    let [m, d, y] = fields.as_slice() else {
        return Err(malformed(text, "expected M/D/YY or M/D/YYYY"));
    };
    let year = match y.len() {
        2 => {
            let yy: i32 = parse_field(text, y)?;
            if yy < 69 { 2000 + yy } else { 1900 + yy }
        }
        4 => parse_year(text, y)?,
        _ => return Err(malformed(text, "year must have 2 or 4 digits")),
    };
    let date = NaiveDate::from_ymd_opt(year, parse_field(text, m)?, parse_field(text, d)?)
        .ok_or_else(|| invalid(text.to_string()))?;
    CalendarLabel::day(date)
}

fn parse_year(text: &str, field: &str) -> RangeResult<i32> {
    if field.len() != 4 {
        return Err(malformed(text, "year must have 4 digits"));
    }
    parse_field(text, field)
}

fn parse_field<T: FromStr>(text: &str, field: &str) -> RangeResult<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(text, "non-digit date/time field"));
    }
    field.parse().map_err(|_| malformed(text, "numeric field out of range"))
}

fn first_of_month(year: i32, month: u32) -> RangeResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.and_time(NaiveTime::MIN))
        .ok_or_else(|| invalid(format!("{year:04}-{month:02}")))
}

fn malformed(text: &str, reason: &'static str) -> RangeError {
    RangeError::MalformedLabel { text: text.to_string(), reason }
}

fn invalid(text: String) -> RangeError {
    RangeError::InvalidCalendarValue { text }
}
