//! Parsing of gap thresholds written as offset strings.
//!
//! Accepts a number (integer or decimal) followed by an optional space and a
//! unit alias, e.g. `"15 min"`, `"2 hours"`, `"1 day"`, `"30s"`, `"15T"`,
//! `"1.5h"`. Aliases are case-insensitive:
//!
//! | unit | aliases |
//! |---|---|
//! | millisecond | `ms`, `milli`, `millis`, `millisecond(s)`, `L` |
//! | second | `s`, `sec`, `secs`, `second(s)` |
//! | minute | `min`, `mins`, `minute(s)`, `T` |
//! | hour | `h`, `hr`, `hrs`, `hour(s)` |
//! | day | `d`, `day(s)` |
//! | week | `w`, `week(s)` |
use chrono::TimeDelta;

use crate::energy::errors::{EnergyError, EnergyResult};

const NANOS_PER_MILLI: f64 = 1e6;
const NANOS_PER_SECOND: f64 = 1e9;

/// Parse an offset string into a [`TimeDelta`].
///
/// # Errors
/// `EnergyError::InvalidOffset` for an empty string, a missing or
/// non-numeric amount, an unknown unit, or an amount too large to represent.
pub fn parse_offset(text: &str) -> EnergyResult<TimeDelta> {
    let trimmed = text.trim();
    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(trimmed.len());
    let (amount, unit) = trimmed.split_at(split);

    if amount.is_empty() {
        return Err(invalid(text, "missing amount"));
    }
    let amount: f64 = amount.parse().map_err(|_| invalid(text, "amount is not a number"))?;

    let unit_nanos = match unit.trim().to_ascii_lowercase().as_str() {
        "ms" | "l" | "milli" | "millis" | "millisecond" | "milliseconds" => NANOS_PER_MILLI,
        "s" | "sec" | "secs" | "second" | "seconds" => NANOS_PER_SECOND,
        "t" | "min" | "mins" | "minute" | "minutes" => 60.0 * NANOS_PER_SECOND,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600.0 * NANOS_PER_SECOND,
        "d" | "day" | "days" => 86_400.0 * NANOS_PER_SECOND,
        "w" | "week" | "weeks" => 604_800.0 * NANOS_PER_SECOND,
        "" => return Err(invalid(text, "missing unit")),
        _ => return Err(invalid(text, "unknown unit")),
    };

    let nanos = (amount * unit_nanos).round();
    if !nanos.is_finite() || nanos.abs() >= i64::MAX as f64 {
        return Err(invalid(text, "offset out of range"));
    }
    Ok(TimeDelta::nanoseconds(nanos as i64))
}

fn invalid(text: &str, reason: &'static str) -> EnergyError {
    EnergyError::InvalidOffset { text: text.to_string(), reason }
}
