//! Integration tests for the meter-reading pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end flow on realistic readings: calendar selection
//!   and filtering, run grouping and energy totals, and robust distribution
//!   adjustment of a filtered column.
//! - Pin the documented scenarios (constant hourly load, two-day gap).
//!
//! Coverage
//! --------
//! - `range`: label/span parsing, `localize_events` blacklists.
//! - `filter::time_filter`: include + clock window + weekdays + blacklist.
//! - `energy`: `parse_offset`, `consecutives`, `integrate_column`.
//! - `distribution::adjust_series` on filtered data.
//! - `series`: `intersect` and `unstack_by_time` on filtered output.
//!
//! Exclusions
//! ----------
//! - Edge cases of individual building blocks (label grammar, offset
//!   aliases, KDE bandwidth rules); those are covered by unit tests.
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc, Weekday};
use ndarray::Array2;
use rust_loadseries::{
    distribution::{FitOptions, adjust_series},
    energy::{consecutives, integrate, integrate_column, parse_offset},
    filter::{FilterSpec, TimeWindow, time_filter},
    range::{CalendarEvent, DateRange, RangeToken, localize_events},
    series::{TimeSeries, intersect, unstack_by_time},
};

/// Route `tracing` output through the test harness; `RUST_LOG` controls
/// verbosity. Safe to call from every test.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn at(m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2017, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

/// Purpose
/// -------
/// Two weeks of 15-minute readings, Monday 2017-02-06 through Sunday
/// 2017-02-19, with two channels.
///
/// Columns
/// -------
/// - 0: constant 4.0 kW load (energy totals are exact).
/// - 1: a deterministic, scattered positive load between 1.0 and 10.6
///   (non-degenerate for distribution fitting).
fn school_fortnight() -> TimeSeries {
    let start = at(2, 6, 0, 0);
    let n = 14 * 24 * 4;
    let index: Vec<NaiveDateTime> = (0..n).map(|i| start + TimeDelta::minutes(15 * i as i64)).collect();
    let values = Array2::from_shape_fn((n, 2), |(i, j)| match j {
        0 => 4.0,
        _ => 1.0 + ((i * 7919) % 97) as f64 / 10.0,
    });
    TimeSeries::new(index, values).unwrap()
}

/// School hours on weekdays between 2017-02-06 and 2017-02-17, minus the
/// all-day closure on 2017-02-09.
fn school_spec() -> FilterSpec {
    FilterSpec::new()
        .include(RangeToken::between(Some("2017-02-06"), Some("2017-02-17")).unwrap())
        .times(TimeWindow::parse("07:40", "14:20").unwrap())
        .weekdays([Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri])
        .blacklist(DateRange::labels(["2/9/17"]).unwrap())
}

#[test]
// Purpose
// -------
// Five hourly readings of 2 kW form one run and integrate to 8 kWh.
//
// Given
// -----
// - 2020-01-01 00:00..04:00 hourly, value 2.0; threshold "2 hours".
//
// Expect
// ------
// - One run; total 8.
fn constant_hourly_load_scenario() {
    init_tracing();
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let index: Vec<_> = (0..5).map(|h| start + TimeDelta::hours(h)).collect();
    let series = TimeSeries::from_column(index, vec![2.0; 5]).unwrap();
    let threshold = parse_offset("2 hours").unwrap();

    assert_eq!(consecutives(&series, Some(threshold)).unwrap().len(), 1);
    assert_eq!(integrate_column(&series, 0, Some(threshold)).unwrap(), 8);
}

#[test]
// Purpose
// -------
// A two-day gap splits readings into two runs under a one-day threshold.
//
// Given
// -----
// - Hourly readings on 2020-01-01 and 2020-01-03; threshold "1 day".
//
// Expect
// ------
// - Two runs, one per day.
fn two_day_gap_scenario() {
    init_tracing();
    let day1 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let day3 = day1 + TimeDelta::days(2);
    let index: Vec<_> =
        (0..3).map(|h| day1 + TimeDelta::hours(h)).chain((0..3).map(|h| day3 + TimeDelta::hours(h))).collect();
    let series = TimeSeries::from_column(index, vec![1.0; 6]).unwrap();

    let runs = consecutives(&series, Some(parse_offset("1 day").unwrap())).unwrap();

    assert_eq!(runs.len(), 2);
    assert!(runs.iter().all(|run| run.len() == 3));
    assert_eq!(runs[1].first_timestamp(), Some(day3));
}

#[test]
// Purpose
// -------
// School-hours filtering feeds gap-aware energy totals.
//
// Given
// -----
// - `school_fortnight()` filtered by `school_spec()`; threshold "15 min".
//
// Expect
// ------
// - 9 school days × 27 rows (07:45..14:15), all on weekdays in the window.
// - 9 runs; column 0 integrates to 9 × 6.5 h × 4 kW = 234 kWh.
fn school_day_energy() {
    init_tracing();
    let filtered = time_filter(&school_fortnight(), &school_spec()).unwrap();

    assert_eq!(filtered.len(), 9 * 27);
    assert!(filtered.index().iter().all(|ts| {
        ts.weekday().num_days_from_monday() < 5
            && ts.day() != 9
            && (at(2, 6, 7, 40).time()..=at(2, 6, 14, 20).time()).contains(&ts.time())
    }));

    let threshold = Some(parse_offset("15 min").unwrap());
    let runs = consecutives(&filtered, threshold).unwrap();
    assert_eq!(runs.len(), 9);
    assert!(runs.iter().all(|run| run.len() == 27));
    assert_eq!(integrate_column(&filtered, 0, threshold).unwrap(), 234);
    assert_eq!(integrate(&filtered, threshold).unwrap().len(), 2);
}

#[test]
// Purpose
// -------
// Calendar events become a blacklist that splits an affected day's run.
//
// Given
// -----
// - All-day event 2017-02-09 → 2017-02-10 (end date exclusive) and a timed
//   event 2017-02-13 14:00–16:00 UTC, localised to America/New_York
//   (EST, UTC−5 → 09:00–11:00 local).
//
// Expect
// ------
// - 02-09 removed in full; 02-10 keeps its school-hours readings.
// - 09:00..11:00 on 02-13 removed (9 rows): 243 − 9 = 234 rows.
// - 02-13 splits into 07:45–08:45 (1 h) and 11:15–14:15 (3 h):
//   8 × 26 + 4 + 12 = 224 kWh over 10 runs.
fn calendar_events_as_blacklist() {
    init_tracing();
    let utc = |h: u32| -> DateTime<Utc> { at(2, 13, h, 0).and_utc() };
    let events = [
        CalendarEvent::AllDay {
            start: NaiveDate::from_ymd_opt(2017, 2, 9).unwrap(),
            end: NaiveDate::from_ymd_opt(2017, 2, 10).unwrap(),
        },
        CalendarEvent::Timed { start: utc(14), end: utc(16) },
    ];
    let blacklist = localize_events(&events, chrono_tz::America::New_York).unwrap();
    let spec = FilterSpec { blacklist: Some(blacklist), ..school_spec() };

    let filtered = time_filter(&school_fortnight(), &spec).unwrap();

    assert_eq!(filtered.len(), 234);
    assert!(!filtered.index().iter().any(|ts| ts.day() == 9));
    assert_eq!(filtered.index().iter().filter(|ts| ts.day() == 10).count(), 27);
    assert!(!filtered.index().iter().any(|ts| ts.day() == 13 && (9..=10).contains(&ts.hour())));
    let threshold = Some(parse_offset("15min").unwrap());
    assert_eq!(consecutives(&filtered, threshold).unwrap().len(), 10);
    assert_eq!(integrate_column(&filtered, 0, threshold).unwrap(), 224);
}

#[test]
// Purpose
// -------
// An all-day event ends at midnight of its end date, not at the end of it.
//
// Given
// -----
// - Hourly readings 2017-02-20 00:00 through 2017-02-21 23:00.
// - Blacklist from the all-day event 2017-02-20 → 2017-02-21.
//
// Expect
// ------
// - Every 02-20 reading and 02-21 00:00 dropped; 02-21 01:00..23:00 kept
//   (23 rows), including 12:00.
fn all_day_event_keeps_end_date_readings() {
    init_tracing();
    let start = at(2, 20, 0, 0);
    let index: Vec<_> = (0..48).map(|h| start + TimeDelta::hours(h)).collect();
    let series = TimeSeries::from_column(index, vec![1.0; 48]).unwrap();
    let events = [CalendarEvent::AllDay {
        start: NaiveDate::from_ymd_opt(2017, 2, 20).unwrap(),
        end: NaiveDate::from_ymd_opt(2017, 2, 21).unwrap(),
    }];
    let blacklist = localize_events(&events, chrono_tz::America::New_York).unwrap();

    let filtered = time_filter(&series, &FilterSpec::new().blacklist(blacklist)).unwrap();

    assert_eq!(filtered.len(), 23);
    assert!(!filtered.index().contains(&at(2, 20, 12, 0)));
    assert!(!filtered.index().contains(&at(2, 21, 0, 0)));
    assert!(filtered.index().contains(&at(2, 21, 12, 0)));
    assert_eq!(filtered.index().first(), Some(&at(2, 21, 1, 0)));
}

#[test]
// Purpose
// -------
// A filtered column can be adjusted through the robust log-normal model.
//
// Given
// -----
// - Column 1 of the school-hours subset; buffer 1, default options.
//
// Expect
// ------
// - Same timestamps; all values finite and positive; strict input order
//   preserved.
fn adjust_filtered_column() {
    init_tracing();
    let filtered = time_filter(&school_fortnight(), &school_spec()).unwrap();

    let adjusted = adjust_series(&filtered, 1, 1, &FitOptions::default()).unwrap();

    assert_eq!(adjusted.index(), filtered.index());
    let before = filtered.column(1).unwrap();
    let after = adjusted.column(0).unwrap();
    assert!(after.iter().all(|v| v.is_finite() && *v > 0.0));
    for a in 0..before.len() {
        for b in 0..before.len() {
            if before[a] < before[b] {
                assert!(after[a] < after[b]);
            }
        }
    }
}

#[test]
// Purpose
// -------
// Filtered output works with the whole-series utilities.
//
// Given
// -----
// - The school-hours subset and an hourly series covering the fortnight.
//
// Expect
// ------
// - Intersection keeps the 9 × 7 on-the-hour rows (08:00..14:00) on both
//   sides; the time-of-day grid is 27 × 9 with no gaps.
fn intersect_and_unstack_filtered() {
    init_tracing();
    let filtered = time_filter(&school_fortnight(), &school_spec()).unwrap();
    let hourly_index: Vec<_> = (0..14 * 24).map(|h| at(2, 6, 0, 0) + TimeDelta::hours(h)).collect();
    let hourly = TimeSeries::from_column(hourly_index, vec![20.0; 14 * 24]).unwrap();

    let (a, b) = intersect(&filtered, &hourly);
    let grid = unstack_by_time(&filtered, 0).unwrap();

    assert_eq!(a.len(), 9 * 7);
    assert_eq!(a.index(), b.index());
    assert_eq!(grid.values.dim(), (27, 9));
    assert!(grid.values.iter().all(|v| *v == 4.0));
}
