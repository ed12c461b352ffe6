//! Conversion of calendar-event times into range tokens.
//!
//! Event sources (e.g. ICS feeds) report timed events as UTC instants and
//! all-day events as bare dates. Readings are indexed by local wall-clock
//! time, so timed events are shifted into the dataset's timezone before
//! becoming spans.
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::range::{
    errors::RangeResult,
    label::CalendarLabel,
    token::{DateRange, RangeBound, RangeToken},
};

/// A raw event as handed over by an event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarEvent {
    /// Timed event with UTC start/end instants.
    Timed { start: DateTime<Utc>, end: DateTime<Utc> },
    /// All-day event with start/end dates.
    AllDay { start: NaiveDate, end: NaiveDate },
}

/// Inclusive span covering a timed event in `tz` wall-clock time.
///
/// # Errors
/// `RangeError::InvertedSpan` when `end` precedes `start`.
pub fn localize_event(start: DateTime<Utc>, end: DateTime<Utc>, tz: Tz) -> RangeResult<RangeToken> {
    let local_start = start.with_timezone(&tz).naive_local();
    let local_end = end.with_timezone(&tz).naive_local();
    RangeToken::span(Some(RangeBound::At(local_start)), Some(RangeBound::At(local_end)))
}

/// Span for an all-day event with an exclusive end date.
///
/// Event sources report all-day events with the end date being the day
/// after the last covered day, so `(2017-02-20, 2017-02-21)` is a one-day
/// event. The span starts at `start` 00:00 and ends at `end` 00:00
/// inclusive: the whole start day plus the reading at the end date's
/// midnight, if any.
///
/// # Errors
/// `RangeError::InvertedSpan` when `end` precedes `start`.
pub fn all_day_event(start: NaiveDate, end: NaiveDate) -> RangeResult<RangeToken> {
    RangeToken::span(
        Some(RangeBound::Label(CalendarLabel::day(start)?)),
        Some(RangeBound::At(end.and_time(NaiveTime::MIN))),
    )
}

/// Union of the spans for a list of events, ready for use as a blacklist.
pub fn localize_events<'a>(
    events: impl IntoIterator<Item = &'a CalendarEvent>, tz: Tz,
) -> RangeResult<DateRange> {
    events
        .into_iter()
        .map(|event| match *event {
            CalendarEvent::Timed { start, end } => localize_event(start, end, tz),
            CalendarEvent::AllDay { start, end } => all_day_event(start, end),
        })
        .collect::<RangeResult<Vec<_>>>()
        .map(DateRange::Union)
}
