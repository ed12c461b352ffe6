//! Resolution of range tokens against a time-indexed dataset.
//!
//! Purpose
//! -------
//! Map a [`RangeToken`] or [`DateRange`] onto the rows of a [`TimeSeries`]
//! whose timestamps it selects. Because a `TimeSeries` index is sorted, every
//! token resolves to one contiguous row span found by binary search.
//!
//! Key behaviors
//! -------------
//! - A label that selects no rows is reported with `tracing::warn!` and
//!   resolves to an empty selection; it never aborts the caller.
//! - A span with no rows resolves silently to an empty selection.
//! - A union resolves each token independently, concatenates the row
//!   selections, and sorts them by timestamp. Rows selected by several tokens
//!   appear once per token.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output rows are a (multi)subset of the input rows, in timestamp order.
//! - The input series is never modified.
use std::ops::Range;

use chrono::NaiveDateTime;

use crate::{
    range::token::{DateRange, RangeToken},
    series::TimeSeries,
};

/// Rows of `series` selected by a single token.
pub fn resolve_token(series: &TimeSeries, token: &RangeToken) -> TimeSeries {
    series.slice_rows(token_rows(series.index(), token))
}

/// Rows of `series` selected by a date range.
///
/// Parameters
/// ----------
/// - `series`: `&TimeSeries`
///   Dataset to select from.
/// - `range`: `&DateRange`
///   A single token, or a union of tokens resolved independently.
///
/// Returns
/// -------
/// `TimeSeries`
///   Selected rows in timestamp order, duplicates from overlapping tokens
///   preserved. Unresolvable labels contribute nothing.
pub fn resolve(series: &TimeSeries, range: &DateRange) -> TimeSeries {
    match range {
        DateRange::Single(token) => resolve_token(series, token),
        DateRange::Union(tokens) => series.take_rows(&range_rows(series.index(), tokens)),
    }
}

/// Sorted row positions selected by a list of tokens (duplicates kept).
pub(crate) fn range_rows(index: &[NaiveDateTime], tokens: &[RangeToken]) -> Vec<usize> {
    let mut rows: Vec<usize> = tokens.iter().flat_map(|token| token_rows(index, token)).collect();
    // Row order equals timestamp order on a sorted index.
    rows.sort();
    rows
}

/// Contiguous row span selected by one token on a sorted index.
pub(crate) fn token_rows(index: &[NaiveDateTime], token: &RangeToken) -> Range<usize> {
    let rows = match token {
        RangeToken::Label(label) => {
            let lo = index.partition_point(|ts| *ts < label.start());
            let hi = index.partition_point(|ts| *ts < label.end());
            lo..hi
        }
        RangeToken::Span { start, end } => {
            let lo = start.map_or(0, |s| index.partition_point(|ts| *ts < s.lower()));
            let hi = end.map_or(index.len(), |e| index.partition_point(|ts| e.admits_up_to(ts)));
            lo..hi.max(lo)
        }
    };

    if rows.is_empty() {
        if let RangeToken::Label(label) = token {
            tracing::warn!(label = %label, "calendar label not in range; skipping");
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::token::RangeBound;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};
    use tracing::{
        Event, Level, Subscriber,
        field::{Field, Visit},
    };
    use tracing_subscriber::{
        Layer,
        layer::{Context, SubscriberExt},
    };

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Label resolution (hit and miss).
    // - Span resolution with open and closed bounds.
    // - Union resolution: ordering and duplicate preservation.
    // - The warning emitted for labels that select no rows.
    // -------------------------------------------------------------------------

    /// Collects the `label` field of every WARN event.
    #[derive(Clone, Default)]
    struct WarnedLabels(Arc<Mutex<Vec<String>>>);

    struct LabelField<'a>(&'a mut Option<String>);

    impl Visit for LabelField<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "label" {
                *self.0 = Some(format!("{value:?}"));
            }
        }
    }

    impl<S: Subscriber> Layer<S> for WarnedLabels {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                let mut label = None;
                event.record(&mut LabelField(&mut label));
                self.0.lock().unwrap().push(label.unwrap_or_default());
            }
        }
    }

    fn day(m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, m, d).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn sample() -> TimeSeries {
        let index = vec![day(1, 15), day(2, 9), day(2, 13), day(3, 14), day(3, 15), day(4, 1)];
        TimeSeries::from_column(index, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // A month label selects exactly the rows in that month.
    //
    // Given
    // -----
    // - `sample()` and label "2017-03".
    //
    // Expect
    // ------
    // - Rows for 03-14 and 03-15.
    fn resolve_label_selects_period() {
        let token: RangeToken = "2017-03".parse().unwrap();

        let out = resolve_token(&sample(), &token);

        assert_eq!(out.index(), &[day(3, 14), day(3, 15)]);
    }

    #[test]
    // Purpose
    // -------
    // A label with no rows yields an empty result instead of failing.
    //
    // Given
    // -----
    // - `sample()` and label "2018".
    //
    // Expect
    // ------
    // - Empty series with the same column count.
    fn resolve_missing_label_is_empty() {
        let token: RangeToken = "2018".parse().unwrap();

        let out = resolve_token(&sample(), &token);

        assert!(out.is_empty());
        assert_eq!(out.ncols(), 1);
    }

    #[test]
    // Purpose
    // -------
    // Open bounds extend to the dataset's first/last row.
    //
    // Given
    // -----
    // - Span (None, "2017-02") and span ("2017-03-15", None).
    //
    // Expect
    // ------
    // - First three rows, and last two rows, respectively.
    fn resolve_open_spans() {
        let head = RangeToken::between(None, Some("2017-02")).unwrap();
        let tail = RangeToken::between(Some("2017-03-15"), None).unwrap();

        assert_eq!(resolve_token(&sample(), &head).len(), 3);
        assert_eq!(resolve_token(&sample(), &tail).index(), &[day(3, 15), day(4, 1)]);
    }

    #[test]
    // Purpose
    // -------
    // Unions are sorted and keep duplicates from overlapping tokens.
    //
    // Given
    // -----
    // - Union [label "2017-03", label "2/9/17", span(03-15 12:00 exact, None)].
    //
    // Expect
    // ------
    // - Rows 02-09, 03-14, 03-15, 03-15, 04-01 in that order.
    fn resolve_union_sorts_and_keeps_duplicates() {
        let range = DateRange::Union(vec![
            "2017-03".parse().unwrap(),
            "2/9/17".parse().unwrap(),
            RangeToken::span(Some(RangeBound::At(day(3, 15))), None).unwrap(),
        ]);

        let out = resolve(&sample(), &range);

        assert_eq!(out.index(), &[day(2, 9), day(3, 14), day(3, 15), day(3, 15), day(4, 1)]);
        assert_eq!(out.column(0).unwrap().to_vec(), vec![2.0, 4.0, 5.0, 5.0, 6.0]);
    }

    #[test]
    // Purpose
    // -------
    // A missing label inside a union is skipped with one warning while the
    // other tokens still resolve.
    //
    // Given
    // -----
    // - Union [label "2018", label "2017-03"] over `sample()`.
    //
    // Expect
    // ------
    // - Exactly the March rows (03-14, 03-15) with values 4 and 5.
    // - One WARN event whose `label` field is "2018".
    fn resolve_union_warns_once_for_missing_label() {
        let warned = WarnedLabels::default();
        let subscriber = tracing_subscriber::registry().with(warned.clone());
        let range = DateRange::Union(vec!["2018".parse().unwrap(), "2017-03".parse().unwrap()]);

        let out = tracing::subscriber::with_default(subscriber, || resolve(&sample(), &range));

        assert_eq!(out.index(), &[day(3, 14), day(3, 15)]);
        assert_eq!(out.column(0).unwrap().to_vec(), vec![4.0, 5.0]);
        assert_eq!(*warned.0.lock().unwrap(), vec!["2018".to_string()]);
    }
}
