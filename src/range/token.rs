//! Range tokens and date ranges.
//!
//! Purpose
//! -------
//! Give the two shapes a range can take (a calendar label or an explicit
//! start/end span) an explicit tagged representation, and define the union
//! of several tokens as a [`DateRange`].
//!
//! Key behaviors
//! -------------
//! - [`RangeToken::Label`] selects every timestamp inside a
//!   [`CalendarLabel`].
//! - [`RangeToken::Span`] selects an inclusive span; a missing bound means
//!   "from the first" / "to the last" row of the dataset.
//! - [`RangeToken::span`] rejects spans whose start lies after their end.
//! - [`DateRange`] is one token or an ordered list of tokens whose
//!   selections are unioned without de-duplication.
//!
//! Conventions
//! -----------
//! - A label used as a start bound starts at the label's first instant; used
//!   as an end bound it covers the label's whole period.
//! - An exact timestamp bound is inclusive on either side.
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::range::{
    errors::{RangeError, RangeResult},
    label::CalendarLabel,
};

/// One side of an explicit span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeBound {
    /// A calendar label; see module docs for start/end semantics.
    Label(CalendarLabel),
    /// An exact, inclusive timestamp.
    At(NaiveDateTime),
}

impl RangeBound {
    /// Earliest instant admitted when used as a start bound.
    pub fn lower(&self) -> NaiveDateTime {
        match self {
            RangeBound::Label(label) => label.start(),
            RangeBound::At(ts) => *ts,
        }
    }

    /// Whether `ts` lies at or before this bound when used as an end bound.
    pub fn admits_up_to(&self, ts: &NaiveDateTime) -> bool {
        match self {
            RangeBound::Label(label) => *ts < label.end(),
            RangeBound::At(bound) => ts <= bound,
        }
    }
}

impl FromStr for RangeBound {
    type Err = RangeError;

    fn from_str(text: &str) -> RangeResult<Self> {
        text.parse().map(RangeBound::Label)
    }
}

impl From<NaiveDateTime> for RangeBound {
    fn from(ts: NaiveDateTime) -> Self {
        RangeBound::At(ts)
    }
}

impl From<CalendarLabel> for RangeBound {
    fn from(label: CalendarLabel) -> Self {
        RangeBound::Label(label)
    }
}

/// `RangeToken` — a single time span selector.
///
/// Variants
/// --------
/// - `Label(label)`
///   Every timestamp inside `label`'s period.
/// - `Span { start, end }`
///   Every timestamp `t` with `start.lower() ≤ t` and `end.admits_up_to(t)`;
///   `None` leaves that side open.
///
/// Invariants
/// ----------
/// - Spans built through [`RangeToken::span`] are never inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeToken {
    Label(CalendarLabel),
    Span { start: Option<RangeBound>, end: Option<RangeBound> },
}

impl RangeToken {
    /// Build a validated span.
    ///
    /// Errors
    /// ------
    /// - `RangeError::InvertedSpan` when both bounds are present and no
    ///   instant can satisfy both (start after end).
    pub fn span(start: Option<RangeBound>, end: Option<RangeBound>) -> RangeResult<Self> {
        if let (Some(s), Some(e)) = (&start, &end) {
            if !e.admits_up_to(&s.lower()) {
                return Err(RangeError::InvertedSpan {
                    start: describe(s),
                    end: describe(e),
                });
            }
        }
        Ok(RangeToken::Span { start, end })
    }

    /// Build a span from optional label strings, e.g. `("9/2/16", "6/16/17")`
    /// or `("2016-08", None)`.
    pub fn between(start: Option<&str>, end: Option<&str>) -> RangeResult<Self> {
        let start = start.map(str::parse::<RangeBound>).transpose()?;
        let end = end.map(str::parse::<RangeBound>).transpose()?;
        Self::span(start, end)
    }

    /// Whether `ts` is selected by this token.
    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        match self {
            RangeToken::Label(label) => label.contains(ts),
            RangeToken::Span { start, end } => {
                start.as_ref().is_none_or(|s| s.lower() <= *ts)
                    && end.as_ref().is_none_or(|e| e.admits_up_to(ts))
            }
        }
    }
}

impl FromStr for RangeToken {
    type Err = RangeError;

    /// Parse a single calendar label token.
    fn from_str(text: &str) -> RangeResult<Self> {
        text.parse().map(RangeToken::Label)
    }
}

impl From<CalendarLabel> for RangeToken {
    fn from(label: CalendarLabel) -> Self {
        RangeToken::Label(label)
    }
}

/// `DateRange` — one token, or the ordered union of several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRange {
    Single(RangeToken),
    Union(Vec<RangeToken>),
}

impl DateRange {
    /// Tokens in declaration order.
    pub fn tokens(&self) -> &[RangeToken] {
        match self {
            DateRange::Single(token) => std::slice::from_ref(token),
            DateRange::Union(tokens) => tokens,
        }
    }

    /// Parse a list of label strings into a union.
    pub fn labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> RangeResult<Self> {
        labels
            .into_iter()
            .map(str::parse::<RangeToken>)
            .collect::<RangeResult<Vec<_>>>()
            .map(DateRange::Union)
    }

    /// Append the tokens of `other`, turning `self` into a union.
    pub fn extend(self, other: DateRange) -> DateRange {
        let mut tokens = match self {
            DateRange::Single(token) => vec![token],
            DateRange::Union(tokens) => tokens,
        };
        tokens.extend_from_slice(other.tokens());
        DateRange::Union(tokens)
    }
}

impl From<RangeToken> for DateRange {
    fn from(token: RangeToken) -> Self {
        DateRange::Single(token)
    }
}

impl From<Vec<RangeToken>> for DateRange {
    fn from(tokens: Vec<RangeToken>) -> Self {
        DateRange::Union(tokens)
    }
}

fn describe(bound: &RangeBound) -> String {
    match bound {
        RangeBound::Label(label) => label.to_string(),
        RangeBound::At(ts) => ts.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify that a label end bound covers its whole period while an exact
    // timestamp end bound is inclusive only up to that instant.
    //
    // Given
    // -----
    // - Span ("2017-03-01", "2017-03-14") and span (03-01, 03-14 00:00 exact).
    //
    // Expect
    // ------
    // - 03-14 18:00 is inside the first span and outside the second.
    fn span_label_end_covers_whole_period() {
        let by_label = RangeToken::between(Some("2017-03-01"), Some("2017-03-14")).unwrap();
        let by_instant =
            RangeToken::span(Some(RangeBound::At(at(3, 1, 0))), Some(RangeBound::At(at(3, 14, 0))))
                .unwrap();

        assert!(by_label.contains(&at(3, 14, 18)));
        assert!(!by_instant.contains(&at(3, 14, 18)));
        assert!(by_instant.contains(&at(3, 14, 0)));
    }

    #[test]
    // Purpose
    // -------
    // Ensure inverted spans are rejected and open-ended spans accepted.
    //
    // Given
    // -----
    // - ("2017-06", "2017-03"), ("2017-03", "2017-03"), ("2016-08", None).
    //
    // Expect
    // ------
    // - `InvertedSpan` for the first; the others succeed.
    fn span_validation() {
        let inverted = RangeToken::between(Some("2017-06"), Some("2017-03"));
        let same_month = RangeToken::between(Some("2017-03"), Some("2017-03"));
        let open = RangeToken::between(Some("2016-08"), None);

        assert!(matches!(inverted, Err(RangeError::InvertedSpan { .. })));
        assert!(same_month.is_ok());
        assert!(open.unwrap().contains(&at(12, 31, 23)));
    }

    #[test]
    // Purpose
    // -------
    // Check `DateRange` helpers keep declaration order.
    //
    // Given
    // -----
    // - A union of two labels extended with a single span.
    //
    // Expect
    // ------
    // - Three tokens in order: label, label, span.
    fn date_range_labels_and_extend() {
        let union = DateRange::labels(["2/9/17", "2/13/17"]).unwrap();
        let span = RangeToken::between(None, Some("2016-12")).unwrap();

        let combined = union.extend(DateRange::from(span));

        assert_eq!(combined.tokens().len(), 3);
        assert!(matches!(combined.tokens()[0], RangeToken::Label(_)));
        assert_eq!(combined.tokens()[2], span);
    }
}
