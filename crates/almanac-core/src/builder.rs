//! Fluent construction of an [`Almanac`] from phrase descriptions.
//!
//! The builder only records text; every phrase is parsed at
//! [`build`](AlmanacBuilder::build), so queuing stays infallible and the
//! first bad phrase aborts the whole build with its parse error.

use crate::almanac::Almanac;
use crate::error::ParseError;
use crate::parse::{parse_period_from_halves, parse_period_phrase};

#[derive(Debug, Clone)]
enum PendingPeriod {
    Phrase {
        text: String,
        note: Option<String>,
    },
    Bounds {
        start: String,
        end: String,
        note: Option<String>,
    },
}

/// Collects period descriptions fluently and parses them all at once.
///
/// ```
/// use almanac_core::Almanac;
///
/// let almanac = Almanac::builder()
///     .period("с 21 сентября по 21 октября")
///     .bounds_with_note("12 декабря", "25 декабря", "Йоль в Исландии")
///     .build()
///     .unwrap();
/// assert_eq!(almanac.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AlmanacBuilder {
    pending: Vec<PendingPeriod>,
}

impl AlmanacBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a whole range phrase, like `"с 12 декабря по 25 декабря"`.
    #[must_use]
    pub fn period(mut self, phrase: impl Into<String>) -> Self {
        self.pending.push(PendingPeriod::Phrase {
            text: phrase.into(),
            note: None,
        });
        self
    }

    /// Queue a range phrase with a note that will ride on the period.
    #[must_use]
    pub fn period_with_note(mut self, phrase: impl Into<String>, note: impl Into<String>) -> Self {
        self.pending.push(PendingPeriod::Phrase {
            text: phrase.into(),
            note: Some(note.into()),
        });
        self
    }

    /// Queue a period from its two bound phrases.
    #[must_use]
    pub fn bounds(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.pending.push(PendingPeriod::Bounds {
            start: start.into(),
            end: end.into(),
            note: None,
        });
        self
    }

    /// Queue a period from its two bound phrases, with a note.
    #[must_use]
    pub fn bounds_with_note(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        self.pending.push(PendingPeriod::Bounds {
            start: start.into(),
            end: end.into(),
            note: Some(note.into()),
        });
        self
    }

    /// Parse everything queued into a populated [`Almanac`].
    ///
    /// # Errors
    ///
    /// The first [`ParseError`] any queued phrase produces; no partially
    /// built almanac is returned.
    pub fn build(self) -> Result<Almanac, ParseError> {
        let mut almanac = Almanac::new();
        for pending in self.pending {
            let (mut period, note) = match pending {
                PendingPeriod::Phrase { text, note } => (parse_period_phrase(&text)?, note),
                PendingPeriod::Bounds { start, end, note } => (
                    parse_period_from_halves(Some(&start), Some(&end))?,
                    note,
                ),
            };
            period.note = note;
            almanac.add(period);
        }
        Ok(almanac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    use crate::mark::{DayMark, Period};

    fn dom(month: Month, day: u32) -> DayMark {
        DayMark::DayOfMonth {
            month,
            day,
            note: None,
        }
    }

    #[test]
    fn test_builder_parses_phrases_and_bounds() {
        let almanac = Almanac::builder()
            .period("с 21 сентября по 21 октября")
            .bounds_with_note("12 декабря", "25 декабря", "Йоль в Исландии")
            .build()
            .unwrap();

        assert_eq!(almanac.len(), 2);
        let yule = Period::with_note(
            dom(Month::December, 12),
            dom(Month::December, 25),
            "Йоль в Исландии",
        );
        assert!(almanac.periods().any(|period| *period == yule));
    }

    #[test]
    fn test_builder_deduplicates_equal_periods() {
        let almanac = Almanac::builder()
            .period("с 1 мая по 9 мая")
            .bounds("1 мая", "9 мая")
            .build()
            .unwrap();
        assert_eq!(almanac.len(), 1);
    }

    #[test]
    fn test_build_fails_on_the_first_bad_phrase() {
        let result = Almanac::builder()
            .period("с 1 мая по 9 мая")
            .period("с 33 января по 8 февраля")
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ParseError::DayOutOfRange { day: 33, .. }
        ));
    }

    #[test]
    fn test_empty_builder_builds_an_empty_almanac() {
        assert!(AlmanacBuilder::new().build().unwrap().is_empty());
    }
}
