//! Error types for parsing and resolution.
//!
//! The two failure domains are disjoint: [`ParseError`] covers everything
//! that can go wrong while reading a phrase, [`ResolveError`] everything
//! that can go wrong while binding a mark to a real year. Neither is ever
//! recovered from internally — errors propagate to the caller unchanged,
//! with no defaults, no partial results, and no logging substitution.

use chrono::Month;
use thiserror::Error;

/// A phrase could not be turned into a day mark or period.
///
/// Every variant quotes the offending input. Tolerating one bad phrase
/// inside a larger batch is the caller's business, not ours.
#[derive(Error, Debug)]
pub enum ParseError {
    /// No recognizer matched the phrase as a whole.
    #[error("unsupported day mark format: '{0}'")]
    UnsupportedFormat(String),

    /// The `с … по …` connective is absent from a period phrase.
    #[error("no period definition found in '{0}'")]
    MissingConnective(String),

    /// The start half of a period definition is absent or blank.
    #[error("period start definition is missing")]
    MissingStart,

    /// The end half of a period definition is absent or blank.
    #[error("period end definition is missing")]
    MissingEnd,

    #[error("unknown month '{0}'")]
    UnknownMonth(String),

    #[error("unknown weekday '{0}'")]
    UnknownWeekday(String),

    #[error("unknown week ordinal '{0}'")]
    UnknownWeekOrdinal(String),

    /// Recognized day-of-month shape, but the day violates the month's
    /// fixed capacity. February's capacity is 29 here; whether the 29th
    /// exists in a particular year is decided at resolution time.
    #[error("invalid day-of-month mark '{origin}': day {day} must stay in range [1, {capacity}]")]
    DayOutOfRange {
        origin: String,
        day: u32,
        capacity: u32,
    },
}

/// A day mark could not be bound to the requested year and zone.
///
/// `Clone`, so a memoized bulk resolution can replay its cached outcome
/// on every access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The mark names a date the target year does not contain
    /// (February 29 against a non-leap year).
    #[error("no such date: {month:?} {day}, {year}")]
    NonexistentDate { year: i32, month: Month, day: u32 },

    /// Week ordinals outside [1, 4] are not resolvable; use a
    /// last-weekday mark for "the last occurrence".
    #[error("week ordinal {0} is outside the supported range [1, 4]")]
    UnsupportedWeekOrdinal(u8),

    /// The wall-clock instant does not map cleanly into the zone
    /// (a DST gap or overlap).
    #[error("ambiguous or nonexistent local time {0}")]
    SkewedLocalTime(String),

    /// Year arithmetic left chrono's representable range.
    #[error("year {0} is outside the representable range")]
    YearOutOfRange(i32),
}
