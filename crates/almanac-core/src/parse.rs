//! Phrase recognition: from natural-language Russian to day marks and
//! periods.
//!
//! The matcher holds a fixed, ordered list of recognizers. Each recognizer
//! either matches the *entire* phrase (the patterns are anchored) or
//! abstains; the first full match wins. Tokens inside a matched phrase are
//! resolved through the vocabulary tables, and a token the vocabulary does
//! not know fails the parse right there.
//!
//! Parsing never tolerates bad input: no defaults, no skipping, no
//! guessing. A phrase that matches no recognizer is an unsupported-format
//! error quoting the input; a phrase that matches a recognizer but carries
//! an invalid value (day 33, unknown month) is its own, more specific
//! error. Callers that want to survive one bad phrase in a batch must
//! handle that themselves.

use std::sync::LazyLock;

use chrono::Month;
use regex::Regex;

use crate::error::ParseError;
use crate::mark::{month_capacity, DayMark, Period};
use crate::vocab;

static PERIOD_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*со?\s+(.+)\s+по\s+(.+)\s*$").expect("valid period regex"));

static DAY_OF_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,2})\s+(\S+)\s*$").expect("valid day-of-month regex"));

static LAST_WEEKDAY_IN_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*послед\S*\s+(\S+)\s+(\S+)\s*$").expect("valid last-weekday regex")
});

static LAST_DAY_OF_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*кон\S*\s+(\S+)\s*$").expect("valid last-day regex"));

static WEEKDAY_IN_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(пер\S*|втор\S*|трет\S*|чет\S*)\s+(\S+)\s+(\S+)\s*$")
        .expect("valid weekday-in-month regex")
});

static FEBRUARY_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*28\s*\(\s*29\s*\)\s+февр\S*\s*$").expect("valid february-tail regex")
});

/// A recognizer either produces a mark, abstains (the phrase is not its
/// shape), or fails loudly (its shape, but an invalid value inside).
type Recognizer = fn(&str) -> Result<Option<DayMark>, ParseError>;

/// Evaluation order is fixed; the first recognizer to match the whole
/// phrase wins. The patterns are mutually disjoint, so the order carries
/// no hidden priority — it is still data, not logic.
const RECOGNIZERS: [Recognizer; 5] = [
    day_of_month,
    last_weekday_in_month,
    last_day_of_month,
    weekday_in_month,
    february_tail,
];

/// Parse one phrase into one [`DayMark`].
///
/// # Supported Phrases
///
/// - `"11 января"` — a fixed day of a month
/// - `"последний вторник августа"` — the last weekday of a month
/// - `"конец мая"` — the last day of a month
/// - `"третий вторник августа"` — a counted weekday, ordinals 1–4
/// - `"28 (29) февраля"` — alias for the last day of February
///
/// # Errors
///
/// [`ParseError::UnsupportedFormat`] if no recognizer matches; an
/// unknown-token or out-of-range error if a recognizer matches but a
/// value inside the phrase is invalid.
///
/// # Examples
///
/// ```
/// use almanac_core::{parse_day_mark, DayMark};
/// use chrono::Month;
///
/// let mark = parse_day_mark("11 января").unwrap();
/// assert_eq!(
///     mark,
///     DayMark::DayOfMonth { month: Month::January, day: 11, note: None }
/// );
/// ```
pub fn parse_day_mark(text: &str) -> Result<DayMark, ParseError> {
    for recognize in RECOGNIZERS {
        if let Some(mark) = recognize(text)? {
            return Ok(mark);
        }
    }
    Err(ParseError::UnsupportedFormat(text.to_string()))
}

/// Parse a whole period phrase of the shape `"с <start> по <end>"`.
///
/// The euphonic variant `"со"` is accepted too. Both halves go through
/// [`parse_day_mark`].
///
/// # Errors
///
/// [`ParseError::MissingConnective`] if the `с … по …` shape is absent;
/// otherwise whatever [`parse_day_mark`] reports for the failing half.
///
/// # Examples
///
/// ```
/// use almanac_core::parse_period_phrase;
///
/// let period = parse_period_phrase("с 1 января по 8 февраля").unwrap();
/// assert!(!period.crosses_year_boundary());
/// ```
pub fn parse_period_phrase(text: &str) -> Result<Period, ParseError> {
    let caps = PERIOD_PHRASE
        .captures(text)
        .ok_or_else(|| ParseError::MissingConnective(text.to_string()))?;
    parse_period_from_halves(Some(&caps[1]), Some(&caps[2]))
}

/// Parse a period from its two bound phrases given separately.
///
/// # Errors
///
/// [`ParseError::MissingStart`] / [`ParseError::MissingEnd`] if a half is
/// absent or blank; otherwise whatever [`parse_day_mark`] reports for the
/// failing half.
pub fn parse_period_from_halves(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Period, ParseError> {
    let start = start
        .filter(|text| !text.trim().is_empty())
        .ok_or(ParseError::MissingStart)?;
    let end = end
        .filter(|text| !text.trim().is_empty())
        .ok_or(ParseError::MissingEnd)?;
    Ok(Period::new(parse_day_mark(start)?, parse_day_mark(end)?))
}

// ── Recognizers ─────────────────────────────────────────────────────────────

/// `"<1-2 digit day> <month>"`, with the day checked against the month's
/// fixed capacity (February counts as 29; the leap check is resolution's).
fn day_of_month(text: &str) -> Result<Option<DayMark>, ParseError> {
    let Some(caps) = DAY_OF_MONTH.captures(text) else {
        return Ok(None);
    };
    let month = vocab::month(&caps[2])?;
    let day: u32 = caps[1]
        .parse()
        .map_err(|_| ParseError::UnsupportedFormat(text.to_string()))?;
    let capacity = month_capacity(month);
    if !(1..=capacity).contains(&day) {
        return Err(ParseError::DayOutOfRange {
            origin: text.trim().to_string(),
            day,
            capacity,
        });
    }
    Ok(Some(DayMark::DayOfMonth {
        month,
        day,
        note: None,
    }))
}

/// `"послед… <weekday> <month>"`.
fn last_weekday_in_month(text: &str) -> Result<Option<DayMark>, ParseError> {
    let Some(caps) = LAST_WEEKDAY_IN_MONTH.captures(text) else {
        return Ok(None);
    };
    Ok(Some(DayMark::LastWeekdayInMonth {
        month: vocab::month(&caps[2])?,
        weekday: vocab::weekday(&caps[1])?,
        note: None,
    }))
}

/// `"кон… <month>"`.
fn last_day_of_month(text: &str) -> Result<Option<DayMark>, ParseError> {
    let Some(caps) = LAST_DAY_OF_MONTH.captures(text) else {
        return Ok(None);
    };
    Ok(Some(DayMark::LastDayOfMonth {
        month: vocab::month(&caps[1])?,
        note: None,
    }))
}

/// `"<ordinal> <weekday> <month>"`.
fn weekday_in_month(text: &str) -> Result<Option<DayMark>, ParseError> {
    let Some(caps) = WEEKDAY_IN_MONTH.captures(text) else {
        return Ok(None);
    };
    Ok(Some(DayMark::WeekdayInMonth {
        month: vocab::month(&caps[3])?,
        week: vocab::week_ordinal(&caps[1])?,
        weekday: vocab::weekday(&caps[2])?,
        note: None,
    }))
}

/// `"28 (29) февр…"` — the conventional written form for "the last day of
/// February, whichever that is this year".
fn february_tail(text: &str) -> Result<Option<DayMark>, ParseError> {
    Ok(FEBRUARY_TAIL.is_match(text).then(|| DayMark::LastDayOfMonth {
        month: Month::February,
        note: None,
    }))
}
