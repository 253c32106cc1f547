//! Binding marks and periods to concrete years.
//!
//! Everything here is a pure function over immutable values: the caller
//! names the year and zone, and the engine does deterministic calendar
//! arithmetic — leap years, month ends, week counting — returning an error
//! for anything that does not work out exactly. Resolved ranges are cheap
//! to recompute and never kept by this module.
//!
//! A period whose end month precedes its start month is taken to cross the
//! year boundary and resolves to **two** ranges around the requested year:
//! the one that began the previous year and the one that ends the next.
//! Both matter to a caller asking "what does this period mean in year Y".

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, Month, NaiveDate, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::ResolveError;
use crate::mark::{DayMark, Period};

/// A concrete, zone-qualified closed range produced by binding a period
/// (or one mark, used as both ends) to real years.
///
/// Compares, hashes, and deduplicates by value — bulk resolution relies on
/// that to count a boundary range shared by adjacent years once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedRange {
    from: DateTime<Tz>,
    to: DateTime<Tz>,
    note: Option<String>,
}

impl ResolvedRange {
    /// # Panics
    ///
    /// Panics if `from` is after `to`. A reversed range is an internal
    /// invariant violation, not a user-input condition, and is never
    /// silently swapped or swallowed.
    pub fn new(from: DateTime<Tz>, to: DateTime<Tz>, note: Option<String>) -> Self {
        assert!(
            from <= to,
            "resolved range must not be reversed: {from} > {to}"
        );
        Self { from, to, note }
    }

    /// The first instant of the range (start of its first day).
    pub fn start(&self) -> &DateTime<Tz> {
        &self.from
    }

    /// The last instant of the range (end of its last day).
    pub fn end(&self) -> &DateTime<Tz> {
        &self.to
    }

    /// Both bounds at once.
    pub fn bounds(&self) -> (&DateTime<Tz>, &DateTime<Tz>) {
        (&self.from, &self.to)
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// Resolve one day mark to a concrete timestamp.
///
/// `start_of_day` picks the time-of-day beacon: `true` gives
/// `00:00:00.000`, `false` gives `23:59:59.999`. A period's start mark
/// opens its first day and its end mark closes its last, so a period is a
/// closed interval of whole days.
///
/// # Errors
///
/// - [`ResolveError::NonexistentDate`] for a day-of-month mark the target
///   year does not contain (February 29 in a non-leap year) — this
///   surfaces only here, even though parsing already capped February's
///   day at 29.
/// - [`ResolveError::UnsupportedWeekOrdinal`] for a counted-weekday mark
///   with an ordinal outside `[1, 4]`.
/// - [`ResolveError::SkewedLocalTime`] when the wall-clock instant does
///   not map uniquely into the zone (a DST gap or overlap).
/// - [`ResolveError::YearOutOfRange`] when year arithmetic leaves the
///   representable range.
///
/// # Examples
///
/// ```
/// use almanac_core::{resolve_day_mark, DayMark};
/// use chrono::{Datelike, Month};
///
/// let mark = DayMark::LastDayOfMonth { month: Month::February, note: None };
/// let leap = resolve_day_mark(&mark, 2020, chrono_tz::Europe::Moscow, true).unwrap();
/// assert_eq!(leap.day(), 29);
/// let plain = resolve_day_mark(&mark, 2019, chrono_tz::Europe::Moscow, true).unwrap();
/// assert_eq!(plain.day(), 28);
/// ```
pub fn resolve_day_mark(
    mark: &DayMark,
    year: i32,
    zone: Tz,
    start_of_day: bool,
) -> Result<DateTime<Tz>, ResolveError> {
    let date = match *mark {
        DayMark::DayOfMonth { month, day, .. } => {
            NaiveDate::from_ymd_opt(year, month.number_from_month(), day)
                .ok_or(ResolveError::NonexistentDate { year, month, day })?
        }
        DayMark::LastDayOfMonth { month, .. } => last_day_of_month(year, month)?,
        DayMark::LastWeekdayInMonth { month, weekday, .. } => {
            last_weekday_in_month(year, month, weekday)?
        }
        DayMark::WeekdayInMonth {
            month,
            week,
            weekday,
            ..
        } => {
            if !(1..=4).contains(&week) {
                return Err(ResolveError::UnsupportedWeekOrdinal(week));
            }
            weekday_in_month(year, month, week, weekday)?
        }
    };
    localize(date, day_beacon(start_of_day), zone)
}

/// Resolve a period against a year, splitting on the year boundary.
///
/// A same-year period yields one range (`start@Y`, `end@Y`). A
/// year-crossing one yields two: (`start@Y-1`, `end@Y`) and (`start@Y`,
/// `end@Y+1`) — the occurrence that may not have ended yet, and the one
/// that begins this year. The classification compares months only; see
/// [`Period::crosses_year_boundary`].
///
/// # Errors
///
/// Whatever [`resolve_day_mark`] reports for either bound, at any of the
/// involved years.
///
/// # Panics
///
/// A same-month period whose start day exceeds its end day classifies as
/// same-year and therefore resolves to a reversed range, which panics (see
/// [`ResolvedRange::new`]).
pub fn resolve_period(
    period: &Period,
    year: i32,
    zone: Tz,
) -> Result<HashSet<ResolvedRange>, ResolveError> {
    let mut ranges = HashSet::with_capacity(2);
    if period.crosses_year_boundary() {
        ranges.insert(bind(period, year - 1, year, zone)?);
        ranges.insert(bind(period, year, year + 1, zone)?);
    } else {
        ranges.insert(bind(period, year, year, zone)?);
    }
    Ok(ranges)
}

/// Resolve every period against every year, deduplicating by value.
///
/// A year-crossing period resolved against adjacent years shares its
/// boundary range between them; the shared range counts once. Ordering of
/// the result is unspecified.
///
/// # Errors
///
/// The first failure from [`resolve_period`]; no partial result is
/// returned.
pub fn resolve_all<'a, P, Y>(
    periods: P,
    years: Y,
    zone: Tz,
) -> Result<HashSet<ResolvedRange>, ResolveError>
where
    P: IntoIterator<Item = &'a Period>,
    Y: IntoIterator<Item = i32>,
{
    let years: Vec<i32> = years.into_iter().collect();
    let mut ranges = HashSet::new();
    for period in periods {
        for &year in &years {
            ranges.extend(resolve_period(period, year, zone)?);
        }
    }
    Ok(ranges)
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// One concrete range: the start mark opens `start_year`, the end mark
/// closes `end_year`. The period's note rides along.
fn bind(
    period: &Period,
    start_year: i32,
    end_year: i32,
    zone: Tz,
) -> Result<ResolvedRange, ResolveError> {
    let from = resolve_day_mark(&period.start, start_year, zone, true)?;
    let to = resolve_day_mark(&period.end, end_year, zone, false)?;
    Ok(ResolvedRange::new(from, to, period.note.clone()))
}

/// Start-of-day opens a day, end-of-day closes it.
fn day_beacon(start_of_day: bool) -> NaiveTime {
    if start_of_day {
        NaiveTime::MIN
    } else {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid end-of-day beacon")
    }
}

/// First day of the month after `month`; December rolls into January of
/// the next year.
fn first_of_next_month(year: i32, month: Month) -> Result<NaiveDate, ResolveError> {
    let next_year = if month == Month::December {
        year + 1
    } else {
        year
    };
    NaiveDate::from_ymd_opt(next_year, month.succ().number_from_month(), 1)
        .ok_or(ResolveError::YearOutOfRange(next_year))
}

fn last_day_of_month(year: i32, month: Month) -> Result<NaiveDate, ResolveError> {
    first_of_next_month(year, month)?
        .pred_opt()
        .ok_or(ResolveError::YearOutOfRange(year))
}

/// Walk backward from the first day of the following month until the
/// weekday matches; at most seven steps.
fn last_weekday_in_month(
    year: i32,
    month: Month,
    weekday: Weekday,
) -> Result<NaiveDate, ResolveError> {
    let mut date = first_of_next_month(year, month)?;
    loop {
        date = date.pred_opt().ok_or(ResolveError::YearOutOfRange(year))?;
        if date.weekday() == weekday {
            return Ok(date);
        }
    }
}

/// The `week`-th occurrence of `weekday`, counted from its first
/// occurrence on or after day 1. That first occurrence lands within days
/// 1–7 of the month, so ordinals 1–4 never overflow it. A month that
/// starts past the target weekday thereby skips its weekday-less tail
/// week before the count begins.
fn weekday_in_month(
    year: i32,
    month: Month,
    week: u8,
    weekday: Weekday,
) -> Result<NaiveDate, ResolveError> {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
        .ok_or(ResolveError::YearOutOfRange(year))?;
    let to_first_occurrence = i64::from(
        (weekday.num_days_from_monday() + 7 - first.weekday().num_days_from_monday()) % 7,
    );
    Ok(first + Duration::days(to_first_occurrence) + Duration::weeks(i64::from(week) - 1))
}

/// Into the zone, requiring an unambiguous wall-clock mapping.
fn localize(date: NaiveDate, time: NaiveTime, zone: Tz) -> Result<DateTime<Tz>, ResolveError> {
    zone.from_local_datetime(&date.and_time(time))
        .single()
        .ok_or_else(|| ResolveError::SkewedLocalTime(format!("{date}T{time} in {zone}")))
}
