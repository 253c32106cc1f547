//! The day-mark model: year-independent descriptions of a calendar day,
//! and the periods spanned between two of them.
//!
//! Values here are built once — by [`crate::parse_day_mark`] or by hand —
//! and never mutated. Equality is by value, notes included, which is what
//! lets aggregates deduplicate periods and resolved ranges.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Month, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::ResolveError;
use crate::resolve::{self, ResolvedRange};

/// How many days a month can carry, independent of any concrete year.
///
/// February counts as 29: a mark for the 29th is representable, and
/// whether it exists in a given year is decided at resolution time.
pub fn month_capacity(month: Month) -> u32 {
    match month {
        Month::February => 29,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

/// A year-independent description of a single calendar day.
///
/// The set of variants is closed; resolution dispatches exhaustively over
/// it. Each variant carries an optional free-form note that travels with
/// the mark but takes no part in resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum DayMark {
    /// A fixed day, like *the 21st of October*.
    DayOfMonth {
        month: Month,
        day: u32,
        note: Option<String>,
    },
    /// A counted weekday, like *the second Monday of August*.
    ///
    /// `week` must stay in `[1, 4]` to be resolvable; "the last occurrence"
    /// is [`DayMark::LastWeekdayInMonth`], not a special ordinal.
    WeekdayInMonth {
        month: Month,
        week: u8,
        weekday: Weekday,
        note: Option<String>,
    },
    /// The final occurrence of a weekday, like *the last Wednesday of June*.
    LastWeekdayInMonth {
        month: Month,
        weekday: Weekday,
        note: Option<String>,
    },
    /// The final day of a month; for February the 29th on leap years and
    /// the 28th otherwise.
    LastDayOfMonth { month: Month, note: Option<String> },
}

impl DayMark {
    /// The month this mark points into.
    pub fn month(&self) -> Month {
        match self {
            Self::DayOfMonth { month, .. }
            | Self::WeekdayInMonth { month, .. }
            | Self::LastWeekdayInMonth { month, .. }
            | Self::LastDayOfMonth { month, .. } => *month,
        }
    }

    /// The free-form note attached to this mark, if any.
    pub fn note(&self) -> Option<&str> {
        match self {
            Self::DayOfMonth { note, .. }
            | Self::WeekdayInMonth { note, .. }
            | Self::LastWeekdayInMonth { note, .. }
            | Self::LastDayOfMonth { note, .. } => note.as_deref(),
        }
    }

    /// Bind this mark to a concrete year and zone.
    ///
    /// `start_of_day` picks the time-of-day beacon: `true` gives
    /// `00:00:00.000`, `false` gives `23:59:59.999`, so a single mark used
    /// as both ends of a period spans one full closed day.
    ///
    /// # Errors
    ///
    /// See [`crate::resolve_day_mark`].
    pub fn resolve(
        &self,
        year: i32,
        zone: Tz,
        start_of_day: bool,
    ) -> Result<DateTime<Tz>, ResolveError> {
        resolve::resolve_day_mark(self, year, zone, start_of_day)
    }
}

impl fmt::Display for DayMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DayOfMonth { month, day, .. } => write!(f, "{day} of {}", month.name()),
            Self::WeekdayInMonth {
                month,
                week,
                weekday,
                ..
            } => write!(f, "{} #{week} in {}", weekday_name(*weekday), month.name()),
            Self::LastWeekdayInMonth { month, weekday, .. } => {
                write!(f, "the last {} in {}", weekday_name(*weekday), month.name())
            }
            Self::LastDayOfMonth { month, .. } => {
                write!(f, "the last day of {}", month.name())
            }
        }
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// A recurring span between two day marks.
///
/// There is no ordering invariant between `start` and `end`: an end month
/// that precedes the start month is meaningful and marks the period as
/// crossing the year boundary (see [`Period::crosses_year_boundary`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    pub start: DayMark,
    pub end: DayMark,
    pub note: Option<String>,
}

impl Period {
    pub fn new(start: DayMark, end: DayMark) -> Self {
        Self {
            start,
            end,
            note: None,
        }
    }

    pub fn with_note(start: DayMark, end: DayMark, note: impl Into<String>) -> Self {
        Self {
            start,
            end,
            note: Some(note.into()),
        }
    }

    /// Whether this period spans a year boundary.
    ///
    /// Months are compared as integers 1–12; days are never consulted,
    /// even when both marks share a month and the start day exceeds the
    /// end day.
    pub fn crosses_year_boundary(&self) -> bool {
        self.start.month().number_from_month() > self.end.month().number_from_month()
    }

    /// Bind this period to a concrete year and zone.
    ///
    /// # Errors
    ///
    /// See [`crate::resolve_period`], which also documents the panic on a
    /// reversed resolved range.
    pub fn resolve(&self, year: i32, zone: Tz) -> Result<HashSet<ResolvedRange>, ResolveError> {
        resolve::resolve_period(self, year, zone)
    }
}
