//! The period aggregate and its lazily-computed resolution view.

use std::collections::HashSet;
use std::sync::OnceLock;

use chrono_tz::Tz;
use serde::Serialize;

use crate::builder::AlmanacBuilder;
use crate::error::ResolveError;
use crate::mark::Period;
use crate::resolve::{resolve_all, ResolvedRange};

/// An unordered, deduplicated collection of [`Period`]s.
///
/// The almanac itself does no date arithmetic; it aggregates periods and
/// hands bulk resolution off to a [`ResolvedAlmanac`] view. Iteration
/// order is unspecified and nothing may depend on it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Almanac {
    periods: HashSet<Period>,
}

impl Almanac {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fluent builder that parses phrase descriptions at build time.
    pub fn builder() -> AlmanacBuilder {
        AlmanacBuilder::new()
    }

    /// Insert a period; returns `false` if an equal one was already held.
    pub fn add(&mut self, period: Period) -> bool {
        self.periods.insert(period)
    }

    /// Remove a period by value; returns `false` if it was not held.
    pub fn remove(&mut self, period: &Period) -> bool {
        self.periods.remove(period)
    }

    pub fn periods(&self) -> impl Iterator<Item = &Period> {
        self.periods.iter()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Bind every period to one year. Nothing is computed until the
    /// returned view is queried.
    pub fn resolve(&self, year: i32, zone: Tz) -> ResolvedAlmanac<'_> {
        self.resolve_years([year], zone)
    }

    /// Bind every period to every listed year in one fell swoop.
    pub fn resolve_years<Y>(&self, years: Y, zone: Tz) -> ResolvedAlmanac<'_>
    where
        Y: IntoIterator<Item = i32>,
    {
        let mut years: Vec<i32> = years.into_iter().collect();
        years.sort_unstable();
        years.dedup();
        ResolvedAlmanac {
            almanac: self,
            years,
            zone,
            ranges: OnceLock::new(),
        }
    }
}

impl FromIterator<Period> for Almanac {
    fn from_iter<I: IntoIterator<Item = Period>>(periods: I) -> Self {
        Self {
            periods: periods.into_iter().collect(),
        }
    }
}

/// The outcome of binding a whole [`Almanac`] to a set of years.
///
/// Resolution runs once, on the first [`ranges`](Self::ranges) call, and
/// the deduplicated set — or the error — is kept in a write-once cell;
/// every later call replays the same outcome. The underlying computation
/// is deterministic, so a racing duplicate computation would only ever
/// store an equal value.
#[derive(Debug)]
pub struct ResolvedAlmanac<'a> {
    almanac: &'a Almanac,
    years: Vec<i32>,
    zone: Tz,
    ranges: OnceLock<Result<HashSet<ResolvedRange>, ResolveError>>,
}

impl ResolvedAlmanac<'_> {
    /// The target years, deduplicated and sorted.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// The deduplicated set of ranges every period resolves to across
    /// every target year.
    ///
    /// # Errors
    ///
    /// The first resolution failure, replayed on every access.
    pub fn ranges(&self) -> Result<&HashSet<ResolvedRange>, ResolveError> {
        self.ranges
            .get_or_init(|| {
                resolve_all(self.almanac.periods(), self.years.iter().copied(), self.zone)
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, NaiveDate, NaiveTime, TimeZone};
    use chrono_tz::Europe::Moscow;

    use crate::mark::DayMark;

    fn dom(month: Month, day: u32) -> DayMark {
        DayMark::DayOfMonth {
            month,
            day,
            note: None,
        }
    }

    fn start_instant(year: i32, month: Month, day: u32) -> chrono::DateTime<Tz> {
        let naive = NaiveDate::from_ymd_opt(year, month.number_from_month(), day)
            .unwrap()
            .and_time(NaiveTime::MIN);
        Moscow.from_local_datetime(&naive).unwrap()
    }

    fn end_instant(year: i32, month: Month, day: u32) -> chrono::DateTime<Tz> {
        let naive = NaiveDate::from_ymd_opt(year, month.number_from_month(), day)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap();
        Moscow.from_local_datetime(&naive).unwrap()
    }

    #[test]
    fn test_add_remove_and_dedup() {
        let mut almanac = Almanac::new();
        let period = Period::new(dom(Month::January, 1), dom(Month::January, 21));

        assert!(almanac.is_empty());
        assert!(almanac.add(period.clone()));
        assert!(!almanac.add(period.clone()), "equal periods deduplicate");
        assert_eq!(almanac.len(), 1);
        assert!(almanac.remove(&period));
        assert!(almanac.is_empty());
    }

    #[test]
    fn test_cross_year_and_plain_periods_resolve_together() {
        let mut almanac = Almanac::new();
        almanac.add(Period::new(dom(Month::January, 1), dom(Month::January, 21)));
        almanac.add(Period::with_note(
            dom(Month::November, 21),
            dom(Month::January, 12),
            "Cross a year",
        ));

        let resolved = almanac.resolve(2019, Moscow);
        let expected = HashSet::from([
            ResolvedRange::new(
                start_instant(2019, Month::January, 1),
                end_instant(2019, Month::January, 21),
                None,
            ),
            ResolvedRange::new(
                start_instant(2018, Month::November, 21),
                end_instant(2019, Month::January, 12),
                Some("Cross a year".into()),
            ),
            ResolvedRange::new(
                start_instant(2019, Month::November, 21),
                end_instant(2020, Month::January, 12),
                Some("Cross a year".into()),
            ),
        ]);
        assert_eq!(resolved.ranges().unwrap(), &expected);
    }

    #[test]
    fn test_adjacent_years_share_the_boundary_range() {
        let almanac: Almanac =
            [Period::new(dom(Month::December, 31), dom(Month::January, 1))]
                .into_iter()
                .collect();

        let resolved = almanac.resolve_years([2019, 2020], Moscow);
        assert_eq!(resolved.ranges().unwrap().len(), 3);
        assert_eq!(resolved.years(), &[2019, 2020]);
    }

    #[test]
    fn test_ranges_are_computed_once_and_replayed() {
        let almanac: Almanac = [Period::new(dom(Month::May, 1), dom(Month::May, 9))]
            .into_iter()
            .collect();

        let resolved = almanac.resolve(2019, Moscow);
        let first = resolved.ranges().unwrap() as *const HashSet<ResolvedRange>;
        let second = resolved.ranges().unwrap() as *const HashSet<ResolvedRange>;
        assert_eq!(first, second, "both calls must serve the same cached set");
    }

    #[test]
    fn test_resolution_errors_replay_too() {
        let almanac: Almanac =
            [Period::new(dom(Month::February, 29), dom(Month::February, 29))]
                .into_iter()
                .collect();

        let resolved = almanac.resolve(2019, Moscow);
        let err = resolved.ranges().unwrap_err();
        assert!(matches!(err, ResolveError::NonexistentDate { .. }));
        assert_eq!(resolved.ranges().unwrap_err(), err);
    }

    #[test]
    fn test_duplicate_years_collapse() {
        let almanac: Almanac = [Period::new(dom(Month::May, 1), dom(Month::May, 9))]
            .into_iter()
            .collect();

        let resolved = almanac.resolve_years([2019, 2019, 2019], Moscow);
        assert_eq!(resolved.years(), &[2019]);
        assert_eq!(resolved.ranges().unwrap().len(), 1);
    }
}
