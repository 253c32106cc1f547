//! # almanac-core
//!
//! Deterministic year-binding for natural-language recurring calendar
//! periods.
//!
//! A phrase like "последняя пятница апреля" (the last Friday of April)
//! names a day of *every* year. This crate parses such phrases into
//! abstract [`DayMark`]s, pairs them into [`Period`]s ("с 21 ноября по
//! 12 января"), and binds either to a concrete year and IANA time zone.
//! A period whose end month precedes its start month crosses the year
//! boundary and resolves to the two ranges relevant to the requested
//! year. Parsing and resolution never guess: anything that cannot be
//! handled deterministically is a loud, input-quoting error.
//!
//! ## Modules
//!
//! - [`mark`] — the day-mark model: marks, periods, month capacities
//! - [`parse`] — phrase → mark/period; ordered recognizers, first match wins
//! - [`resolve`] — mark/period → concrete zone-qualified ranges
//! - [`almanac`] — the period aggregate with lazy bulk resolution
//! - [`builder`] — fluent, parse-at-build construction of an aggregate
//! - [`error`] — the two disjoint failure domains, parse and resolve

pub mod almanac;
pub mod builder;
pub mod error;
pub mod mark;
pub mod parse;
pub mod resolve;
mod vocab;

pub use almanac::{Almanac, ResolvedAlmanac};
pub use builder::AlmanacBuilder;
pub use error::{ParseError, ResolveError};
pub use mark::{month_capacity, DayMark, Period};
pub use parse::{parse_day_mark, parse_period_from_halves, parse_period_phrase};
pub use resolve::{resolve_all, resolve_day_mark, resolve_period, ResolvedRange};
