//! The fixed Russian vocabulary the parser understands.
//!
//! Three independent prefix-keyed tables: month names, weekday names, and
//! week-ordinal words. Each table matches on a short prefix of the input
//! token (three characters for months and weekdays, four for ordinals), so
//! case endings do not matter: "января", "январь" and "янв" all name the
//! same month. A token no key matches is an unknown-token error naming the
//! text; nothing is ever guessed or defaulted.

use chrono::{Month, Weekday};

use crate::error::ParseError;

const MONTHS: [(&str, Month); 12] = [
    ("янв", Month::January),
    ("фев", Month::February),
    ("мар", Month::March),
    ("апр", Month::April),
    ("мая", Month::May),
    ("июн", Month::June),
    ("июл", Month::July),
    ("авг", Month::August),
    ("сен", Month::September),
    ("окт", Month::October),
    ("ноя", Month::November),
    ("дек", Month::December),
];

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("пон", Weekday::Mon),
    ("вто", Weekday::Tue),
    ("сре", Weekday::Wed),
    ("чет", Weekday::Thu),
    ("пят", Weekday::Fri),
    ("суб", Weekday::Sat),
    ("вос", Weekday::Sun),
];

const WEEK_ORDINALS: [(&str, u8); 4] = [
    ("перв", 1),
    ("втор", 2),
    ("трет", 3),
    ("четв", 4),
];

/// The token truncated to `len` characters. The vocabulary is Cyrillic,
/// so this counts chars, not bytes.
fn prefix(token: &str, len: usize) -> String {
    token.chars().take(len).collect()
}

/// Look a month name up by its three-character prefix.
pub(crate) fn month(token: &str) -> Result<Month, ParseError> {
    let key = prefix(token, 3);
    MONTHS
        .iter()
        .find(|(p, _)| *p == key)
        .map(|(_, month)| *month)
        .ok_or_else(|| ParseError::UnknownMonth(token.to_string()))
}

/// Look a weekday name up by its three-character prefix.
pub(crate) fn weekday(token: &str) -> Result<Weekday, ParseError> {
    let key = prefix(token, 3);
    WEEKDAYS
        .iter()
        .find(|(p, _)| *p == key)
        .map(|(_, weekday)| *weekday)
        .ok_or_else(|| ParseError::UnknownWeekday(token.to_string()))
}

/// Look a week-ordinal word up by its four-character prefix.
pub(crate) fn week_ordinal(token: &str) -> Result<u8, ParseError> {
    let key = prefix(token, 4);
    WEEK_ORDINALS
        .iter()
        .find(|(p, _)| *p == key)
        .map(|(_, week)| *week)
        .ok_or_else(|| ParseError::UnknownWeekOrdinal(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_month_found() {
        let cases = [
            ("января", Month::January),
            ("февраля", Month::February),
            ("марта", Month::March),
            ("апреля", Month::April),
            ("мая", Month::May),
            ("июня", Month::June),
            ("июля", Month::July),
            ("августа", Month::August),
            ("сентября", Month::September),
            ("октября", Month::October),
            ("ноября", Month::November),
            ("декабря", Month::December),
        ];
        for (token, expected) in cases {
            assert_eq!(month(token).unwrap(), expected, "token: {token}");
        }
    }

    #[test]
    fn test_month_prefix_tolerates_case_endings() {
        assert_eq!(month("январь").unwrap(), Month::January);
        assert_eq!(month("янв").unwrap(), Month::January);
    }

    #[test]
    fn test_unknown_month_fails_naming_token() {
        let err = month("хрюкабря").unwrap_err();
        assert!(matches!(err, ParseError::UnknownMonth(_)));
        assert!(err.to_string().contains("хрюкабря"), "got: {err}");
    }

    #[test]
    fn test_every_weekday_found() {
        let cases = [
            ("понедельник", Weekday::Mon),
            ("вторник", Weekday::Tue),
            ("среда", Weekday::Wed),
            ("четверг", Weekday::Thu),
            ("пятница", Weekday::Fri),
            ("суббота", Weekday::Sat),
            ("воскресенье", Weekday::Sun),
        ];
        for (token, expected) in cases {
            assert_eq!(weekday(token).unwrap(), expected, "token: {token}");
        }
    }

    #[test]
    fn test_unknown_weekday_fails() {
        let err = weekday("хрюкота").unwrap_err();
        assert!(matches!(err, ParseError::UnknownWeekday(_)));
        assert!(err.to_string().contains("хрюкота"), "got: {err}");
    }

    #[test]
    fn test_every_week_ordinal_found() {
        let cases = [
            ("первый", 1),
            ("второй", 2),
            ("третий", 3),
            ("четвертый", 4),
        ];
        for (token, expected) in cases {
            assert_eq!(week_ordinal(token).unwrap(), expected, "token: {token}");
        }
    }

    #[test]
    fn test_out_of_table_ordinal_fails() {
        let err = week_ordinal("пятая").unwrap_err();
        assert!(matches!(err, ParseError::UnknownWeekOrdinal(_)));
        assert!(err.to_string().contains("пятая"), "got: {err}");
    }
}
