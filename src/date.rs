//! Parsing and formatting for the `created` timestamps carried by
//! [`crate::record::Record`]s. Source files write timestamps in a handful of
//! shapes (full RFC 3339, a naive datetime, or a bare date), so parsing
//! tries each in turn; values without an explicit offset are taken as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt;

/// The fixed format for `pubdate` values (RFC-822-style, for feed
/// consumers). Not configurable.
pub const PUBDATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %:z";

/// The default pattern for `human_datetime` values, e.g.
/// `Thursday, January 2, 2020 3:04 AM`.
pub const DEFAULT_DATETIME_FORMAT: &str = "%A, %B %-d, %Y %-I:%M %p";

/// The default pattern for `human_date` values, e.g. `January 2, 2020`.
pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";

/// The default pattern for `human_time` values, e.g. `3:04 AM`.
pub const DEFAULT_TIME_FORMAT: &str = "%-I:%M %p";

/// Parses a `created` timestamp into a comparable, formattable value.
///
/// Accepted shapes, tried in order:
///
/// 1. RFC 3339 (`2020-01-02T03:04:05+01:00`)
/// 2. Naive datetime (`2020-01-02T03:04:05` or `2020-01-02 03:04:05`),
///    taken as UTC
/// 3. Bare date (`2020-01-02`), taken as midnight UTC
pub fn parse(created: &str) -> Result<DateTime<FixedOffset>> {
    let created = created.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(created) {
        return Ok(date);
    }

    let utc = FixedOffset::east(0);
    for format in &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(created, format) {
            return Ok(utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(created, "%Y-%m-%d") {
        return Ok(utc.from_utc_datetime(&date.and_hms(0, 0, 0)));
    }

    Err(Error::Unparseable {
        value: created.to_owned(),
    })
}

/// The result of a timestamp-parsing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a `created` timestamp.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Returned when a timestamp matches none of the accepted shapes.
    /// Carries the offending value.
    Unparseable { value: String },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Unparseable { value } => {
                write!(f, "unparseable timestamp `{}`", value)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        let date = parse("2020-01-02T03:04:05+01:00").unwrap();
        assert_eq!(date.format("%Y-%m-%d %H:%M %:z").to_string(), "2020-01-02 03:04 +01:00");
    }

    #[test]
    fn test_parse_naive_datetime() {
        let date = parse("2020-01-02T03:04:05").unwrap();
        assert_eq!(date.format(PUBDATE_FORMAT).to_string(), "Thu, 02 Jan 2020 03:04:05 +00:00");
        assert_eq!(parse("2020-01-02 03:04:05").unwrap(), date);
    }

    #[test]
    fn test_parse_bare_date() {
        let date = parse("2020-01-02").unwrap();
        assert_eq!(date.format(PUBDATE_FORMAT).to_string(), "Thu, 02 Jan 2020 00:00:00 +00:00");
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(
            parse("yesterday"),
            Err(Error::Unparseable {
                value: String::from("yesterday")
            })
        );
    }

    #[test]
    fn test_default_formats() {
        let date = parse("2020-01-02T15:04:05").unwrap();
        assert_eq!(
            date.format(DEFAULT_DATETIME_FORMAT).to_string(),
            "Thursday, January 2, 2020 3:04 PM"
        );
        assert_eq!(date.format(DEFAULT_DATE_FORMAT).to_string(), "January 2, 2020");
        assert_eq!(date.format(DEFAULT_TIME_FORMAT).to_string(), "3:04 PM");
    }

    #[test]
    fn test_ordering() {
        assert!(parse("2020-01-01").unwrap() < parse("2020-01-02").unwrap());
        assert!(parse("2020-01-01T00:00:00").unwrap() < parse("2020-01-01T00:00:01").unwrap());
    }
}
