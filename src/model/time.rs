//! Timestamp codecs for the two formats the tool deals with.
//!
//! The Flasky server reports `date_last_changed` as an RFC-1123-style
//! string pinned to its own clock, which runs a fixed number of hours
//! behind local wall-clock time. [`parse_server_timestamp`] adds that
//! offset so server times and file mtimes compare on the same axis.
//!
//! The watermark file uses a plain local format with microseconds
//! (`2024-01-02 15:04:05.000000`), round-tripped by
//! [`parse_local_timestamp`] / [`format_local_timestamp`].

use chrono::{Duration, NaiveDateTime};

use crate::error::{Error, Result};

/// Server timestamp format: `Tue, 02 Jan 2024 15:04:05 GMT`.
const SERVER_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Watermark timestamp format: `2024-01-02 15:04:05.000000`.
const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Parse a server `date_last_changed` string and normalize it to
/// local wall-clock time by adding the configured server offset.
///
/// # Errors
///
/// Returns `Error::Timestamp` if the string does not match the
/// server's format.
pub fn parse_server_timestamp(value: &str, offset_hours: i64) -> Result<NaiveDateTime> {
    let parsed =
        NaiveDateTime::parse_from_str(value, SERVER_FORMAT).map_err(|source| Error::Timestamp {
            value: value.to_string(),
            source,
        })?;
    Ok(parsed + Duration::hours(offset_hours))
}

/// Parse a watermark timestamp as written by [`format_local_timestamp`].
///
/// # Errors
///
/// Returns `Error::Timestamp` if the string does not match the local
/// format.
pub fn parse_local_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, LOCAL_FORMAT).map_err(|source| Error::Timestamp {
        value: value.to_string(),
        source,
    })
}

/// Format a timestamp for the watermark file.
#[must_use]
pub fn format_local_timestamp(value: NaiveDateTime) -> String {
    value.format(LOCAL_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn server_timestamp_is_shifted_by_offset() {
        let parsed = parse_server_timestamp("Tue, 02 Jan 2024 15:00:00 GMT", 8).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn server_timestamp_zero_offset() {
        let parsed = parse_server_timestamp("Mon, 01 Jan 2024 00:00:00 GMT", 0).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn server_timestamp_rejects_other_formats() {
        assert!(parse_server_timestamp("2024-01-02 15:00:00", 8).is_err());
        assert!(parse_server_timestamp("", 8).is_err());
    }

    #[test]
    fn local_timestamp_round_trips() {
        let value = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_micro_opt(9, 30, 12, 123_456)
            .unwrap();
        let formatted = format_local_timestamp(value);
        assert_eq!(formatted, "2024-03-15 09:30:12.123456");
        assert_eq!(parse_local_timestamp(&formatted).unwrap(), value);
    }

    #[test]
    fn local_timestamp_rejects_server_format() {
        assert!(parse_local_timestamp("Tue, 02 Jan 2024 15:00:00 GMT").is_err());
    }
}
