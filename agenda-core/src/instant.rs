//! Normalization of the timestamp strings used by the external services.
//!
//! The calendar feed and the task database hand back timestamps in a
//! handful of shapes: with or without fractional seconds, with or without a
//! UTC offset, or as a bare date. Everything is reduced to a timezone-naive
//! wall-clock `NaiveDateTime`; an offset suffix is stripped, never applied.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{AgendaError, AgendaResult};

/// Datetime formats tried in order; first match wins.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

/// Parse a timestamp into a wall-clock instant.
///
/// Accepted shapes, in priority order:
/// 1. `YYYY-MM-DDTHH:MM:SS.ffffff`
/// 2. `YYYY-MM-DDTHH:MM:SS`
/// 3. `YYYY-MM-DD` (midnight assumed)
///
/// each optionally carrying a trailing `Z`, `+HH:MM`, or `-HH:MM` offset.
pub fn parse_instant(raw: &str) -> AgendaResult<NaiveDateTime> {
    let stripped = strip_utc_offset(raw);

    for format in DATETIME_FORMATS {
        if let Ok(instant) = NaiveDateTime::parse_from_str(stripped, format) {
            return Ok(instant);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(stripped, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap());
    }

    Err(AgendaError::Parse(format!(
        "unrecognized timestamp '{raw}'"
    )))
}

/// Drop a trailing UTC-offset suffix, keeping the wall-clock part.
///
/// A negative offset's hyphen is told apart from the date's own hyphens by
/// the total hyphen count: a plain timestamp has exactly two.
fn strip_utc_offset(raw: &str) -> &str {
    if let Some(head) = raw.strip_suffix('Z') {
        return head;
    }
    if let Some((head, _)) = raw.split_once('+') {
        return head;
    }
    if raw.matches('-').count() > 2 {
        if let Some((head, _)) = raw.rsplit_once('-') {
            return head;
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 3)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn parses_trailing_z() {
        assert_eq!(parse_instant("2024-07-03T10:00:00Z").unwrap(), at(10, 0, 0));
    }

    #[test]
    fn parses_positive_offset_as_wall_clock() {
        // The offset is stripped, not applied.
        assert_eq!(
            parse_instant("2024-07-03T10:00:00+02:00").unwrap(),
            at(10, 0, 0)
        );
    }

    #[test]
    fn parses_negative_offset_as_wall_clock() {
        assert_eq!(
            parse_instant("2024-07-03T10:00:00-04:00").unwrap(),
            at(10, 0, 0)
        );
    }

    #[test]
    fn parses_fractional_seconds() {
        let expected = NaiveDate::from_ymd_opt(2024, 7, 3)
            .unwrap()
            .and_hms_milli_opt(10, 0, 0, 500)
            .unwrap();
        assert_eq!(parse_instant("2024-07-03T10:00:00.500").unwrap(), expected);
    }

    #[test]
    fn date_only_becomes_midnight() {
        assert_eq!(parse_instant("2024-07-03").unwrap(), at(0, 0, 0));
    }

    #[test]
    fn rejects_unrecognized_input() {
        let err = parse_instant("next tuesday").unwrap_err();
        assert!(err.to_string().contains("next tuesday"));
    }
}
