use chrono::{NaiveDate, NaiveDateTime};

use crate::error::FieldError;

/// Display format used by tables and reports.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Input format, `yyyyMMdd+HHmm`, e.g. `20250101+0800`.
const TOKEN_LEN: usize = 13;
const SEPARATOR_AT: usize = 8;

/// Parse a fixed-width `yyyyMMdd+HHmm` token into a naive date-time.
///
/// The shape is checked strictly: eight ASCII digits, a `+`, four ASCII
/// digits. Month must be 1..=12, day 1..=31, hour below 24 and minute
/// below 60. A day past the end of its month resolves to the month's last
/// day, so `20250230` reads as 2025-02-28.
pub fn parse_datetime(token: &str) -> Result<NaiveDateTime, FieldError> {
    let invalid = || FieldError::InvalidDateTime(token.to_string());

    let bytes = token.as_bytes();
    if bytes.len() != TOKEN_LEN || bytes[SEPARATOR_AT] != b'+' {
        return Err(invalid());
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == SEPARATOR_AT || b.is_ascii_digit());
    if !digits_ok {
        return Err(invalid());
    }

    let num = |range: std::ops::Range<usize>| -> u32 {
        token[range]
            .bytes()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    };

    let year = num(0..4) as i32;
    let month = num(4..6);
    let day = num(6..8);
    let hour = num(9..11);
    let minute = num(11..13);

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(invalid());
    }
    let date = (1..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
        .ok_or_else(invalid)?;
    date.and_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Inverse of [`parse_datetime`].
pub fn format_token(dt: &NaiveDateTime) -> String {
    dt.format("%Y%m%d+%H%M").to_string()
}

/// Whole hours between two points, truncated toward zero.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_hours()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_valid_token() {
        let dt = parse_datetime("20250103+1730").unwrap();
        assert_eq!(dt.year(), 2025);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 3);
        assert_eq!(dt.hour(), 17);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.second(), 0);
    }

    #[test]
    fn rejects_malformed_shapes() {
        for token in [
            "",
            "20250101",
            "202501010800",
            "20250101-0800",
            "2025011+08000",
            "20250101+080",
            "2025O101+0800",
            " 20250101+0800",
            "20250101+0800 ",
            "２0250101+0800",
        ] {
            assert_eq!(
                parse_datetime(token),
                Err(FieldError::InvalidDateTime(token.to_string())),
                "token {token:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_out_of_range_fields() {
        for token in [
            "20250001+0800",
            "20251301+0800",
            "20250100+0800",
            "20250132+0800",
            "20250101+2400",
            "20250101+0860",
        ] {
            assert!(parse_datetime(token).is_err(), "token {token:?}");
        }
    }

    #[test]
    fn day_past_month_end_resolves_to_last_day() {
        let feb = parse_datetime("20250230+0800").unwrap();
        assert_eq!(feb, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap().and_hms_opt(8, 0, 0).unwrap());

        let leap = parse_datetime("20240231+0000").unwrap();
        assert_eq!((leap.month(), leap.day()), (2, 29));

        let apr = parse_datetime("20250431+1200").unwrap();
        assert_eq!((apr.month(), apr.day(), apr.hour()), (4, 30, 12));
    }

    #[test]
    fn accepts_leap_day() {
        assert!(parse_datetime("20240229+0000").is_ok());
    }

    #[test]
    fn format_token_reproduces_input() {
        let dt = parse_datetime("20250110+1700").unwrap();
        assert_eq!(format_token(&dt), "20250110+1700");
    }

    #[test]
    fn hours_truncate_partial_hours() {
        let a = parse_datetime("20250101+0800").unwrap();
        let b = parse_datetime("20250101+1059").unwrap();
        assert_eq!(hours_between(a, b), 2);
        assert_eq!(hours_between(b, a), -2);
    }
}
