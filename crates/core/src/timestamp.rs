use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateParts {
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
    pub minute: String,
    pub second: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("日時文字列から6つの数値を取り出せませんでした: {0}")]
    MalformedTimestamp(String),
}

// Takes the first six runs of digits in source order; separators and any
// trailing runs (timezone offsets etc.) are irrelevant. Digit strings are
// kept verbatim, so an out-of-range month like "22" passes through.
pub fn parse_timestamp(input: &str) -> Result<DateParts, TimestampError> {
    let mut runs: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in input.chars() {
        if runs.len() == 6 {
            break;
        }
        if ch.is_ascii_digit() {
            current.push(ch);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if runs.len() < 6 && !current.is_empty() {
        runs.push(current);
    }

    if runs.len() < 6 {
        return Err(TimestampError::MalformedTimestamp(input.to_string()));
    }

    let mut runs = runs.into_iter();
    Ok(DateParts {
        year: runs.next().unwrap_or_default(),
        month: runs.next().unwrap_or_default(),
        day: runs.next().unwrap_or_default(),
        hour: runs.next().unwrap_or_default(),
        minute: runs.next().unwrap_or_default(),
        second: runs.next().unwrap_or_default(),
    })
}

impl DateParts {
    pub fn to_naive_datetime(&self) -> Option<NaiveDateTime> {
        let year: i32 = self.year.parse().ok()?;
        let month: u32 = self.month.parse().ok()?;
        let day: u32 = self.day.parse().ok()?;
        let hour: u32 = self.hour.parse().ok()?;
        let minute: u32 = self.minute.parse().ok()?;
        let second: u32 = self.second.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_timestamp, TimestampError};
    use chrono::{Datelike, Timelike};

    #[test]
    fn parse_timestamp_splits_exif_style_string() {
        let parts = parse_timestamp("2001-02-03 04:05:06 -0700").expect("must parse");
        assert_eq!(parts.year, "2001");
        assert_eq!(parts.month, "02");
        assert_eq!(parts.day, "03");
        assert_eq!(parts.hour, "04");
        assert_eq!(parts.minute, "05");
        assert_eq!(parts.second, "06");
    }

    #[test]
    fn parse_timestamp_ignores_separator_style() {
        let parts = parse_timestamp("2024:12:31 23:59:58").expect("must parse");
        assert_eq!(parts.year, "2024");
        assert_eq!(parts.second, "58");
    }

    #[test]
    fn parse_timestamp_keeps_digit_strings_verbatim() {
        let parts = parse_timestamp("2111-22-33 44:55:66 -0700").expect("must parse");
        assert_eq!(parts.month, "22");
        assert_eq!(parts.day, "33");
        assert_eq!(parts.hour, "44");
        assert_eq!(parts.second, "66");
    }

    #[test]
    fn parse_timestamp_accepts_run_ending_at_end_of_input() {
        let parts = parse_timestamp("2001-02-03 04:05:06").expect("must parse");
        assert_eq!(parts.second, "06");
    }

    #[test]
    fn parse_timestamp_rejects_short_input() {
        let err = parse_timestamp("2001-02-03 04:05").expect_err("must fail");
        assert!(matches!(err, TimestampError::MalformedTimestamp(_)));
    }

    #[test]
    fn parse_timestamp_rejects_empty_input() {
        let err = parse_timestamp("").expect_err("must fail");
        assert!(matches!(err, TimestampError::MalformedTimestamp(_)));
    }

    #[test]
    fn to_naive_datetime_converts_valid_parts() {
        let parts = parse_timestamp("2001-02-03 04:05:06 -0700").expect("must parse");
        let dt = parts.to_naive_datetime().expect("must convert");
        assert_eq!(dt.year(), 2001);
        assert_eq!(dt.month(), 2);
        assert_eq!(dt.day(), 3);
        assert_eq!(dt.hour(), 4);
        assert_eq!(dt.minute(), 5);
        assert_eq!(dt.second(), 6);
    }

    #[test]
    fn to_naive_datetime_rejects_impossible_dates() {
        let parts = parse_timestamp("2111-22-33 44:55:66 -0700").expect("must parse");
        assert!(parts.to_naive_datetime().is_none());
    }
}
