use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, SecondsFormat, Utc};

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses a canonical `YYYY-MM-DD` key. The shape is checked byte by byte
/// first because chrono also accepts unpadded fields like `2024-3-5`.
pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let shaped = bytes.iter().enumerate().all(|(idx, byte)| match idx {
        4 | 7 => *byte == b'-',
        _ => byte.is_ascii_digit(),
    });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_KEY_FORMAT).ok()
}

/// Reads the UTC calendar day out of an ISO 8601 value. Accepts a full
/// RFC 3339 instant with any offset, or a bare date (read as UTC midnight).
pub fn date_from_instant(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc).date_naive());
    }
    parse_date_key(value)
}

pub fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::default()).and_utc()
}

/// `2024-03-05T00:00:00.000Z`
pub fn utc_midnight_iso(date: NaiveDate) -> String {
    utc_midnight(date).to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn year_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

pub fn days_in_year(year: i32) -> Option<i64> {
    let start = year_start(year)?;
    let end = year_start(year.checked_add(1)?)?;
    Some((end - start).num_days())
}

/// 0 = Sunday .. 6 = Saturday
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

pub fn key_in_year(date_key: &str, year: i32) -> bool {
    parse_date_key(date_key).is_some_and(|date| date.year() == year)
}

/// `month0` is zero based.
pub fn month_label(month0: usize) -> &'static str {
    MONTH_LABELS.get(month0).copied().unwrap_or("")
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_key_requires_canonical_shape() {
        assert_eq!(
            parse_date_key("2024-03-05"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert!(parse_date_key("2024-3-5").is_none());
        assert!(parse_date_key("2024-13-40").is_none());
        assert!(parse_date_key("2023-02-29").is_none());
        assert!(parse_date_key("20240305").is_none());
        assert!(parse_date_key("").is_none());
    }

    #[test]
    fn instants_resolve_to_their_utc_day() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(date_from_instant("2024-03-05T00:00:00.000Z"), Some(day));
        // 23:30 in New York is already the next day in UTC.
        assert_eq!(
            date_from_instant("2024-03-04T23:30:00-05:00"),
            Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        );
        assert_eq!(
            date_from_instant("2024-03-06T00:30:00+02:00"),
            Some(day)
        );
        assert_eq!(date_from_instant("2024-03-05"), Some(day));
        assert!(date_from_instant("not a date").is_none());
    }

    #[test]
    fn utc_midnight_iso_matches_browser_format() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(utc_midnight_iso(day), "2024-06-01T00:00:00.000Z");
    }

    #[test]
    fn days_in_year_follows_leap_rules() {
        assert_eq!(days_in_year(2023), Some(365));
        assert_eq!(days_in_year(2024), Some(366));
        assert_eq!(days_in_year(2000), Some(366));
        assert_eq!(days_in_year(1900), Some(365));
    }

    #[test]
    fn key_in_year_rejects_other_years_and_garbage() {
        assert!(key_in_year("2024-12-31", 2024));
        assert!(!key_in_year("2025-01-01", 2024));
        assert!(!key_in_year("garbage", 2024));
    }
}
