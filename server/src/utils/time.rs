//! Time helpers for business timezone conversion
//!
//! All date → timestamp conversion happens at the API handler layer;
//! the repository layer only ever sees `i64` Unix millis.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date format: {}", date)))
}

/// Date start (00:00:00) → Unix millis in the business timezone
///
/// DST gap fallback: if the local time does not exist, fall back to UTC.
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_time(NaiveTime::MIN);
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Unix millis → calendar date in the business timezone
pub fn millis_to_date(millis: i64, tz: Tz) -> NaiveDate {
    millis_to_naive(millis, tz).date()
}

/// Unix millis → timezone-naive local datetime (business timezone)
pub fn millis_to_naive(millis: i64, tz: Tz) -> NaiveDateTime {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.with_timezone(&tz).naive_local(),
        None => NaiveDateTime::default(),
    }
}

/// Half-open month window `[first day 00:00, next month 00:00)` as millis
///
/// A record on the last second of the month falls inside the window, so
/// months partition the timeline with no gaps or double counting.
pub fn month_range_millis(year: i32, month: u32, tz: Tz) -> AppResult<(i64, i64)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::Validation(format!("Invalid month: {}-{}", year, month)))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| AppError::Validation(format!("Invalid month: {}-{}", year, month)))?;
    Ok((day_start_millis(start, tz), day_start_millis(next, tz)))
}

const MONTH_NAMES_ES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Spanish month name (1-12); out-of-range falls back to the number
pub fn month_name_es(month: u32) -> String {
    MONTH_NAMES_ES
        .get(month.wrapping_sub(1) as usize)
        .map(|s| s.to_string())
        .unwrap_or_else(|| month.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::UTC;

    #[test]
    fn month_window_is_half_open() {
        let (start, end) = month_range_millis(2024, 3, UTC).unwrap();
        let first_instant = day_start_millis(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), UTC);
        assert_eq!(start, first_instant);

        // 2024-03-31 23:59:59.999 still belongs to March
        let last_ms = day_start_millis(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(), UTC) - 1;
        assert!(last_ms >= start && last_ms < end);
    }

    #[test]
    fn adjacent_months_partition_the_timeline() {
        let (_, mar_end) = month_range_millis(2024, 3, UTC).unwrap();
        let (apr_start, _) = month_range_millis(2024, 4, UTC).unwrap();
        assert_eq!(mar_end, apr_start);

        let (_, dec_end) = month_range_millis(2024, 12, UTC).unwrap();
        let (jan_start, _) = month_range_millis(2025, 1, UTC).unwrap();
        assert_eq!(dec_end, jan_start);
    }

    #[test]
    fn rejects_invalid_month() {
        assert!(month_range_millis(2024, 13, UTC).is_err());
        assert!(month_range_millis(2024, 0, UTC).is_err());
    }

    #[test]
    fn spanish_month_names() {
        assert_eq!(month_name_es(1), "Enero");
        assert_eq!(month_name_es(12), "Diciembre");
        assert_eq!(month_name_es(13), "13");
    }

    #[test]
    fn roundtrip_date_through_millis() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let ms = day_start_millis(date, UTC);
        assert_eq!(millis_to_date(ms, UTC), date);
    }
}
