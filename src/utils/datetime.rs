//! 日期处理工具
//!
//! 上课日全部按 UTC 日历日处理：入参无论是 "2025-08-04" 还是带时区的
//! RFC3339 时间戳，一律取其 UTC 日期并规范化到当天零点，避免时区
//! 造成的星期错位。

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

use crate::errors::{Result, TuitionError};

/// 把 ISO 日期字符串解析为 UTC 零点时间
pub fn parse_utc_day(input: &str) -> Result<DateTime<Utc>> {
    let date = if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        date
    } else {
        DateTime::parse_from_rfc3339(input)
            .map_err(|e| TuitionError::date_parse(format!("无法解析日期 '{input}': {e}")))?
            .with_timezone(&Utc)
            .date_naive()
    };
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// 某个 UTC 日历日的起止时间戳（秒，闭区间）
///
/// 存量数据里 lesson_date 可能带任意时分秒，查询"同一天"的记录时
/// 统一用这个区间做范围匹配。
pub fn day_bounds(day: DateTime<Utc>) -> (i64, i64) {
    let start = day
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp();
    (start, start + 86_399)
}

/// 日期所属的 (month, year)，账单和工资按这个键归档
pub fn month_year_of(day: DateTime<Utc>) -> (i32, i32) {
    (day.month() as i32, day.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        let day = parse_utc_day("2025-08-04").unwrap();
        assert_eq!(day.to_rfc3339(), "2025-08-04T00:00:00+00:00");
    }

    #[test]
    fn test_parse_rfc3339_truncates_to_day() {
        let day = parse_utc_day("2025-08-04T15:30:00+00:00").unwrap();
        assert_eq!(day.to_rfc3339(), "2025-08-04T00:00:00+00:00");
    }

    #[test]
    fn test_parse_rfc3339_normalizes_timezone() {
        // UTC+7 的 2025-08-05 02:00 实际是 UTC 的 08-04
        let day = parse_utc_day("2025-08-05T02:00:00+07:00").unwrap();
        assert_eq!(day.to_rfc3339(), "2025-08-04T00:00:00+00:00");
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(parse_utc_day("not-a-date").is_err());
        assert!(parse_utc_day("2025-13-40").is_err());
    }

    #[test]
    fn test_day_bounds() {
        let day = parse_utc_day("2025-08-04").unwrap();
        let (start, end) = day_bounds(day);
        assert_eq!(end - start, 86_399);
        assert_eq!(start % 86_400, 0);
    }

    #[test]
    fn test_month_year_of() {
        let day = parse_utc_day("2025-12-31").unwrap();
        assert_eq!(month_year_of(day), (12, 2025));
    }
}
