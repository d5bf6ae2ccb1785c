use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// 不带时区的日期时间格式，按 UTC 解释
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// 日期字符串换算为 UTC 时刻
///
/// - `YYYY-MM-DD`：当天 UTC 零点
/// - RFC 3339：按自带偏移换算
/// - 不带偏移的日期时间：视为 UTC
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| Utc.from_utc_datetime(&dt))
}

/// 区间上界：纯日期扩展到当天最后一毫秒，其余同 `parse_instant`
pub fn parse_range_end(value: &str) -> Option<DateTime<Utc>> {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => date
            .and_hms_milli_opt(23, 59, 59, 999)
            .map(|dt| Utc.from_utc_datetime(&dt)),
        Err(_) => parse_instant(value),
    }
}
