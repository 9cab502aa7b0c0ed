//! 时间显示格式化

use chrono::{DateTime, NaiveDateTime, Utc};

const NEVER: &str = "Never";

/// 解析后端给出的时间字符串
///
/// 支持 RFC3339 以及不带时区的 `YYYY-MM-DD HH:MM[:SS]` / `YYYY-MM-DDTHH:MM:SS[.f]`（按 UTC 处理）
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// 格式化为 `10 Jan 2024, 10:21 AM`（UTC）
///
/// 空值与 `"Never"` 显示为 `Never`；无法解析的文本原样返回。
pub fn format_date(input: Option<&str>) -> String {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty() && *s != NEVER) else {
        return NEVER.to_string();
    };

    match parse_timestamp(raw) {
        Some(dt) => dt.format("%d %b %Y, %I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

/// 相对时间描述，例如 `5 minutes ago`
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 60 {
        return "Just now".to_string();
    }

    let (value, unit) = match secs {
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s if s < 30 * 86_400 => (s / 86_400, "day"),
        s if s < 365 * 86_400 => (s / (30 * 86_400), "month"),
        s => (s / (365 * 86_400), "year"),
    };

    if value == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", value, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_format_date_iso() {
        assert_eq!(
            format_date(Some("2024-01-10T10:21:00Z")),
            "10 Jan 2024, 10:21 AM"
        );
        assert_eq!(
            format_date(Some("2024-01-09 14:50")),
            "09 Jan 2024, 02:50 PM"
        );
    }

    #[test]
    fn test_format_date_never() {
        assert_eq!(format_date(None), "Never");
        assert_eq!(format_date(Some("")), "Never");
        assert_eq!(format_date(Some("Never")), "Never");
    }

    #[test]
    fn test_format_date_passes_text_through() {
        assert_eq!(format_date(Some("Just now")), "Just now");
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(time_ago(now - Duration::seconds(10), now), "Just now");
        assert_eq!(time_ago(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(time_ago(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(time_ago(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(time_ago(now - Duration::days(2), now), "2 days ago");
        assert_eq!(time_ago(now - Duration::days(65), now), "2 months ago");
        assert_eq!(time_ago(now - Duration::days(800), now), "2 years ago");
        // 未来时间视为刚刚
        assert_eq!(time_ago(now + Duration::minutes(3), now), "Just now");
    }
}
