//! Time utilities

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// MXC는 주문/체결 시각을 타임존 표기 없이 UTC+8 기준으로 반환한다
pub const EXCHANGE_UTC_OFFSET_SECS: i32 = 8 * 3600;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// 밀리초 타임스탬프를 ISO 8601 문자열로 변환 (예: `2019-05-13T06:31:11.000Z`)
pub fn iso8601(ms: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// 타임존 없는 날짜 문자열을 주어진 UTC 오프셋 기준으로 해석해 밀리초 타임스탬프로 변환
///
/// 해석할 수 없는 문자열이면 `None`.
pub fn parse_date_with_offset(s: &str, offset_secs: i32) -> Option<i64> {
    let offset = FixedOffset::east_opt(offset_secs)?;
    let s = s.trim();
    DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(s, fmt)
            .ok()
            .and_then(|naive| offset.from_local_datetime(&naive).single())
            .map(|dt| dt.timestamp_millis())
    })
}

/// 거래소 로컬 시각(UTC+8) 문자열 파싱
pub fn parse_exchange_date(s: &str) -> Option<i64> {
    parse_date_with_offset(s, EXCHANGE_UTC_OFFSET_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso8601() {
        assert_eq!(iso8601(0).as_deref(), Some("1970-01-01T00:00:00.000Z"));
        assert_eq!(
            iso8601(1557729071000).as_deref(),
            Some("2019-05-13T06:31:11.000Z")
        );
    }

    #[test]
    fn test_parse_exchange_date_is_utc_plus_8() {
        // 2019-05-13 14:31:11 (UTC+8) == 2019-05-13 06:31:11 UTC
        assert_eq!(parse_exchange_date("2019-05-13 14:31:11"), Some(1557729071000));
    }

    #[test]
    fn test_parse_exchange_date_fractional_seconds() {
        assert_eq!(
            parse_exchange_date("2019-05-13 14:31:11.250"),
            Some(1557729071250)
        );
    }

    #[test]
    fn test_parse_exchange_date_invalid() {
        assert_eq!(parse_exchange_date("14:31:11"), None);
        assert_eq!(parse_exchange_date(""), None);
    }

    #[test]
    fn test_parse_date_with_utc_offset() {
        assert_eq!(
            parse_date_with_offset("2019-05-13 06:31:11", 0),
            Some(1557729071000)
        );
    }
}
