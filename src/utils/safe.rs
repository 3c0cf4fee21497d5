//! Safe helper functions for extracting values from JSON
//!
//! CCXT의 safe* 헬퍼 함수들을 Rust로 구현. 모든 함수는 키가 없거나 타입이
//! 맞지 않으면 `None`을 반환하며 panic 하지 않는다.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// 안전한 문자열 추출
pub fn safe_string(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(value_to_string)
}

/// 두 키 중 하나에서 문자열 추출
pub fn safe_string2(obj: &Value, key1: &str, key2: &str) -> Option<String> {
    safe_string(obj, key1).or_else(|| safe_string(obj, key2))
}

/// 안전한 정수 추출
pub fn safe_integer(obj: &Value, key: &str) -> Option<i64> {
    obj.get(key).and_then(|v| match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// 안전한 Decimal 추출 (숫자 형태의 문자열은 숫자로 변환)
pub fn safe_decimal(obj: &Value, key: &str) -> Option<Decimal> {
    obj.get(key).and_then(value_to_decimal)
}

/// 두 키 중 하나에서 Decimal 추출
pub fn safe_decimal2(obj: &Value, key1: &str, key2: &str) -> Option<Decimal> {
    safe_decimal(obj, key1).or_else(|| safe_decimal(obj, key2))
}

/// 안전한 값 추출 (null은 없는 것으로 취급)
pub fn safe_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

/// 두 키 중 하나에서 값 추출
pub fn safe_value2<'a>(obj: &'a Value, key1: &str, key2: &str) -> Option<&'a Value> {
    safe_value(obj, key1).or_else(|| safe_value(obj, key2))
}

/// 스칼라 값을 문자열로 변환
pub fn value_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// 스칼라 값을 Decimal로 변환
///
/// `"0.001"`, `"1e-5"`, `0.5` 모두 허용. 빈 문자열이나 숫자가 아닌 값은 `None`.
pub fn value_to_decimal(v: &Value) -> Option<Decimal> {
    match v {
        Value::String(s) => parse_decimal(s),
        Value::Number(n) => parse_decimal(&n.to_string()),
        _ => None,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_safe_string_from_string() {
        let obj = json!({"market": "BTC_USDT"});
        assert_eq!(safe_string(&obj, "market"), Some("BTC_USDT".to_string()));
    }

    #[test]
    fn test_safe_string_from_number() {
        let obj = json!({"type": 1});
        assert_eq!(safe_string(&obj, "type"), Some("1".to_string()));
    }

    #[test]
    fn test_safe_string_missing_and_null() {
        let obj = json!({"status": null});
        assert_eq!(safe_string(&obj, "status"), None);
        assert_eq!(safe_string(&obj, "missing"), None);
    }

    #[test]
    fn test_safe_string2() {
        let obj = json!({"data": "order-1"});
        assert_eq!(safe_string2(&obj, "id", "data"), Some("order-1".to_string()));
    }

    #[test]
    fn test_safe_integer() {
        let obj = json!({"priceScale": "6", "n": 3, "bad": "x"});
        assert_eq!(safe_integer(&obj, "priceScale"), Some(6));
        assert_eq!(safe_integer(&obj, "n"), Some(3));
        assert_eq!(safe_integer(&obj, "bad"), None);
    }

    #[test]
    fn test_safe_decimal_coerces_numeric_strings() {
        let obj = json!({"price": "0.439961", "qty": 2, "tiny": "1e-5"});
        assert_eq!(safe_decimal(&obj, "price"), Some(dec!(0.439961)));
        assert_eq!(safe_decimal(&obj, "qty"), Some(dec!(2)));
        assert_eq!(safe_decimal(&obj, "tiny"), Some(dec!(0.00001)));
    }

    #[test]
    fn test_safe_decimal_rejects_non_numeric() {
        let obj = json!({"price": "n/a", "empty": "", "nested": {"a": 1}, "flag": true});
        assert_eq!(safe_decimal(&obj, "price"), None);
        assert_eq!(safe_decimal(&obj, "empty"), None);
        assert_eq!(safe_decimal(&obj, "nested"), None);
        assert_eq!(safe_decimal(&obj, "flag"), None);
    }

    #[test]
    fn test_safe_accessors_on_non_object() {
        let arr = json!(["a", "b"]);
        assert_eq!(safe_string(&arr, "a"), None);
        assert_eq!(safe_decimal(&Value::Null, "a"), None);
        assert!(safe_value(&arr, "a").is_none());
    }

    #[test]
    fn test_safe_value_null() {
        let obj = json!({"data": null, "order": {"id": "x"}});
        assert!(safe_value(&obj, "data").is_none());
        assert!(safe_value2(&obj, "data", "order").is_some());
    }
}
