//! Order type - 주문 정보

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::Timestamped;

/// 주문 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Closed,
    Canceled,
}

/// 주문 측면
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// 주문 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    Market,
}

/// 거래소 코드 테이블 조회 결과
///
/// 테이블에 없는 코드는 에러 없이 원본 문자열로 전달된다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coded<T> {
    /// 테이블에서 찾은 값
    Known(T),
    /// 알 수 없는 코드 원본
    Raw(String),
}

impl<T: Copy> Coded<T> {
    /// 알려진 값이면 반환
    pub fn known(&self) -> Option<T> {
        match self {
            Coded::Known(value) => Some(*value),
            Coded::Raw(_) => None,
        }
    }
}

impl<T> Coded<T> {
    /// 코드 테이블로 변환
    pub fn lookup(code: &str, table: impl Fn(&str) -> Option<T>) -> Self {
        match table(code) {
            Some(value) => Coded::Known(value),
            None => Coded::Raw(code.to_string()),
        }
    }
}

/// 주문 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// 주문 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// 타임스탬프 (밀리초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// ISO 8601 datetime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// 주문 상태
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Coded<OrderStatus>>,
    /// 심볼
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// 주문 타입
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// 매수/매도
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Coded<OrderSide>>,
    /// 주문 가격
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// 평균 체결가
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<Decimal>,
    /// 주문 수량
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// 체결된 수량
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filled: Option<Decimal>,
    /// 미체결 수량
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Decimal>,
    /// 원본 응답
    #[serde(default)]
    pub info: serde_json::Value,
}

impl Order {
    /// 빈 지정가 주문
    pub fn limit(id: Option<String>, symbol: Option<String>) -> Self {
        Self {
            id,
            timestamp: None,
            datetime: None,
            status: None,
            symbol,
            order_type: OrderType::Limit,
            side: None,
            price: None,
            average: None,
            amount: None,
            filled: None,
            remaining: None,
            info: serde_json::Value::Null,
        }
    }

    /// 수량과 체결량 설정. 미체결 수량은 둘 다 있고 계산이 넘치지 않을 때만 채워진다.
    pub fn with_quantities(mut self, amount: Option<Decimal>, filled: Option<Decimal>) -> Self {
        self.amount = amount;
        self.filled = filled;
        self.remaining = amount.zip(filled).and_then(|(a, f)| a.checked_sub(f));
        self
    }

    /// 미체결 상태인지 확인
    pub fn is_open(&self) -> bool {
        matches!(self.status, Some(Coded::Known(OrderStatus::Open)))
    }

    /// 취소 상태인지 확인
    pub fn is_canceled(&self) -> bool {
        matches!(self.status, Some(Coded::Known(OrderStatus::Canceled)))
    }
}

impl Timestamped for Order {
    fn timestamp_ms(&self) -> Option<i64> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_remaining() {
        let order = Order::limit(Some("1".into()), None).with_quantities(Some(dec!(2)), Some(dec!(0.5)));
        assert_eq!(order.remaining, Some(dec!(1.5)));

        let filled = Order::limit(None, None).with_quantities(Some(dec!(2)), Some(dec!(2)));
        assert_eq!(filled.remaining, Some(Decimal::ZERO));

        let untouched = Order::limit(None, None).with_quantities(Some(dec!(2)), Some(Decimal::ZERO));
        assert_eq!(untouched.remaining, Some(dec!(2)));

        let unknown = Order::limit(None, None).with_quantities(Some(dec!(2)), None);
        assert_eq!(unknown.remaining, None);

        let overflow = Order::limit(None, None).with_quantities(Some(Decimal::MAX), Some(dec!(-1)));
        assert_eq!(overflow.amount, Some(Decimal::MAX));
        assert_eq!(overflow.remaining, None);
    }

    #[test]
    fn test_coded_lookup() {
        let table = |code: &str| match code {
            "1" => Some(OrderSide::Buy),
            "2" => Some(OrderSide::Sell),
            _ => None,
        };
        assert_eq!(Coded::lookup("1", table), Coded::Known(OrderSide::Buy));
        assert_eq!(Coded::lookup("9", table), Coded::Raw("9".into()));
        assert_eq!(Coded::lookup("9", table).known(), None);
    }

    #[test]
    fn test_coded_serializes_flat() {
        let known: Coded<OrderStatus> = Coded::Known(OrderStatus::Canceled);
        let raw: Coded<OrderStatus> = Coded::Raw("7".into());
        assert_eq!(serde_json::to_value(&known).unwrap(), "canceled");
        assert_eq!(serde_json::to_value(&raw).unwrap(), "7");
    }

    #[test]
    fn test_order_status_helpers() {
        let mut order = Order::limit(None, None);
        assert!(!order.is_open());
        order.status = Some(Coded::Known(OrderStatus::Open));
        assert!(order.is_open());
        order.status = Some(Coded::Known(OrderStatus::Canceled));
        assert!(order.is_canceled());
        assert_eq!(order.order_type, OrderType::Limit);
    }
}
