//! Trade type - 체결 내역

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrderSide;
use crate::utils::Timestamped;

/// 체결 내역
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// 체결 ID (MXC 공개 체결에는 없음)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// 타임스탬프 (밀리초, 거래소 시각을 해석할 수 있을 때만)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// 거래소가 준 시각 문자열 그대로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// 심볼
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// 매수/매도
    pub side: OrderSide,
    /// 체결 가격
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// 체결 수량
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// 체결 금액 (price * amount)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    /// 원본 응답
    #[serde(default)]
    pub info: serde_json::Value,
}

impl Trade {
    /// 새 Trade 생성. cost는 price와 amount가 모두 있을 때만 계산된다.
    pub fn new(
        symbol: Option<String>,
        side: OrderSide,
        price: Option<Decimal>,
        amount: Option<Decimal>,
    ) -> Self {
        Self {
            id: None,
            timestamp: None,
            datetime: None,
            symbol,
            side,
            price,
            amount,
            cost: price.zip(amount).and_then(|(p, a)| p.checked_mul(a)),
            info: serde_json::Value::Null,
        }
    }

    /// 매수인지 확인
    pub fn is_buy(&self) -> bool {
        self.side == OrderSide::Buy
    }
}

impl Timestamped for Trade {
    fn timestamp_ms(&self) -> Option<i64> {
        self.timestamp
    }
}
