//! OHLCV type - 캔들 데이터

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::Timestamped;

/// OHLCV 캔들 데이터
///
/// 필드는 이름으로 보관하므로 거래소별 배열 순서는 파서에서만 다룬다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OHLCV {
    /// 타임스탬프 (거래소가 준 값 그대로)
    pub timestamp: i64,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량
    pub volume: Decimal,
}

impl OHLCV {
    /// 새 OHLCV 생성
    pub fn new(
        timestamp: i64,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 통상적인 순서의 배열 [timestamp, open, high, low, close, volume]
    pub fn to_array(&self) -> (i64, [Decimal; 5]) {
        (
            self.timestamp,
            [self.open, self.high, self.low, self.close, self.volume],
        )
    }

    /// 상승 캔들 여부
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 캔들 전체 범위
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }
}

impl Timestamped for OHLCV {
    fn timestamp_ms(&self) -> Option<i64> {
        Some(self.timestamp)
    }
}
