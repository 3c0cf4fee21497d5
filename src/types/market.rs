//! Market type - 거래소 마켓 정보

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 마켓 정보
///
/// `load_markets` 호출마다 새로 생성되며 이후 변경되지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// 거래소 내부 ID (예: 'BTC_USDT')
    pub id: String,
    /// 통합 심볼 (예: 'BTC/USDT')
    pub symbol: String,
    /// 기준 화폐 (예: 'BTC')
    pub base: String,
    /// 견적 화폐 (예: 'USDT')
    pub quote: String,
    /// 거래소 기준 화폐 ID
    pub base_id: String,
    /// 거래소 견적 화폐 ID
    pub quote_id: String,
    /// 활성 상태
    pub active: bool,
    /// 현물 여부
    pub spot: bool,
    /// 테이커 수수료
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taker: Option<Decimal>,
    /// 메이커 수수료
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maker: Option<Decimal>,
    /// 정밀도
    pub precision: MarketPrecision,
    /// 거래 제한
    pub limits: MarketLimits,
    /// 티어 기반 수수료
    #[serde(default)]
    pub tier_based: bool,
    /// 퍼센트 기반 수수료
    #[serde(default)]
    pub percentage: bool,
    /// 원본 응답
    #[serde(default)]
    pub info: serde_json::Value,
}

/// 마켓 정밀도 (소수점 자릿수)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPrecision {
    /// 수량 정밀도
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
    /// 가격 정밀도
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
}

/// 마켓 제한
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketLimits {
    /// 수량 제한
    #[serde(default)]
    pub amount: MinMax,
    /// 가격 제한
    #[serde(default)]
    pub price: MinMax,
    /// 비용 제한
    #[serde(default)]
    pub cost: MinMax,
}

/// 최소/최대 값
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
}

impl MinMax {
    /// 최소값만 있는 제한
    pub fn min(min: Option<Decimal>) -> Self {
        Self { min, max: None }
    }
}

impl Market {
    /// 현물 마켓 생성
    pub fn spot(
        id: impl Into<String>,
        base_id: impl Into<String>,
        quote_id: impl Into<String>,
        base: impl Into<String>,
        quote: impl Into<String>,
    ) -> Self {
        let base = base.into();
        let quote = quote.into();
        Self {
            id: id.into(),
            symbol: format!("{base}/{quote}"),
            base,
            quote,
            base_id: base_id.into(),
            quote_id: quote_id.into(),
            active: true,
            spot: true,
            taker: None,
            maker: None,
            precision: MarketPrecision::default(),
            limits: MarketLimits::default(),
            tier_based: false,
            percentage: true,
            info: serde_json::Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_market() {
        let market = Market::spot("boe_eth_eth", "boe_eth", "eth", "BOE_ETH", "ETH");
        assert_eq!(market.symbol, "BOE_ETH/ETH");
        assert_eq!(market.base_id, "boe_eth");
        assert!(market.spot);
        assert!(market.active);
        assert!(market.limits.cost.max.is_none());
    }

    #[test]
    fn test_market_serializes_camel_case() {
        let market = Market::spot("BTC_USDT", "BTC", "USDT", "BTC", "USDT");
        let json = serde_json::to_value(&market).unwrap();
        assert_eq!(json["baseId"], "BTC");
        assert_eq!(json["tierBased"], false);
    }
}
