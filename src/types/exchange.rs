//! Exchange trait - Unified exchange interface
//!
//! 커넥터가 외부에 노출하는 통합 계약과 그 메타데이터 타입

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Balances, Market, OHLCV, Order, OrderBook, OrderSide, OrderType, Ticker, Trade};
use crate::errors::CcxtResult;

/// 요청에 그대로 합쳐지는 추가 파라미터
pub type Params = HashMap<String, String>;

/// Exchange ID - identifies the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeId {
    Mxc,
}

impl ExchangeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeId::Mxc => "mxc",
        }
    }
}

impl std::fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 타임프레임
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "2h")]
    Hour2,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "6h")]
    Hour6,
    #[serde(rename = "12h")]
    Hour12,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "1w")]
    Week1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 11] = [
        Timeframe::Minute1,
        Timeframe::Minute5,
        Timeframe::Minute15,
        Timeframe::Minute30,
        Timeframe::Hour1,
        Timeframe::Hour2,
        Timeframe::Hour4,
        Timeframe::Hour6,
        Timeframe::Hour12,
        Timeframe::Day1,
        Timeframe::Week1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Minute1 => "1m",
            Timeframe::Minute5 => "5m",
            Timeframe::Minute15 => "15m",
            Timeframe::Minute30 => "30m",
            Timeframe::Hour1 => "1h",
            Timeframe::Hour2 => "2h",
            Timeframe::Hour4 => "4h",
            Timeframe::Hour6 => "6h",
            Timeframe::Hour12 => "12h",
            Timeframe::Day1 => "1d",
            Timeframe::Week1 => "1w",
        }
    }

    /// 초 단위 기간
    pub fn seconds(&self) -> i64 {
        match self {
            Timeframe::Minute1 => 60,
            Timeframe::Minute5 => 5 * 60,
            Timeframe::Minute15 => 15 * 60,
            Timeframe::Minute30 => 30 * 60,
            Timeframe::Hour1 => 60 * 60,
            Timeframe::Hour2 => 2 * 60 * 60,
            Timeframe::Hour4 => 4 * 60 * 60,
            Timeframe::Hour6 => 6 * 60 * 60,
            Timeframe::Hour12 => 12 * 60 * 60,
            Timeframe::Day1 => 24 * 60 * 60,
            Timeframe::Week1 => 7 * 24 * 60 * 60,
        }
    }

    /// 밀리초 단위 기간
    pub fn to_millis(&self) -> i64 {
        self.seconds() * 1000
    }
}

impl std::str::FromStr for Timeframe {
    type Err = crate::errors::CcxtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "60m" {
            return Ok(Timeframe::Hour1);
        }
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| crate::errors::CcxtError::NotSupported {
                feature: format!("mxc timeframe {s}"),
            })
    }
}

/// Exchange feature flags - indicates supported functionality
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeFeatures {
    // === Market Types ===
    pub cors: bool,
    pub spot: bool,

    // === Public API ===
    pub fetch_markets: bool,
    pub fetch_ticker: bool,
    pub fetch_tickers: bool,
    pub fetch_order_book: bool,
    pub fetch_trades: bool,
    pub fetch_ohlcv: bool,

    // === Private Trading API ===
    pub fetch_balance: bool,
    pub create_order: bool,
    pub create_market_order: bool,
    pub cancel_order: bool,
    pub fetch_order: bool,
    pub fetch_orders: bool,
    pub fetch_open_orders: bool,
    pub fetch_closed_orders: bool,
    pub fetch_my_trades: bool,
    pub fetch_order_trades: bool,

    // === Funding ===
    pub fetch_deposits: bool,
    pub fetch_withdrawals: bool,
    pub fetch_transactions: bool,
    pub fetch_deposit_address: bool,
    pub create_deposit_address: bool,
    pub withdraw: bool,
}

/// 거래소 URL 정보
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeUrls {
    pub logo: Option<String>,
    pub api: HashMap<String, String>,
    pub www: Option<String>,
    pub doc: Vec<String>,
    pub fees: Option<String>,
}

/// API 범위 (서명 방식 선택)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Api {
    Public,
    Private,
}

impl Api {
    pub fn as_str(&self) -> &'static str {
        match self {
            Api::Public => "public",
            Api::Private => "private",
        }
    }
}

/// 서명된 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub url: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

/// 거래소 통합 인터페이스
///
/// CCXT의 Exchange 클래스 중 MXC가 지원하는 부분을 Rust trait으로 포팅.
/// 모든 조회 메서드는 마지막 인자로 요청에 합쳐질 추가 파라미터를 받는다.
#[async_trait]
pub trait Exchange: Send + Sync {
    // === 메타데이터 ===

    /// 거래소 ID
    fn id(&self) -> ExchangeId;

    /// 거래소 이름
    fn name(&self) -> &str;

    /// API 버전
    fn version(&self) -> &str {
        "v1"
    }

    /// 국가 목록
    fn countries(&self) -> &[&str] {
        &[]
    }

    /// 레이트 리밋 (밀리초)
    fn rate_limit(&self) -> u64 {
        1000
    }

    /// 지원 기능
    fn has(&self) -> &ExchangeFeatures;

    /// 특정 기능 지원 여부
    fn has_feature(&self, feature: &str) -> bool {
        let features = self.has();
        match feature {
            "CORS" => features.cors,
            "spot" => features.spot,
            "fetchMarkets" => features.fetch_markets,
            "fetchTicker" => features.fetch_ticker,
            "fetchTickers" => features.fetch_tickers,
            "fetchOrderBook" => features.fetch_order_book,
            "fetchTrades" => features.fetch_trades,
            "fetchOHLCV" => features.fetch_ohlcv,
            "fetchBalance" => features.fetch_balance,
            "createOrder" => features.create_order,
            "createMarketOrder" => features.create_market_order,
            "cancelOrder" => features.cancel_order,
            "fetchOrder" => features.fetch_order,
            "fetchOrders" => features.fetch_orders,
            "fetchOpenOrders" => features.fetch_open_orders,
            "fetchClosedOrders" => features.fetch_closed_orders,
            "fetchMyTrades" => features.fetch_my_trades,
            "fetchOrderTrades" => features.fetch_order_trades,
            "fetchDeposits" => features.fetch_deposits,
            "fetchWithdrawals" => features.fetch_withdrawals,
            "fetchTransactions" => features.fetch_transactions,
            "fetchDepositAddress" => features.fetch_deposit_address,
            "createDepositAddress" => features.create_deposit_address,
            "withdraw" => features.withdraw,
            _ => false,
        }
    }

    /// URL 정보
    fn urls(&self) -> &ExchangeUrls;

    /// 지원 타임프레임
    fn timeframes(&self) -> &HashMap<Timeframe, String>;

    // === Public API ===

    /// 마켓 로드 (캐싱)
    async fn load_markets(&self, reload: bool) -> CcxtResult<HashMap<String, Market>>;

    /// 마켓 목록 조회
    async fn fetch_markets(&self, params: &Params) -> CcxtResult<Vec<Market>>;

    /// 시세 조회
    async fn fetch_ticker(&self, symbol: &str, params: &Params) -> CcxtResult<Ticker>;

    /// 복수 시세 조회
    async fn fetch_tickers(
        &self,
        symbols: Option<&[&str]>,
        params: &Params,
    ) -> CcxtResult<HashMap<String, Ticker>>;

    /// 호가창 조회
    async fn fetch_order_book(
        &self,
        symbol: &str,
        limit: Option<u32>,
        params: &Params,
    ) -> CcxtResult<OrderBook>;

    /// 체결 내역 조회
    async fn fetch_trades(
        &self,
        symbol: &str,
        since: Option<i64>,
        limit: Option<u32>,
        params: &Params,
    ) -> CcxtResult<Vec<Trade>>;

    /// OHLCV 조회
    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: Option<i64>,
        limit: Option<u32>,
        params: &Params,
    ) -> CcxtResult<Vec<OHLCV>>;

    // === Private API ===

    /// 잔고 조회
    async fn fetch_balance(&self, params: &Params) -> CcxtResult<Balances>;

    /// 주문 생성
    async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: OrderSide,
        amount: Decimal,
        price: Option<Decimal>,
        params: &Params,
    ) -> CcxtResult<Order>;

    /// 지정가 주문 생성
    async fn create_limit_order(
        &self,
        symbol: &str,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
        params: &Params,
    ) -> CcxtResult<Order> {
        self.create_order(symbol, OrderType::Limit, side, amount, Some(price), params)
            .await
    }

    /// 주문 취소
    async fn cancel_order(&self, id: &str, symbol: Option<&str>, params: &Params)
        -> CcxtResult<Order>;

    /// 주문 조회
    async fn fetch_order(&self, id: &str, symbol: Option<&str>, params: &Params)
        -> CcxtResult<Order>;

    /// 주문 목록 조회
    async fn fetch_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: &Params,
    ) -> CcxtResult<Vec<Order>>;

    // === Utilities ===

    /// Convert symbol to market ID
    fn market_id(&self, symbol: &str) -> Option<String>;

    /// Convert market ID to symbol
    fn symbol(&self, market_id: &str) -> Option<String>;

    /// Sign a request
    fn sign(
        &self,
        path: &str,
        api: Api,
        method: &str,
        params: &Params,
    ) -> CcxtResult<SignedRequest>;
}
