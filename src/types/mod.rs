//! Unified types
//!
//! 거래소 응답을 정규화한 공통 스키마와 통합 인터페이스

mod balance;
mod exchange;
mod market;
mod ohlcv;
mod order;
mod orderbook;
mod ticker;
mod trade;

pub use balance::{Balance, Balances};
pub use exchange::{
    Api, Exchange, ExchangeFeatures, ExchangeId, ExchangeUrls, Params, SignedRequest, Timeframe,
};
pub use market::{Market, MarketLimits, MarketPrecision, MinMax};
pub use ohlcv::OHLCV;
pub use order::{Coded, Order, OrderSide, OrderStatus, OrderType};
pub use orderbook::{OrderBook, OrderBookEntry};
pub use ticker::Ticker;
pub use trade::Trade;
