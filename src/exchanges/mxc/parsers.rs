//! MXC response parsers
//!
//! Raw decoded payloads in, unified records out. Scalar extraction goes through
//! the `safe_*` accessors so missing or wrong-typed fields become `None`.

use rust_decimal::Decimal;
use serde_json::Value;

use super::symbols::{safe_currency_code, split_market_id, MarketTable};
use super::MxcOptions;
use crate::errors::{CcxtError, CcxtResult};
use crate::types::{
    Balance, Balances, Coded, Market, MarketLimits, MarketPrecision, MinMax, Order, OrderBook,
    OrderBookEntry, OrderSide, OrderStatus, Ticker, Trade, OHLCV,
};
use crate::utils::time::{iso8601, parse_exchange_date};
use crate::utils::{
    safe_decimal, safe_decimal2, safe_integer, safe_string, safe_string2, safe_value,
    value_to_decimal,
};

/// MXC reports quantities with eight decimals on every market.
pub const AMOUNT_PRECISION: u32 = 8;

/// Order status codes.
pub fn parse_order_status(code: &str) -> Coded<OrderStatus> {
    Coded::lookup(code, |c| match c {
        "1" | "3" => Some(OrderStatus::Open),
        "2" => Some(OrderStatus::Closed),
        "4" | "5" => Some(OrderStatus::Canceled),
        _ => None,
    })
}

/// Order side codes.
pub fn parse_order_side(code: &str) -> Coded<OrderSide> {
    Coded::lookup(code, |c| match c {
        "1" => Some(OrderSide::Buy),
        "2" => Some(OrderSide::Sell),
        _ => None,
    })
}

/// Wire code for an order side (`trade_type`).
pub fn order_side_code(side: OrderSide) -> &'static str {
    match side {
        OrderSide::Buy => "1",
        OrderSide::Sell => "2",
    }
}

// === Markets ===

/// `markets_info` response → markets. `data` must be an object keyed by market id.
pub fn parse_markets(response: &Value, options: &MxcOptions) -> CcxtResult<Vec<Market>> {
    let data = safe_value(response, "data")
        .and_then(Value::as_object)
        .ok_or_else(|| CcxtError::BadResponse {
            message: "mxc fetchMarkets got an unrecognized response".into(),
        })?;

    data.iter()
        .map(|(id, details)| parse_market(id, details, options))
        .collect()
}

/// One `markets_info` entry.
pub fn parse_market(id: &str, details: &Value, options: &MxcOptions) -> CcxtResult<Market> {
    let (base_id, quote_id) = split_market_id(id)?;
    let base = safe_currency_code(&base_id);
    let quote = safe_currency_code(&quote_id);

    let price_scale = safe_integer(details, "priceScale")
        .and_then(|scale| u32::try_from(scale).ok())
        .filter(|scale| *scale <= 28);
    let min_amount = safe_decimal(details, "minAmount");
    let min_price = price_scale.map(|scale| Decimal::new(1, scale));

    let default_cost = min_amount.zip(min_price).map(|(amount, price)| amount * price);
    let min_cost = options.cost_min(&quote).or(default_cost);

    let mut market = Market::spot(id, base_id, quote_id, base, quote);
    market.precision = MarketPrecision {
        amount: Some(AMOUNT_PRECISION),
        price: price_scale,
    };
    market.limits = MarketLimits {
        amount: MinMax::min(min_amount),
        price: MinMax::min(min_price),
        cost: MinMax::min(min_cost),
    };
    market.maker = safe_decimal(details, "sellFeeRate");
    market.taker = safe_decimal(details, "buyFeeRate");
    market.tier_based = true;
    market.percentage = true;
    market.info = details.clone();
    Ok(market)
}

// === Order book ===

/// `depth` payload (the `data` object) → order book. Exchange order is kept.
pub fn parse_order_book(data: &Value, symbol: &str) -> OrderBook {
    let mut book = OrderBook::new(symbol);
    book.bids = parse_levels(data, "bids");
    book.asks = parse_levels(data, "asks");
    book
}

fn parse_levels(data: &Value, key: &str) -> Vec<OrderBookEntry> {
    safe_value(data, key)
        .and_then(Value::as_array)
        .map(|levels| {
            levels
                .iter()
                .filter_map(|level| {
                    let price = safe_decimal(level, "price")?;
                    let amount = safe_decimal(level, "quantity")?;
                    Some(OrderBookEntry::new(price, amount))
                })
                .collect()
        })
        .unwrap_or_default()
}

// === Ticker ===

/// One ticker object. `timestamp` is the local clock time of the fetch.
pub fn parse_ticker(ticker: &Value, market: Option<&Market>, timestamp: i64) -> Ticker {
    let last = safe_decimal(ticker, "last");
    let percentage = safe_decimal(ticker, "percentChange");
    let open = safe_decimal(ticker, "open");

    let mut result = Ticker::new(market.map(|m| m.symbol.clone())).with_timestamp(timestamp);
    result.high = safe_decimal(ticker, "high");
    result.low = safe_decimal(ticker, "low");
    result.bid = safe_decimal(ticker, "buy");
    result.ask = safe_decimal(ticker, "sell");
    result.open = open;
    result.close = last;
    result.last = last;
    result.percentage = percentage;
    result.base_volume = safe_decimal(ticker, "volume");

    // derived fields need last, percentage and open together; overflow leaves both unset
    if let (Some(last), Some(_), Some(open)) = (last, percentage, open) {
        let change = last.checked_sub(open);
        let average = last
            .checked_add(open)
            .and_then(|sum| sum.checked_div(Decimal::TWO));
        if let (Some(change), Some(average)) = (change, average) {
            result.change = Some(change);
            result.average = Some(average);
        }
    }

    result.info = ticker.clone();
    result
}

// === Trades ===

/// One public trade from `history`.
pub fn parse_trade(trade: &Value, market: Option<&Market>) -> Trade {
    let side = match safe_string(trade, "tradeType").as_deref() {
        Some("1") => OrderSide::Buy,
        _ => OrderSide::Sell,
    };

    let mut result = Trade::new(
        market.map(|m| m.symbol.clone()),
        side,
        safe_decimal(trade, "tradePrice"),
        safe_decimal(trade, "tradeQuantity"),
    );
    let trade_time = safe_string(trade, "tradeTime");
    result.timestamp = trade_time.as_deref().and_then(parse_exchange_date);
    // unparseable times are kept verbatim
    result.datetime = result.timestamp.and_then(iso8601).or(trade_time);
    result.info = trade.clone();
    result
}

// === Candles ===

/// One `kline` row, positional `[t, o, c, h, l, v]`. Exactly six fields, all required.
pub fn parse_ohlcv(candle: &Value) -> CcxtResult<OHLCV> {
    let row = candle
        .as_array()
        .filter(|row| row.len() == 6)
        .ok_or_else(|| bad_candle(candle))?;

    let timestamp = match &row[0] {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| bad_candle(candle))?;
    let field = |i: usize| value_to_decimal(&row[i]).ok_or_else(|| bad_candle(candle));

    Ok(OHLCV {
        timestamp,
        open: field(1)?,
        close: field(2)?,
        high: field(3)?,
        low: field(4)?,
        volume: field(5)?,
    })
}

fn bad_candle(candle: &Value) -> CcxtError {
    CcxtError::BadResponse {
        message: format!("mxc fetchOHLCV got a malformed candle {candle}"),
    }
}

// === Orders ===

/// One order. The market is looked up by the order's own `market` id first.
pub fn parse_order(order: &Value, table: Option<&MarketTable>, market: Option<&Market>) -> Order {
    let market = safe_string(order, "market")
        .and_then(|id| table.and_then(|t| t.market_by_id(&id)))
        .or(market);

    let amount = safe_decimal2(order, "totalQuantity", "initialAmount");
    let filled = safe_decimal(order, "tradedQuantity");
    let traded_amount = safe_decimal(order, "tradedAmount");

    let mut result = Order::limit(
        safe_string2(order, "id", "data"),
        market.map(|m| m.symbol.clone()),
    )
    .with_quantities(amount, filled);

    result.timestamp = safe_string(order, "createTime")
        .as_deref()
        .and_then(parse_exchange_date);
    result.datetime = result.timestamp.and_then(iso8601);
    result.status = safe_string(order, "status")
        .as_deref()
        .map(parse_order_status);
    result.side = safe_string(order, "type").as_deref().map(parse_order_side);
    result.price = safe_decimal(order, "price");
    result.average = traded_amount
        .zip(filled)
        .filter(|(_, filled)| !filled.is_zero())
        .and_then(|(notional, filled)| notional.checked_div(filled));
    result.info = order.clone();
    result
}

// === Balance ===

/// `account/info` → balances keyed by unified currency code.
///
/// Currencies are read from `data` when present, else from the top level.
/// Entries that are not objects are skipped.
pub fn parse_balance(response: &Value, timestamp: i64) -> Balances {
    let mut balances = Balances::new(timestamp, response.clone());
    let source = safe_value(response, "data")
        .filter(|data| data.is_object())
        .unwrap_or(response);

    if let Some(currencies) = source.as_object() {
        for (currency_id, account) in currencies.iter().filter(|(_, v)| v.is_object()) {
            balances.add(
                safe_currency_code(currency_id),
                Balance::new(
                    safe_decimal(account, "available"),
                    safe_decimal(account, "frozen"),
                ),
            );
        }
    }
    balances
}
