//! Basic Usage Example
//!
//! Demonstrates fundamental operations with ccxt-mxc:
//! - Creating the exchange instance from the environment
//! - Loading markets
//! - Working with tickers, order books and candles
//!
//! Set `RUST_LOG=ccxt_mxc=debug` to see outgoing requests. Private calls run
//! only when `MXC_API_KEY` and `MXC_API_SECRET` are set.

use ccxt_mxc::{CcxtResult, Exchange, ExchangeConfig, Mxc, Params, Timeframe};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> CcxtResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== CCXT-MXC Basic Usage Example ===\n");

    let config = ExchangeConfig::from_env();
    let has_credentials = config.has_credentials();
    let exchange = Mxc::new(config)?;
    let params = Params::new();

    println!("Exchange: {}", exchange.name());
    println!("Exchange ID: {}", exchange.id());
    println!("Limit orders only: {}", !exchange.has().create_market_order);

    println!("\n--- Loading Markets ---");
    let markets = exchange.load_markets(false).await?;
    println!("Total markets available: {}", markets.len());
    let mut symbols: Vec<&String> = markets.keys().collect();
    symbols.sort();
    for symbol in symbols.iter().take(5) {
        let market = &markets[symbol.as_str()];
        println!(
            "  {} (id {}) - min amount {:?}, min cost {:?}",
            market.symbol, market.id, market.limits.amount.min, market.limits.cost.min
        );
    }

    let symbol = "BTC/USDT";

    println!("\n--- Fetching Ticker ---");
    let ticker = exchange.fetch_ticker(symbol, &params).await?;
    println!("{symbol} Ticker:");
    println!("  Last Price: {:?}", ticker.last);
    println!("  Bid: {:?}", ticker.bid);
    println!("  Ask: {:?}", ticker.ask);
    println!("  Change: {:?} ({:?}%)", ticker.change, ticker.percentage);

    println!("\n--- Fetching Order Book ---");
    let orderbook = exchange.fetch_order_book(symbol, None, &params).await?;
    println!("  Best bid: {:?}", orderbook.best_bid());
    println!("  Best ask: {:?}", orderbook.best_ask());
    println!("  Spread: {:?}", orderbook.spread());

    println!("\n--- Fetching Candles ---");
    let candles = exchange
        .fetch_ohlcv(symbol, Timeframe::Hour1, None, Some(5), &params)
        .await?;
    for candle in &candles {
        println!(
            "  t={} o={} h={} l={} c={} v={}",
            candle.timestamp, candle.open, candle.high, candle.low, candle.close, candle.volume
        );
    }

    if has_credentials {
        println!("\n--- Fetching Balance ---");
        let balance = exchange.fetch_balance(&params).await?;
        for currency in balance.non_zero_currencies() {
            println!("  {currency}: {:?}", balance.get(currency));
        }
    }

    Ok(())
}
