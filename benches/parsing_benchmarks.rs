//! Parsing Benchmarks
//!
//! Benchmarks for MXC response parsing, symbol resolution and request signing

use ccxt_mxc::exchanges::mxc::parsers;
use ccxt_mxc::exchanges::mxc::signer::Signer;
use ccxt_mxc::exchanges::mxc::symbols::{symbol_from_id, MarketTable};
use ccxt_mxc::{Api, MxcOptions, Params};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};

fn markets_response(count: usize) -> Value {
    let data: serde_json::Map<String, Value> = (0..count)
        .map(|i| {
            (
                format!("COIN{i}_USDT"),
                json!({
                    "priceScale": 6,
                    "quantityScale": 2,
                    "minAmount": "1",
                    "buyFeeRate": "0.002",
                    "sellFeeRate": "0.002"
                }),
            )
        })
        .collect();
    json!({ "code": 200, "data": data })
}

fn bench_markets(c: &mut Criterion) {
    let mut group = c.benchmark_group("markets");
    let options = MxcOptions::default();

    for count in [10, 100, 500] {
        let response = markets_response(count);
        group.bench_with_input(BenchmarkId::new("parse_markets", count), &response, |b, r| {
            b.iter(|| black_box(parsers::parse_markets(r, &options)))
        });
    }

    let markets = parsers::parse_markets(&markets_response(500), &options).unwrap_or_default();
    let table = MarketTable::new(markets);
    group.bench_function("table_lookup_by_id", |b| {
        b.iter(|| black_box(table.market_by_id("COIN250_USDT")))
    });
    group.bench_function("symbol_from_id", |b| {
        b.iter(|| black_box(symbol_from_id("boe_eth_eth")))
    });

    group.finish();
}

fn bench_market_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("market_data");

    let ticker = json!({
        "volume": "1000", "high": "0.5", "low": "0.4", "buy": "0.45",
        "sell": "0.46", "open": "0.42", "last": "0.46", "percentChange": "9.52"
    });
    group.bench_function("parse_ticker", |b| {
        b.iter(|| black_box(parsers::parse_ticker(&ticker, None, 1557729071000)))
    });

    let level = |p: usize| json!({"price": format!("0.{p:04}"), "quantity": "10"});
    let book = json!({
        "asks": (0..50).map(level).collect::<Vec<_>>(),
        "bids": (50..100).map(level).collect::<Vec<_>>(),
    });
    group.bench_function("parse_order_book_100", |b| {
        b.iter(|| black_box(parsers::parse_order_book(&book, "MX/ETH")))
    });

    let trade = json!({
        "tradeTime": "2019-05-13 14:31:11", "tradePrice": "0.46",
        "tradeQuantity": "2", "tradeType": "1"
    });
    group.bench_function("parse_trade", |b| {
        b.iter(|| black_box(parsers::parse_trade(&trade, None)))
    });

    let candle = json!(["1557728940", "0.4", "0.5", "0.6", "0.3", "100"]);
    group.bench_function("parse_ohlcv", |b| {
        b.iter(|| black_box(parsers::parse_ohlcv(&candle)))
    });

    group.finish();
}

fn bench_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("signing");
    let signer = Signer::new(None, Some("key"), Some("secret"));

    let mut params = Params::new();
    for (k, v) in [
        ("api_key", "key"),
        ("market", "MX_ETH"),
        ("price", "0.439961"),
        ("quantity", "2"),
        ("req_time", "1557729071000"),
        ("trade_type", "1"),
    ] {
        params.insert(k.into(), v.into());
    }

    group.bench_function("sign_private", |b| {
        b.iter(|| black_box(signer.sign("order", Api::Private, "POST", &params)))
    });
    group.bench_function("sign_public", |b| {
        b.iter(|| black_box(signer.sign("depth", Api::Public, "GET", &params)))
    });

    group.finish();
}

criterion_group!(benches, bench_markets, bench_market_data, bench_signing);
criterion_main!(benches);
