//! MXC Exchange Implementation
//!
//! MXC spot API v1. Public endpoints live under `/open/api/v1/data/`, private
//! ones under `/open/api/v1/private/` and are signed with an MD5 digest.

pub mod classifier;
pub mod parsers;
pub mod signer;
pub mod symbols;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::client::{Clock, ExchangeConfig, HttpClient, SystemClock, Transport};
use crate::errors::{CcxtError, CcxtResult};
use crate::types::{
    Api, Balances, Coded, Exchange, ExchangeFeatures, ExchangeId, ExchangeUrls, Market, Order,
    OrderBook, OrderSide, OrderStatus, OrderType, Params, SignedRequest, Ticker, Timeframe,
    Trade, OHLCV,
};
use crate::utils::{filter_by_since_limit, safe_value, safe_value2};

use classifier::ErrorClassifier;
use signer::{redact_signature, Signer};
use symbols::{resolve, unresolve, MarketTable};

/// Connector options that are not credentials or transport settings.
#[derive(Debug, Clone)]
pub struct MxcOptions {
    /// Minimum order cost per quote currency. Overrides the computed default.
    pub cost_min: HashMap<String, Decimal>,
    /// Depth requested by `fetch_order_book` when no limit is given.
    pub order_book_depth: u32,
}

impl Default for MxcOptions {
    fn default() -> Self {
        let cost_min = [
            ("BTC", Decimal::new(1, 4)),
            ("ETH", Decimal::new(1, 3)),
            ("USDT", Decimal::ONE),
        ]
        .into_iter()
        .map(|(code, min)| (code.to_string(), min))
        .collect();

        Self {
            cost_min,
            order_book_depth: 5,
        }
    }
}

impl MxcOptions {
    /// Cost minimum override for a quote currency, if listed.
    pub fn cost_min(&self, quote: &str) -> Option<Decimal> {
        self.cost_min.get(quote).copied()
    }
}

/// MXC 거래소
pub struct Mxc {
    config: ExchangeConfig,
    options: MxcOptions,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    signer: Signer,
    classifier: ErrorClassifier,
    markets: RwLock<Option<Arc<MarketTable>>>,
    features: ExchangeFeatures,
    urls: ExchangeUrls,
    timeframes: HashMap<Timeframe, String>,
}

impl Mxc {
    /// 새 Mxc 인스턴스 생성 (reqwest 전송 계층, 시스템 시계)
    pub fn new(config: ExchangeConfig) -> CcxtResult<Self> {
        let transport = Arc::new(HttpClient::new(&config)?);
        Ok(Self::with_transport(config, transport, Arc::new(SystemClock)))
    }

    /// 전송 계층과 시계를 직접 지정해 생성
    pub fn with_transport(
        config: ExchangeConfig,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let signer = Signer::new(config.hostname(), config.api_key(), config.secret());

        let features = ExchangeFeatures {
            cors: false,
            spot: true,
            fetch_markets: true,
            fetch_ticker: true,
            fetch_tickers: true,
            fetch_order_book: true,
            fetch_trades: true,
            fetch_ohlcv: true,
            fetch_balance: true,
            create_order: true,
            create_market_order: false,
            cancel_order: true,
            fetch_order: true,
            fetch_orders: true,
            ..Default::default()
        };

        let mut api_urls = HashMap::new();
        api_urls.insert("public".into(), signer.base_url(Api::Public).to_string());
        api_urls.insert("private".into(), signer.base_url(Api::Private).to_string());

        let urls = ExchangeUrls {
            logo: None,
            api: api_urls,
            www: Some("https://mxc.ceo/".into()),
            doc: vec!["https://github.com/mxcdevelop/APIDoc".into()],
            fees: Some("https://www.mxc.ceo/info/fee".into()),
        };

        let timeframes = Timeframe::ALL
            .into_iter()
            .map(|tf| (tf, tf.seconds().to_string()))
            .collect();

        Self {
            config,
            options: MxcOptions::default(),
            transport,
            clock,
            signer,
            classifier: ErrorClassifier::new(),
            markets: RwLock::new(None),
            features,
            urls,
            timeframes,
        }
    }

    /// 옵션 교체
    pub fn with_options(mut self, options: MxcOptions) -> Self {
        self.options = options;
        self
    }

    /// 에러 분류기 교체 (에러 코드 테이블 확장용)
    pub fn with_classifier(mut self, classifier: ErrorClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn options(&self) -> &MxcOptions {
        &self.options
    }

    /// 현재 로드된 마켓 테이블
    pub fn market_table(&self) -> Option<Arc<MarketTable>> {
        self.markets
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    async fn ensure_markets(&self) -> CcxtResult<Arc<MarketTable>> {
        if let Some(table) = self.market_table() {
            return Ok(table);
        }
        self.load_markets(false).await?;
        self.market_table().ok_or_else(|| CcxtError::ExchangeError {
            message: "mxc markets not loaded".into(),
        })
    }

    fn market(table: &MarketTable, symbol: &str) -> CcxtResult<Market> {
        table
            .market(symbol)
            .cloned()
            .ok_or_else(|| CcxtError::BadSymbol {
                symbol: format!("mxc does not have market symbol {symbol}"),
            })
    }

    fn require_symbol<'a>(symbol: Option<&'a str>, method: &str) -> CcxtResult<&'a str> {
        symbol.ok_or_else(|| CcxtError::ArgumentsRequired {
            message: format!("mxc {method} requires symbol argument"),
        })
    }

    /// `request` extended with `params`; caller params win.
    fn extend(mut request: Params, params: &Params) -> Params {
        request.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        request
    }

    /// Private request parameters with `api_key` and `req_time` filled in.
    fn private_params(&self, request: Params, params: &Params) -> CcxtResult<Params> {
        let (api_key, _) = self.signer.check_required_credentials()?;
        let mut base = Params::new();
        base.insert("api_key".into(), api_key.to_string());
        base.insert("req_time".into(), self.clock.milliseconds().to_string());
        base.extend(request);
        Ok(Self::extend(base, params))
    }

    /// Sign, send, decode and classify one request.
    async fn request(
        &self,
        path: &str,
        api: Api,
        method: &str,
        params: &Params,
    ) -> CcxtResult<Value> {
        let signed = self.sign(path, api, method, params)?;
        let url = redact_signature(&signed.url).to_string();
        tracing::debug!(method, url = %url, "mxc request");

        let raw = self.transport.execute(&signed).await?;
        tracing::trace!(status = raw.status, body = %raw.body, "mxc response");

        let decoded = if raw.body.trim().is_empty() {
            None
        } else {
            match serde_json::from_str::<Value>(&raw.body) {
                Ok(value) => Some(value),
                Err(_) if !raw.is_success() => None,
                Err(e) => {
                    return Err(CcxtError::BadResponse {
                        message: format!("mxc {path} returned a non-JSON body: {e}"),
                    })
                },
            }
        };

        self.classifier.handle_errors(&raw.body, decoded.as_ref())?;
        self.classifier
            .handle_http_status(raw.status, &url, &raw.body)?;

        decoded.ok_or(CcxtError::NullResponse { url })
    }

    fn unrecognized(method: &str) -> CcxtError {
        CcxtError::BadResponse {
            message: format!("mxc {method} got an unrecognized response"),
        }
    }

    fn decimal_param(value: Decimal) -> String {
        value.normalize().to_string()
    }
}

#[async_trait]
impl Exchange for Mxc {
    fn id(&self) -> ExchangeId {
        ExchangeId::Mxc
    }

    fn name(&self) -> &str {
        "MXC"
    }

    fn countries(&self) -> &[&str] {
        &["CN"]
    }

    fn rate_limit(&self) -> u64 {
        self.config.rate_limit_ms()
    }

    fn has(&self) -> &ExchangeFeatures {
        &self.features
    }

    fn urls(&self) -> &ExchangeUrls {
        &self.urls
    }

    fn timeframes(&self) -> &HashMap<Timeframe, String> {
        &self.timeframes
    }

    async fn load_markets(&self, reload: bool) -> CcxtResult<HashMap<String, Market>> {
        if !reload {
            if let Some(table) = self.market_table() {
                return Ok(table.markets().clone());
            }
        }

        let markets = self.fetch_markets(&Params::new()).await?;
        let table = Arc::new(MarketTable::new(markets));
        tracing::debug!(count = table.len(), reload, "mxc markets loaded");

        let result = table.markets().clone();
        *self.markets.write().unwrap_or_else(|e| e.into_inner()) = Some(table);
        Ok(result)
    }

    async fn fetch_markets(&self, params: &Params) -> CcxtResult<Vec<Market>> {
        let response = self.request("markets_info", Api::Public, "GET", params).await?;
        parsers::parse_markets(&response, &self.options)
    }

    async fn fetch_ticker(&self, symbol: &str, params: &Params) -> CcxtResult<Ticker> {
        let table = self.ensure_markets().await?;
        let market = Self::market(&table, symbol)?;

        let mut request = Params::new();
        request.insert("market".into(), market.id.clone());
        let response = self
            .request("ticker", Api::Public, "GET", &Self::extend(request, params))
            .await?;

        let ticker = safe_value(&response, "data")
            .filter(|data| data.is_object())
            .unwrap_or(&response);
        Ok(parsers::parse_ticker(
            ticker,
            Some(&market),
            self.clock.milliseconds(),
        ))
    }

    async fn fetch_tickers(
        &self,
        symbols: Option<&[&str]>,
        params: &Params,
    ) -> CcxtResult<HashMap<String, Ticker>> {
        let table = self.ensure_markets().await?;
        let response = self.request("ticker", Api::Public, "GET", params).await?;
        let data = safe_value(&response, "data")
            .and_then(Value::as_object)
            .ok_or_else(|| Self::unrecognized("fetchTickers"))?;

        let timestamp = self.clock.milliseconds();
        let mut result = HashMap::new();
        for (market_id, raw) in data {
            let symbol = resolve(market_id, Some(&table))?;
            if symbols.is_some_and(|wanted| !wanted.contains(&symbol.as_str())) {
                continue;
            }
            let mut ticker = parsers::parse_ticker(raw, table.market_by_id(market_id), timestamp);
            ticker.symbol = Some(symbol.clone());
            result.insert(symbol, ticker);
        }
        Ok(result)
    }

    async fn fetch_order_book(
        &self,
        symbol: &str,
        limit: Option<u32>,
        params: &Params,
    ) -> CcxtResult<OrderBook> {
        let table = self.ensure_markets().await?;
        let market = Self::market(&table, symbol)?;

        let mut request = Params::new();
        request.insert(
            "depth".into(),
            limit.unwrap_or(self.options.order_book_depth).to_string(),
        );
        request.insert("market".into(), market.id.clone());
        let response = self
            .request("depth", Api::Public, "GET", &Self::extend(request, params))
            .await?;

        let data = safe_value(&response, "data")
            .filter(|data| data.is_object())
            .ok_or_else(|| Self::unrecognized("fetchOrderBook"))?;
        Ok(parsers::parse_order_book(data, &market.symbol))
    }

    async fn fetch_trades(
        &self,
        symbol: &str,
        since: Option<i64>,
        limit: Option<u32>,
        params: &Params,
    ) -> CcxtResult<Vec<Trade>> {
        let table = self.ensure_markets().await?;
        let market = Self::market(&table, symbol)?;

        let mut request = Params::new();
        request.insert("market".into(), market.id.clone());
        let response = self
            .request("history", Api::Public, "GET", &Self::extend(request, params))
            .await?;

        let data = safe_value(&response, "data")
            .and_then(Value::as_array)
            .ok_or_else(|| Self::unrecognized("fetchTrades"))?;
        let trades = data
            .iter()
            .map(|raw| parsers::parse_trade(raw, Some(&market)))
            .collect();
        Ok(filter_by_since_limit(trades, since, limit))
    }

    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: Option<i64>,
        limit: Option<u32>,
        params: &Params,
    ) -> CcxtResult<Vec<OHLCV>> {
        let table = self.ensure_markets().await?;
        let market = Self::market(&table, symbol)?;
        let interval = self
            .timeframes
            .get(&timeframe)
            .cloned()
            .ok_or_else(|| CcxtError::NotSupported {
                feature: format!("mxc timeframe {}", timeframe.as_str()),
            })?;

        let start_time = since.unwrap_or_else(|| self.clock.milliseconds()) / 1000;
        let mut request = Params::new();
        request.insert("market".into(), market.id.clone());
        request.insert("interval".into(), interval);
        request.insert("startTime".into(), start_time.to_string());
        if let Some(limit) = limit {
            let hours = timeframe.seconds() * i64::from(limit) / 3600;
            request.insert("range_hour".into(), (hours - 1).max(0).to_string());
        }

        let response = self
            .request("kline", Api::Public, "GET", &Self::extend(request, params))
            .await?;
        let rows = safe_value(&response, "data")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut candles = rows
            .iter()
            .map(parsers::parse_ohlcv)
            .collect::<CcxtResult<Vec<_>>>()?;
        if let Some(limit) = limit {
            candles.truncate(limit as usize);
        }
        Ok(candles)
    }

    async fn fetch_balance(&self, params: &Params) -> CcxtResult<Balances> {
        let request = self.private_params(Params::new(), params)?;
        self.ensure_markets().await?;

        let response = self
            .request("account/info", Api::Private, "GET", &request)
            .await?;
        Ok(parsers::parse_balance(&response, self.clock.milliseconds()))
    }

    async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: OrderSide,
        amount: Decimal,
        price: Option<Decimal>,
        params: &Params,
    ) -> CcxtResult<Order> {
        if order_type == OrderType::Market {
            return Err(CcxtError::InvalidOrder {
                message: "mxc allows limit orders only".into(),
            });
        }
        let price = price.ok_or_else(|| CcxtError::ArgumentsRequired {
            message: "mxc createOrder requires a price argument for limit orders".into(),
        })?;
        self.signer.check_required_credentials()?;

        let table = self.ensure_markets().await?;
        let market = Self::market(&table, symbol)?;

        let mut request = Params::new();
        request.insert("market".into(), market.id.clone());
        request.insert("price".into(), Self::decimal_param(price));
        request.insert("quantity".into(), Self::decimal_param(amount));
        request.insert(
            "trade_type".into(),
            parsers::order_side_code(side).to_string(),
        );
        let request = self.private_params(request, params)?;

        let response = self.request("order", Api::Private, "POST", &request).await?;

        // the response only carries the new id; fill in what was sent
        let mut merged = serde_json::json!({
            "status": "1",
            "type": parsers::order_side_code(side),
            "initialAmount": Self::decimal_param(amount),
            "price": Self::decimal_param(price),
            "market": market.id.clone(),
        });
        if let (Some(target), Some(fields)) = (merged.as_object_mut(), response.as_object()) {
            target.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let mut order = parsers::parse_order(&merged, Some(&table), Some(&market));
        order.info = response;
        Ok(order)
    }

    async fn cancel_order(
        &self,
        id: &str,
        symbol: Option<&str>,
        params: &Params,
    ) -> CcxtResult<Order> {
        let symbol = Self::require_symbol(symbol, "cancelOrder")?;
        self.signer.check_required_credentials()?;

        let table = self.ensure_markets().await?;
        let market = Self::market(&table, symbol)?;

        let mut request = Params::new();
        request.insert("market".into(), market.id.clone());
        request.insert("trade_no".into(), id.to_string());
        let request = self.private_params(request, params)?;

        let response = self
            .request("order", Api::Private, "DELETE", &request)
            .await?;

        let mut order = Order::limit(Some(id.to_string()), Some(market.symbol));
        order.status = Some(Coded::Known(OrderStatus::Canceled));
        order.info = response;
        Ok(order)
    }

    async fn fetch_order(
        &self,
        id: &str,
        symbol: Option<&str>,
        params: &Params,
    ) -> CcxtResult<Order> {
        let symbol = Self::require_symbol(symbol, "fetchOrder")?;
        self.signer.check_required_credentials()?;

        let table = self.ensure_markets().await?;
        let market = Self::market(&table, symbol)?;

        let mut request = Params::new();
        request.insert("trade_no".into(), id.to_string());
        request.insert("market".into(), market.id.clone());
        let request = self.private_params(request, params)?;

        let response = self.request("order", Api::Private, "GET", &request).await?;
        let raw = safe_value2(&response, "data", "order")
            .filter(|order| order.is_object())
            .ok_or_else(|| Self::unrecognized("fetchOrder"))?;
        Ok(parsers::parse_order(raw, Some(&table), Some(&market)))
    }

    async fn fetch_orders(
        &self,
        symbol: Option<&str>,
        since: Option<i64>,
        limit: Option<u32>,
        params: &Params,
    ) -> CcxtResult<Vec<Order>> {
        self.signer.check_required_credentials()?;
        let table = self.ensure_markets().await?;
        let market = symbol.map(|s| Self::market(&table, s)).transpose()?;

        let mut request = Params::new();
        if let Some(market) = &market {
            request.insert("market".into(), market.id.clone());
        }
        let request = self.private_params(request, params)?;

        let response = self
            .request("current/orders", Api::Private, "GET", &request)
            .await?;
        let data = safe_value(&response, "data")
            .and_then(Value::as_array)
            .ok_or_else(|| Self::unrecognized("fetchOrders"))?;

        let orders = data
            .iter()
            .map(|raw| parsers::parse_order(raw, Some(&table), market.as_ref()))
            .collect();
        Ok(filter_by_since_limit(orders, since, limit))
    }

    fn market_id(&self, symbol: &str) -> Option<String> {
        unresolve(symbol, self.market_table().as_deref()).ok()
    }

    fn symbol(&self, market_id: &str) -> Option<String> {
        self.market_table()?
            .market_by_id(market_id)
            .map(|market| market.symbol.clone())
    }

    fn sign(
        &self,
        path: &str,
        api: Api,
        method: &str,
        params: &Params,
    ) -> CcxtResult<SignedRequest> {
        self.signer.sign(path, api, method, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RawResponse;
    use rust_decimal_macros::dec;

    struct NoNetwork;

    #[async_trait]
    impl Transport for NoNetwork {
        async fn execute(&self, request: &SignedRequest) -> CcxtResult<RawResponse> {
            panic!("unexpected request to {}", request.url);
        }
    }

    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn milliseconds(&self) -> i64 {
            self.0
        }
    }

    fn offline(config: ExchangeConfig) -> Mxc {
        Mxc::with_transport(config, Arc::new(NoNetwork), Arc::new(FixedClock(1557729071000)))
    }

    #[test]
    fn test_default_options() {
        let options = MxcOptions::default();
        assert_eq!(options.cost_min("BTC"), Some(dec!(0.0001)));
        assert_eq!(options.cost_min("ETH"), Some(dec!(0.001)));
        assert_eq!(options.cost_min("USDT"), Some(dec!(1)));
        assert_eq!(options.cost_min("MX"), None);
        assert_eq!(options.order_book_depth, 5);
    }

    #[test]
    fn test_metadata() {
        let mxc = offline(ExchangeConfig::new());
        assert_eq!(mxc.id(), ExchangeId::Mxc);
        assert_eq!(mxc.name(), "MXC");
        assert_eq!(mxc.version(), "v1");
        assert_eq!(mxc.countries(), &["CN"]);
        assert!(mxc.has_feature("fetchOHLCV"));
        assert!(mxc.has_feature("fetchTickers"));
        assert!(!mxc.has_feature("createMarketOrder"));
        assert!(!mxc.has_feature("fetchMyTrades"));
        assert_eq!(mxc.timeframes().get(&Timeframe::Hour4).map(String::as_str), Some("14400"));
        assert_eq!(mxc.timeframes().len(), 11);
        assert_eq!(
            mxc.urls().api.get("private").map(String::as_str),
            Some("https://www.mxc.ceo/open/api/v1/private/")
        );
    }

    #[test]
    fn test_private_params_include_key_and_time() {
        let mxc = offline(ExchangeConfig::new().with_credentials("key", "secret"));
        let mut extra = Params::new();
        extra.insert("req_time".into(), "1".into());
        let params = mxc.private_params(Params::new(), &extra).unwrap();
        assert_eq!(params.get("api_key").map(String::as_str), Some("key"));
        // caller params win
        assert_eq!(params.get("req_time").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_private_params_require_credentials() {
        let mxc = offline(ExchangeConfig::new());
        let err = mxc.private_params(Params::new(), &Params::new()).unwrap_err();
        assert!(err.is_auth_error());
    }

    #[tokio::test]
    async fn test_preconditions_fail_before_any_request() {
        let mxc = offline(ExchangeConfig::new().with_credentials("key", "secret"));
        let none = Params::new();

        let err = mxc.cancel_order("1", None, &none).await.unwrap_err();
        assert_eq!(err.code(), "ARGUMENTS_REQUIRED");

        let err = mxc.fetch_order("1", None, &none).await.unwrap_err();
        assert_eq!(err.code(), "ARGUMENTS_REQUIRED");

        let err = mxc
            .create_order("MX/ETH", OrderType::Market, OrderSide::Buy, dec!(1), None, &none)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_ORDER");
        assert!(err.to_string().contains("mxc allows limit orders only"));
    }

    #[tokio::test]
    async fn test_private_calls_without_credentials_fail_offline() {
        let mxc = offline(ExchangeConfig::new());
        let none = Params::new();

        assert!(mxc.fetch_balance(&none).await.unwrap_err().is_auth_error());
        assert!(mxc
            .fetch_orders(None, None, None, &none)
            .await
            .unwrap_err()
            .is_auth_error());
        assert!(mxc
            .create_order("MX/ETH", OrderType::Limit, OrderSide::Buy, dec!(1), Some(dec!(1)), &none)
            .await
            .unwrap_err()
            .is_auth_error());
    }

    #[test]
    fn test_lookups_before_load() {
        let mxc = offline(ExchangeConfig::new());
        assert!(mxc.market_table().is_none());
        assert!(mxc.market_id("MX/ETH").is_none());
        assert!(mxc.symbol("MX_ETH").is_none());
    }

    #[test]
    fn test_decimal_param() {
        assert_eq!(Mxc::decimal_param(dec!(1.500)), "1.5");
        assert_eq!(Mxc::decimal_param(dec!(100)), "100");
    }
}
