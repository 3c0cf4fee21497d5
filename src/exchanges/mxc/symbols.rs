//! Symbol resolution between MXC native market ids and unified symbols
//!
//! MXC ids join the currency ids with `_` (`MX_ETH`), except a few base
//! currencies that contain an underscore themselves (`boe_eth_eth`).

use std::collections::HashMap;

use crate::errors::{CcxtError, CcxtResult};
use crate::types::Market;

/// Common currency spellings mapped to their unified code.
const CURRENCY_ALIASES: [(&str, &str); 5] = [
    ("XBT", "BTC"),
    ("BCC", "BCH"),
    ("BCHABC", "BCH"),
    ("BCHSV", "BSV"),
    ("DRK", "DASH"),
];

/// Unified currency code for a native currency id.
pub fn safe_currency_code(currency_id: &str) -> String {
    let upper = currency_id.to_uppercase();
    CURRENCY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == upper)
        .map(|(_, code)| (*code).to_string())
        .unwrap_or(upper)
}

/// Split a native market id into `(base_id, quote_id)`.
///
/// The last `_`-separated part is the quote; everything before it is the base.
pub fn split_market_id(market_id: &str) -> CcxtResult<(String, String)> {
    let parts: Vec<&str> = market_id.split('_').collect();
    if parts.len() < 2 || parts.iter().any(|p| p.is_empty()) {
        return Err(CcxtError::BadSymbol {
            symbol: format!("mxc cannot resolve market id {market_id:?}"),
        });
    }
    let (quote, base) = parts.split_last().ok_or_else(|| CcxtError::BadSymbol {
        symbol: format!("mxc cannot resolve market id {market_id:?}"),
    })?;
    Ok((base.join("_"), (*quote).to_string()))
}

/// Unified `BASE/QUOTE` symbol derived from a native market id.
pub fn symbol_from_id(market_id: &str) -> CcxtResult<String> {
    let (base_id, quote_id) = split_market_id(market_id)?;
    Ok(format!(
        "{}/{}",
        safe_currency_code(&base_id),
        safe_currency_code(&quote_id)
    ))
}

/// Markets loaded by `load_markets`, keyed by symbol and by native id.
///
/// Never mutated after construction; a reload builds a new table.
#[derive(Debug, Clone, Default)]
pub struct MarketTable {
    by_symbol: HashMap<String, Market>,
    by_id: HashMap<String, String>,
}

impl MarketTable {
    pub fn new(markets: Vec<Market>) -> Self {
        let mut by_symbol = HashMap::with_capacity(markets.len());
        let mut by_id = HashMap::with_capacity(markets.len());
        for market in markets {
            by_id.insert(market.id.clone(), market.symbol.clone());
            by_symbol.insert(market.symbol.clone(), market);
        }
        Self { by_symbol, by_id }
    }

    pub fn market(&self, symbol: &str) -> Option<&Market> {
        self.by_symbol.get(symbol)
    }

    pub fn market_by_id(&self, market_id: &str) -> Option<&Market> {
        self.by_id
            .get(market_id)
            .and_then(|symbol| self.by_symbol.get(symbol))
    }

    pub fn markets(&self) -> &HashMap<String, Market> {
        &self.by_symbol
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }
}

/// Native id → unified symbol. The loaded table wins over derivation.
pub fn resolve(market_id: &str, table: Option<&MarketTable>) -> CcxtResult<String> {
    if let Some(market) = table.and_then(|t| t.market_by_id(market_id)) {
        return Ok(market.symbol.clone());
    }
    symbol_from_id(market_id)
}

/// Unified symbol → native id, restoring the exchange's exact spelling.
pub fn unresolve(symbol: &str, table: Option<&MarketTable>) -> CcxtResult<String> {
    table
        .and_then(|t| t.market(symbol))
        .map(|market| market.id.clone())
        .ok_or_else(|| CcxtError::BadSymbol {
            symbol: format!("mxc does not have market symbol {symbol}"),
        })
}
