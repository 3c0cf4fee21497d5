//! CCXT-Rust MXC connector
//!
//! MXC 거래소 REST API v1을 CCXT 통합 스키마로 정규화하는 커넥터

pub mod client;
pub mod errors;
pub mod exchanges;
pub mod types;
pub mod utils;

// Re-exports
pub use client::{Clock, ExchangeConfig, HttpClient, RateLimiter, RawResponse, SystemClock, Transport};
pub use errors::{CcxtError, CcxtResult};
pub use exchanges::{Mxc, MxcOptions};
pub use types::*;
