//! HTTP Client and related utilities

mod config;
mod http;
mod rate_limiter;
mod transport;

pub use config::{ExchangeConfig, ENV_API_KEY, ENV_API_SECRET, ENV_HOSTNAME};
pub use http::HttpClient;
pub use rate_limiter::{RateLimiter, RateLimiterStats};
pub use transport::{Clock, RawResponse, SystemClock, Transport};
