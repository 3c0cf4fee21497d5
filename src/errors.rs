//! Connector error hierarchy
//!
//! CCXT 에러 계층 중 MXC 커넥터가 실제로 발생시키거나 매핑하는 종류만 유지

use thiserror::Error;

/// Error kinds raised by the connector
///
/// - ExchangeError (exchange-specific errors)
///   - AuthenticationError
///   - ArgumentsRequired
///   - BadRequest
///     - BadSymbol
///   - InsufficientFunds
///   - InvalidOrder
///     - OrderNotFound
///   - NotSupported
/// - OperationFailed
///   - NetworkError
///     - RateLimitExceeded
///     - ExchangeNotAvailable
///     - RequestTimeout
///   - BadResponse
///     - NullResponse
#[derive(Error, Debug)]
pub enum CcxtError {
    // === ExchangeError family ===
    /// Generic exchange error, the fallback kind for classified failures
    #[error("Exchange error: {message}")]
    ExchangeError { message: String },

    /// Missing or rejected credentials
    #[error("Authentication error: {message}")]
    AuthenticationError { message: String },

    /// Required arguments missing
    #[error("Arguments required: {message}")]
    ArgumentsRequired { message: String },

    /// Invalid request parameters
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Symbol or native market id that cannot be resolved
    #[error("Bad symbol: {symbol}")]
    BadSymbol { symbol: String },

    /// Not enough balance
    #[error("Insufficient funds: {message}")]
    InsufficientFunds { message: String },

    /// Order rejected before or by the exchange
    #[error("Invalid order: {message}")]
    InvalidOrder { message: String },

    /// Order not found on exchange
    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: String },

    /// Feature not supported by this exchange
    #[error("Not supported: {feature}")]
    NotSupported { feature: String },

    // === OperationFailed / NetworkError family ===
    /// Generic network error
    #[error("Network error: {url} - {message}")]
    NetworkError { url: String, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded {
        message: String,
        /// Suggested retry after in milliseconds (if provided by exchange)
        retry_after_ms: Option<u64>,
    },

    /// Exchange is temporarily unavailable
    #[error("Exchange not available: {message}")]
    ExchangeNotAvailable { message: String },

    /// Request timed out
    #[error("Request timeout: {url}")]
    RequestTimeout { url: String },

    /// Response did not have the expected shape
    #[error("Bad response: {message}")]
    BadResponse { message: String },

    /// Empty response where a payload was required
    #[error("Null response from: {url}")]
    NullResponse { url: String },

    // === Parsing errors ===
    /// JSON parsing error
    #[error("JSON error: {message}")]
    JsonError { message: String },
}

impl CcxtError {
    /// Returns the error code as a string constant
    pub fn code(&self) -> &'static str {
        match self {
            CcxtError::ExchangeError { .. } => "EXCHANGE_ERROR",
            CcxtError::AuthenticationError { .. } => "AUTHENTICATION_ERROR",
            CcxtError::ArgumentsRequired { .. } => "ARGUMENTS_REQUIRED",
            CcxtError::BadRequest { .. } => "BAD_REQUEST",
            CcxtError::BadSymbol { .. } => "BAD_SYMBOL",
            CcxtError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            CcxtError::InvalidOrder { .. } => "INVALID_ORDER",
            CcxtError::OrderNotFound { .. } => "ORDER_NOT_FOUND",
            CcxtError::NotSupported { .. } => "NOT_SUPPORTED",
            CcxtError::NetworkError { .. } => "NETWORK_ERROR",
            CcxtError::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            CcxtError::ExchangeNotAvailable { .. } => "EXCHANGE_NOT_AVAILABLE",
            CcxtError::RequestTimeout { .. } => "REQUEST_TIMEOUT",
            CcxtError::BadResponse { .. } => "BAD_RESPONSE",
            CcxtError::NullResponse { .. } => "NULL_RESPONSE",
            CcxtError::JsonError { .. } => "JSON_ERROR",
        }
    }

    /// Returns true if the condition is temporary and a caller may retry.
    /// The connector itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CcxtError::NetworkError { .. }
                | CcxtError::RequestTimeout { .. }
                | CcxtError::RateLimitExceeded { .. }
                | CcxtError::ExchangeNotAvailable { .. }
        )
    }

    /// Returns true if this is an authentication-related error
    pub fn is_auth_error(&self) -> bool {
        matches!(self, CcxtError::AuthenticationError { .. })
    }

    /// Returns true if this is an order-related error
    pub fn is_order_error(&self) -> bool {
        matches!(
            self,
            CcxtError::InvalidOrder { .. } | CcxtError::OrderNotFound { .. }
        )
    }

    /// Returns true if this is a network-related error
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            CcxtError::NetworkError { .. }
                | CcxtError::RateLimitExceeded { .. }
                | CcxtError::ExchangeNotAvailable { .. }
                | CcxtError::RequestTimeout { .. }
        )
    }

    /// Returns true for errors raised before any request left the process
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            CcxtError::ArgumentsRequired { .. }
                | CcxtError::AuthenticationError { .. }
                | CcxtError::BadSymbol { .. }
        )
    }

    /// Human readable message without the kind prefix
    pub fn message(&self) -> String {
        match self {
            CcxtError::ExchangeError { message }
            | CcxtError::AuthenticationError { message }
            | CcxtError::ArgumentsRequired { message }
            | CcxtError::BadRequest { message }
            | CcxtError::InsufficientFunds { message }
            | CcxtError::InvalidOrder { message }
            | CcxtError::RateLimitExceeded { message, .. }
            | CcxtError::ExchangeNotAvailable { message }
            | CcxtError::BadResponse { message }
            | CcxtError::JsonError { message } => message.clone(),
            CcxtError::NetworkError { message, .. } => message.clone(),
            CcxtError::BadSymbol { symbol } => symbol.clone(),
            CcxtError::OrderNotFound { order_id } => order_id.clone(),
            CcxtError::NotSupported { feature } => feature.clone(),
            CcxtError::RequestTimeout { url } | CcxtError::NullResponse { url } => url.clone(),
        }
    }

    /// Suggested retry delay in milliseconds for retryable errors
    pub fn suggested_retry_after(&self) -> Option<u64> {
        match self {
            CcxtError::RateLimitExceeded { retry_after_ms, .. } => retry_after_ms.or(Some(1000)),
            CcxtError::RequestTimeout { .. } => Some(5000),
            CcxtError::ExchangeNotAvailable { .. } => Some(30000),
            CcxtError::NetworkError { .. } => Some(1000),
            _ => None,
        }
    }
}

// === From implementations for common error types ===

impl From<serde_json::Error> for CcxtError {
    fn from(err: serde_json::Error) -> Self {
        CcxtError::JsonError {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for CcxtError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();
        if err.is_timeout() {
            CcxtError::RequestTimeout { url }
        } else if err.is_connect() {
            CcxtError::NetworkError {
                url,
                message: "Connection failed".into(),
            }
        } else {
            CcxtError::NetworkError {
                url,
                message: err.to_string(),
            }
        }
    }
}

/// Result 타입 alias
pub type CcxtResult<T> = Result<T, CcxtError>;
