//! MXC error classification
//!
//! MXC reports application errors inside a normal JSON body: `result` is the
//! string `"false"`, `code` carries the error code and `message` the text.

use serde_json::Value;
use std::collections::HashMap;

use crate::errors::{CcxtError, CcxtResult};
use crate::utils::safe_string;

/// Error kinds an exact error code can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Exchange,
    Authentication,
    BadRequest,
    BadSymbol,
    InsufficientFunds,
    InvalidOrder,
    OrderNotFound,
    RateLimitExceeded,
    ExchangeNotAvailable,
}

impl ErrorKind {
    pub fn into_error(self, message: String) -> CcxtError {
        match self {
            ErrorKind::Exchange => CcxtError::ExchangeError { message },
            ErrorKind::Authentication => CcxtError::AuthenticationError { message },
            ErrorKind::BadRequest => CcxtError::BadRequest { message },
            ErrorKind::BadSymbol => CcxtError::BadSymbol { symbol: message },
            ErrorKind::InsufficientFunds => CcxtError::InsufficientFunds { message },
            ErrorKind::InvalidOrder => CcxtError::InvalidOrder { message },
            ErrorKind::OrderNotFound => CcxtError::OrderNotFound { order_id: message },
            ErrorKind::RateLimitExceeded => CcxtError::RateLimitExceeded {
                message,
                retry_after_ms: None,
            },
            ErrorKind::ExchangeNotAvailable => CcxtError::ExchangeNotAvailable { message },
        }
    }
}

/// Decides whether a decoded response is an application error.
///
/// Both tables start empty; they are filled through the builder methods.
#[derive(Debug, Clone, Default)]
pub struct ErrorClassifier {
    exact: HashMap<String, ErrorKind>,
    error_code_names: HashMap<String, String>,
}

impl ErrorClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an exact error code to an error kind.
    pub fn with_exact(mut self, code: impl Into<String>, kind: ErrorKind) -> Self {
        self.exact.insert(code.into(), kind);
        self
    }

    /// Human readable name for an error code, used instead of `message`.
    pub fn with_code_name(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.error_code_names.insert(code.into(), name.into());
        self
    }

    /// `Ok(())` unless the body reports `result == "false"`.
    ///
    /// `body` is the raw text, used as the message when `message` is absent.
    pub fn handle_errors(&self, body: &str, response: Option<&Value>) -> CcxtResult<()> {
        let Some(response) = response else {
            return Ok(());
        };
        if safe_string(response, "result").as_deref() != Some("false") {
            return Ok(());
        }

        let code = safe_string(response, "code");
        let message = safe_string(response, "message").unwrap_or_else(|| body.to_string());
        let feedback = code
            .as_ref()
            .and_then(|c| self.error_code_names.get(c))
            .cloned()
            .unwrap_or(message);
        let kind = code
            .as_ref()
            .and_then(|c| self.exact.get(c))
            .copied()
            .unwrap_or(ErrorKind::Exchange);

        tracing::debug!(code = code.as_deref(), feedback = %feedback, ?kind, "mxc error response");
        Err(kind.into_error(format!("mxc {feedback}")))
    }

    /// Map a non-2xx HTTP status that the body did not already explain.
    pub fn handle_http_status(&self, status: u16, url: &str, body: &str) -> CcxtResult<()> {
        let message = format!("mxc {status} {url} {body}");
        match status {
            200..=299 => Ok(()),
            429 => Err(CcxtError::RateLimitExceeded {
                message,
                retry_after_ms: None,
            }),
            500..=599 => Err(CcxtError::ExchangeNotAvailable { message }),
            _ => Err(CcxtError::ExchangeError { message }),
        }
    }
}
