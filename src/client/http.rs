//! HTTP client for API requests

use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;

use super::{ExchangeConfig, RateLimiter, RawResponse, Transport};
use crate::errors::{CcxtError, CcxtResult};
use crate::types::SignedRequest;

/// HTTP 클라이언트
///
/// reqwest 기반 기본 전송 계층. 요청마다 설정된 간격으로 스로틀한다.
pub struct HttpClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl HttpClient {
    /// 새로운 HTTP 클라이언트 생성
    pub fn new(config: &ExchangeConfig) -> CcxtResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms()))
            .build()
            .map_err(|e| CcxtError::NetworkError {
                url: String::new(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.rate_limit_ms()),
        })
    }

    /// 레이트 리미터
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(&self, request: &SignedRequest) -> CcxtResult<RawResponse> {
        let method = Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            CcxtError::BadRequest {
                message: format!("mxc unsupported HTTP method {}", request.method),
            }
        })?;

        self.rate_limiter.throttle(1.0).await;

        let mut builder = self.client.request(method, &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| CcxtError::NetworkError {
            url: request.url.clone(),
            message: e.to_string(),
        })?;

        tracing::trace!(status, url = %request.url, body = %body, "received response");
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_client_uses_configured_interval() {
        let config = ExchangeConfig::new().with_rate_limit_ms(250);
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(client.rate_limiter().interval_ms(), 250);
    }

    #[tokio::test]
    async fn test_invalid_method_rejected_before_send() {
        let client = HttpClient::new(&ExchangeConfig::new()).unwrap();
        let request = SignedRequest {
            url: "https://www.mxc.ceo/open/api/v1/data/ticker".into(),
            method: "BAD METHOD".into(),
            headers: HashMap::new(),
            body: None,
        };
        let err = client.execute(&request).await.unwrap_err();
        assert_eq!(err.code(), "BAD_REQUEST");
    }
}
