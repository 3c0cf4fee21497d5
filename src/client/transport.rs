//! Transport and clock seams
//!
//! 커넥터는 이 두 trait을 통해서만 네트워크와 시간에 접근한다.

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::CcxtResult;
use crate::types::SignedRequest;

/// 전송 계층이 돌려주는 원본 응답
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP 상태 코드
    pub status: u16,
    /// 디코딩 전 본문
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx 여부
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 서명된 요청을 실행하는 전송 계층
///
/// 재시도, 타임아웃, 레이트 리밋은 구현체의 몫이다.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &SignedRequest) -> CcxtResult<RawResponse>;
}

/// 밀리초 시계
pub trait Clock: Send + Sync {
    /// 현재 Unix 시각 (밀리초)
    fn milliseconds(&self) -> i64;
}

/// 시스템 시계
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn milliseconds(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_status() {
        assert!(RawResponse::new(200, "{}").is_success());
        assert!(!RawResponse::new(429, "").is_success());
        assert!(!RawResponse::new(503, "").is_success());
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2020-01-01 이후
        assert!(SystemClock.milliseconds() > 1_577_836_800_000);
    }
}
