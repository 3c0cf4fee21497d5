//! Rate limiting for API requests

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// 레이트 리미터
///
/// 요청 사이에 최소 간격(밀리초 × cost)을 두는 CCXT 방식 스로틀
pub struct RateLimiter {
    interval_ms: u64,
    last_request: Mutex<Option<Instant>>,
    throttled: AtomicU64,
}

impl RateLimiter {
    /// 새로운 레이트 리미터 생성
    ///
    /// # Arguments
    /// * `interval_ms` - 요청 간 최소 간격 (0이면 제한 없음)
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_request: Mutex::new(None),
            throttled: AtomicU64::new(0),
        }
    }

    /// 다음 요청까지 필요한 만큼 대기
    pub async fn throttle(&self, cost: f64) {
        let wait = Duration::from_millis((self.interval_ms as f64 * cost.max(0.0)) as u64);
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < wait {
                let delay = wait - elapsed;
                tracing::trace!(delay_ms = delay.as_millis() as u64, "throttling request");
                self.throttled.fetch_add(1, Ordering::Relaxed);
                tokio::time::sleep(delay).await;
            }
        }

        *last = Some(Instant::now());
    }

    /// 요청 간 최소 간격 (밀리초)
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// 대기가 발생한 요청 수
    pub fn stats(&self) -> RateLimiterStats {
        RateLimiterStats {
            interval_ms: self.interval_ms,
            throttled_requests: self.throttled.load(Ordering::Relaxed),
        }
    }
}

/// 레이트 리미터 통계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiterStats {
    pub interval_ms: u64,
    pub throttled_requests: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_request_not_delayed() {
        let limiter = RateLimiter::new(10_000);
        let start = Instant::now();
        limiter.throttle(1.0).await;
        assert!(start.elapsed() < Duration::from_millis(1000));
        assert_eq!(limiter.stats().throttled_requests, 0);
    }

    #[tokio::test]
    async fn test_second_request_waits() {
        let limiter = RateLimiter::new(50);
        limiter.throttle(1.0).await;
        let start = Instant::now();
        limiter.throttle(1.0).await;
        assert!(start.elapsed() >= Duration::from_millis(40));
        assert_eq!(limiter.stats().throttled_requests, 1);
    }

    #[tokio::test]
    async fn test_zero_interval_never_waits() {
        let limiter = RateLimiter::new(0);
        limiter.throttle(1.0).await;
        limiter.throttle(1.0).await;
        assert_eq!(limiter.stats().throttled_requests, 0);
    }
}
