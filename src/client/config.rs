//! Exchange configuration

use std::env;

/// API 키 환경변수 이름
pub const ENV_API_KEY: &str = "MXC_API_KEY";
/// API 시크릿 환경변수 이름
pub const ENV_API_SECRET: &str = "MXC_API_SECRET";
/// 호스트네임 환경변수 이름
pub const ENV_HOSTNAME: &str = "MXC_HOSTNAME";

/// 거래소 설정
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    api_key: Option<String>,
    api_secret: Option<String>,
    timeout_ms: u64,
    rate_limit_ms: u64,
    hostname: Option<String>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeConfig {
    /// 새로운 빈 설정 생성
    pub fn new() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            timeout_ms: 30000,
            rate_limit_ms: 1000, // 초당 1회
            hostname: None,
        }
    }

    /// 환경변수에서 설정 로드
    ///
    /// `MXC_API_KEY`, `MXC_API_SECRET`, `MXC_HOSTNAME` 중 설정된 값만 적용된다.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            api_key: non_empty(ENV_API_KEY),
            api_secret: non_empty(ENV_API_SECRET),
            hostname: non_empty(ENV_HOSTNAME),
            ..Self::new()
        }
    }

    /// API 키 설정
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// API 시크릿 설정
    pub fn with_api_secret(mut self, secret: impl Into<String>) -> Self {
        self.api_secret = Some(secret.into());
        self
    }

    /// 타임아웃 설정 (밀리초)
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// 레이트 리밋 설정 (밀리초)
    pub fn with_rate_limit_ms(mut self, rate_limit_ms: u64) -> Self {
        self.rate_limit_ms = rate_limit_ms;
        self
    }

    /// 호스트네임 설정
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// 인증 정보로 설정
    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        self.api_key = Some(api_key.into());
        self.api_secret = Some(api_secret.into());
        self
    }

    // === Getters ===

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn api_secret(&self) -> Option<&str> {
        self.api_secret.as_deref()
    }

    /// secret 별칭 (CCXT 호환)
    pub fn secret(&self) -> Option<&str> {
        self.api_secret.as_deref()
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn rate_limit_ms(&self) -> u64 {
        self.rate_limit_ms
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    /// 인증 정보 유효성 확인
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_builder() {
        let config = ExchangeConfig::new()
            .with_api_key("test_key")
            .with_api_secret("test_secret")
            .with_timeout(5000)
            .with_hostname("www.mxc.com");

        assert_eq!(config.api_key(), Some("test_key"));
        assert_eq!(config.secret(), Some("test_secret"));
        assert_eq!(config.timeout_ms(), 5000);
        assert_eq!(config.hostname(), Some("www.mxc.com"));
        assert!(config.has_credentials());
    }

    #[test]
    fn test_config_default() {
        let config = ExchangeConfig::default();
        assert!(config.api_key().is_none());
        assert!(!config.has_credentials());
        assert_eq!(config.rate_limit_ms(), 1000);
    }

    #[test]
    fn test_config_from_lookup() {
        let vars: HashMap<&str, &str> = [(ENV_API_KEY, "key"), (ENV_API_SECRET, "  ")].into();
        let config = ExchangeConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.api_key(), Some("key"));
        assert!(config.secret().is_none());
        assert!(config.hostname().is_none());
        assert_eq!(config.timeout_ms(), 30000);
    }
}
