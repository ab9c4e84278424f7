//! 서버, 환경, Rate Limiting 관련 설정
//!
//! 모든 설정값은 [`ConfigSource`]를 통해 읽어옵니다. 운영 환경에서는 프로세스 환경 변수를,
//! 테스트에서는 키/값 목록을 주입하여 전역 상태 없이 설정을 구성합니다.

use std::collections::HashMap;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// 설정값 조회 원천
///
/// 환경 변수 조회를 한 곳으로 모아 각 설정 구조체가 같은 규칙
/// (빈 문자열은 미설정으로 취급, 파싱 실패 시 경고 후 기본값)으로 값을 읽도록 합니다.
pub struct ConfigSource {
    lookup: Box<dyn Fn(&str) -> Option<String> + Send + Sync>,
}

impl ConfigSource {
    /// 프로세스 환경 변수를 원천으로 사용합니다.
    pub fn env() -> Self {
        Self {
            lookup: Box::new(|key| env::var(key).ok()),
        }
    }

    /// 고정된 키/값 목록을 원천으로 사용합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let source = ConfigSource::from_pairs([("JWT_SECRET", "secret")]);
    /// assert_eq!(source.get("JWT_SECRET").as_deref(), Some("secret"));
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Self {
            lookup: Box::new(move |key| map.get(key).cloned()),
        }
    }

    /// 값을 조회합니다. 공백만 있는 값은 설정되지 않은 것으로 봅니다.
    pub fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn string_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// 값을 파싱합니다. 파싱에 실패하면 에러 로그를 남기고 기본값을 사용합니다.
    pub fn parse_or<T>(&self, key: &str, default: T) -> T
    where
        T: FromStr + Display,
        T::Err: Display,
    {
        match self.get(key) {
            Some(raw) => raw.parse::<T>().unwrap_or_else(|e| {
                log::error!("{} 파싱 실패: {}. 기본값 {} 사용", key, e, default);
                default
            }),
            None => default,
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.get(key).map(|v| v.to_lowercase()) {
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
            Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
            Some(v) => {
                log::error!("{} 파싱 실패: '{}'. 기본값 {} 사용", key, v, default);
                default
            }
            None => default,
        }
    }

    /// 콤마로 구분된 목록을 읽습니다.
    pub fn list_or(&self, key: &str, default: &[&str]) -> Vec<String> {
        match self.get(key) {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => default.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub fn from_source(source: &ConfigSource) -> Self {
        Self::parse(&source.string_or("ENVIRONMENT", "production"))
    }

    /// 알 수 없는 값은 가장 보수적인 `Production`으로 취급합니다.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

/// HTTP 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `{prefix}HOST`, `{prefix}PORT` 환경 변수에서 바인딩 주소를 읽습니다.
    ///
    /// 인증 서비스는 접두사 없이 (`HOST`, `PORT`), 게이트웨이는 `GATEWAY_` 접두사를 사용합니다.
    pub fn from_source(source: &ConfigSource, prefix: &str, default_port: u16) -> Self {
        Self {
            host: source.string_or(&format!("{}HOST", prefix), "0.0.0.0"),
            port: source.parse_or(&format!("{}PORT", prefix), default_port),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
    pub fn from_source(source: &ConfigSource) -> Self {
        Self {
            per_second: source.parse_or("RATE_LIMIT_PER_SECOND", 100u64),
            burst_size: source.parse_or("RATE_LIMIT_BURST_SIZE", 200u32),
        }
    }
}
