//! API 게이트웨이 설정
//!
//! 라우트 규칙과 CORS 정책은 시작 시 한 번 로드되며 프로세스가 끝날 때까지 변경되지 않습니다.

use crate::config::{ConfigSource, RateLimitConfig, ServerConfig};

/// 라우트 규칙 정의 (컴파일 전 원본 값)
///
/// `rewrite`는 `(정규식, 치환 문자열)` 쌍이며 치환 문자열에서는 `$name` 형태로
/// 이름 있는 캡처 그룹을 참조합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRuleConfig {
    pub id: String,
    pub pattern: String,
    pub upstream: String,
    pub rewrite: Option<(String, String)>,
}

/// CORS 정책
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub max_age_secs: usize,
}

impl CorsConfig {
    /// * `CORS_ALLOWED_ORIGINS` - 콤마로 구분된 허용 Origin (기본값: `http://localhost:3000`)
    /// * `CORS_MAX_AGE_SECS` - Preflight 캐시 시간 (기본값: 3600)
    pub fn from_source(source: &ConfigSource) -> Self {
        Self {
            allowed_origins: source.list_or("CORS_ALLOWED_ORIGINS", &["http://localhost:3000"]),
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS", "PATCH"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            max_age_secs: source.parse_or("CORS_MAX_AGE_SECS", 3600usize),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub routes: Vec<RouteRuleConfig>,
    /// 업스트림 호출 타임아웃 (초)
    pub upstream_timeout_secs: u64,
    pub rate_limit: RateLimitConfig,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self::from_source(&ConfigSource::env())
    }

    pub fn from_source(source: &ConfigSource) -> Self {
        Self {
            server: ServerConfig::from_source(source, "GATEWAY_", 8080),
            cors: CorsConfig::from_source(source),
            routes: default_routes(source),
            upstream_timeout_secs: source.parse_or("GATEWAY_UPSTREAM_TIMEOUT_SECS", 10u64),
            rate_limit: RateLimitConfig::from_source(source),
        }
    }
}

/// 기본 라우트 규칙
///
/// - `auth-service`: `/api/auth/**` → 인증 서비스, `/api/auth` 접두사를 제거하여 전달
/// - `transformer-service-docs`: `/transformer-docs/**` → 경로 그대로 전달
fn default_routes(source: &ConfigSource) -> Vec<RouteRuleConfig> {
    vec![
        RouteRuleConfig {
            id: "auth-service".to_string(),
            pattern: "/api/auth/**".to_string(),
            upstream: source.string_or("AUTH_SERVICE_URI", "http://authservice:8081"),
            rewrite: Some((
                "^/api/auth(?:/(?P<segment>.*))?$".to_string(),
                "/$segment".to_string(),
            )),
        },
        RouteRuleConfig {
            id: "transformer-service-docs".to_string(),
            pattern: "/transformer-docs/**".to_string(),
            upstream: source.string_or("TRANSFORMER_SERVICE_URI", "http://transformerservice:9020"),
            rewrite: None,
        },
    ]
}
