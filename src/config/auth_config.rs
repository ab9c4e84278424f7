//! # Authentication Configuration Module
//!
//! OAuth 프로바이더(Google, Kakao, Naver), JWT 토큰, 리프레시 토큰 쿠키 관련 설정을 관리합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### OAuth 프로바이더
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/api/auth/google/callback"
//!
//! export KAKAO_CLIENT_ID="your-kakao-rest-api-key"
//! export KAKAO_REDIRECT_URI="http://localhost:8080/api/auth/kakao/callback"
//!
//! export NAVER_CLIENT_ID="your-naver-client-id"
//! export NAVER_CLIENT_SECRET="your-naver-client-secret"
//! export NAVER_REDIRECT_URI="http://localhost:8080/api/auth/naver/callback"
//! ```
//!
//! 엔드포인트는 `{PROVIDER}_AUTH_URI`, `{PROVIDER}_TOKEN_URI`, `{PROVIDER}_USERINFO_URI`로
//! 재정의할 수 있습니다. 테스트에서 스텁 서버를 가리킬 때 사용합니다.
//!
//! ### JWT 토큰 설정
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key-at-least-32-bytes"
//! export JWT_ACCESS_TOKEN_EXPIRATION_MS="3600000"      # 1시간
//! export JWT_REFRESH_TOKEN_EXPIRATION_MS="2592000000"  # 30일
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{AuthProvider, ConfigSource, JwtConfig};
//!
//! let source = ConfigSource::env();
//! let jwt = JwtConfig::from_source(&source);
//! let provider: AuthProvider = "kakao".parse()?;
//! ```

use std::fmt;
use std::str::FromStr;

use actix_web::cookie::SameSite;
use chrono::Duration;

use crate::config::ConfigSource;

/// 액세스 토큰 기본 유효 시간 (1시간)
pub const DEFAULT_ACCESS_TOKEN_TTL_MS: i64 = 3_600_000;

/// 리프레시 토큰 기본 유효 시간 (30일)
pub const DEFAULT_REFRESH_TOKEN_TTL_MS: i64 = 2_592_000_000;

/// 지원하는 OAuth 2.0 소셜 로그인 제공자
///
/// 경로 변수(`/{provider}/...`)와 JWT의 `provider` 클레임에 소문자 문자열로 표현됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Google,
    Kakao,
    Naver,
}

impl AuthProvider {
    pub const ALL: [AuthProvider; 3] = [AuthProvider::Google, AuthProvider::Kakao, AuthProvider::Naver];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Google => "google",
            AuthProvider::Kakao => "kakao",
            AuthProvider::Naver => "naver",
        }
    }

    /// 환경 변수 접두사 (`GOOGLE`, `KAKAO`, `NAVER`)
    pub fn env_prefix(&self) -> &'static str {
        match self {
            AuthProvider::Google => "GOOGLE",
            AuthProvider::Kakao => "KAKAO",
            AuthProvider::Naver => "NAVER",
        }
    }

    /// 사용자에게 보여줄 이름
    pub fn display_name(&self) -> &'static str {
        match self {
            AuthProvider::Google => "구글",
            AuthProvider::Kakao => "카카오",
            AuthProvider::Naver => "네이버",
        }
    }
}

impl FromStr for AuthProvider {
    type Err = String;

    /// 대소문자를 구분하지 않고 제공자 이름을 해석합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(AuthProvider::Google),
            "kakao" => Ok(AuthProvider::Kakao),
            "naver" => Ok(AuthProvider::Naver),
            _ => Err(format!("지원하지 않는 OAuth 제공자입니다: {}", s)),
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 단일 OAuth 제공자의 클라이언트 자격 증명과 엔드포인트
///
/// 자격 증명은 선택값으로 보관합니다. 누락 여부는 서버 시작 시 경고로 남기고,
/// 실제 호출 시점에 `ConfigError`로 보고합니다.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub provider: AuthProvider,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub auth_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
}

impl ProviderCredentials {
    pub fn from_source(source: &ConfigSource, provider: AuthProvider) -> Self {
        let prefix = provider.env_prefix();
        let (auth_uri, token_uri, userinfo_uri) = Self::default_endpoints(provider);

        Self {
            provider,
            client_id: source.get(&format!("{}_CLIENT_ID", prefix)),
            client_secret: source.get(&format!("{}_CLIENT_SECRET", prefix)),
            redirect_uri: source.get(&format!("{}_REDIRECT_URI", prefix)),
            auth_uri: source.string_or(&format!("{}_AUTH_URI", prefix), auth_uri),
            token_uri: source.string_or(&format!("{}_TOKEN_URI", prefix), token_uri),
            userinfo_uri: source.string_or(&format!("{}_USERINFO_URI", prefix), userinfo_uri),
        }
    }

    /// 제공자별 공식 엔드포인트 `(authorize, token, userinfo)`
    pub fn default_endpoints(provider: AuthProvider) -> (&'static str, &'static str, &'static str) {
        match provider {
            AuthProvider::Google => (
                "https://accounts.google.com/o/oauth2/v2/auth",
                "https://oauth2.googleapis.com/token",
                "https://www.googleapis.com/oauth2/v2/userinfo",
            ),
            AuthProvider::Kakao => (
                "https://kauth.kakao.com/oauth/authorize",
                "https://kauth.kakao.com/oauth/token",
                "https://kapi.kakao.com/v2/user/me",
            ),
            AuthProvider::Naver => (
                "https://nid.naver.com/oauth2.0/authorize",
                "https://nid.naver.com/oauth2.0/token",
                "https://openapi.naver.com/v1/nid/me",
            ),
        }
    }

    /// 인가 요청과 토큰 교환에 필요한 값(client id, redirect uri)이 모두 있는지 확인합니다.
    pub fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.redirect_uri.is_some()
    }
}

/// OAuth 공통 설정
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub google: ProviderCredentials,
    pub kakao: ProviderCredentials,
    pub naver: ProviderCredentials,
    /// CSRF 방지용 state 서명 비밀키
    pub state_secret: String,
    /// state 유효 시간 (초)
    pub state_max_age_secs: i64,
    /// 제공자 호출 타임아웃 (초). 타임아웃은 `NetworkError`로 처리됩니다.
    pub http_timeout_secs: u64,
}

impl OAuthConfig {
    pub fn from_source(source: &ConfigSource) -> Self {
        let state_secret = source.get("OAUTH_STATE_SECRET").unwrap_or_else(|| {
            log::warn!("OAUTH_STATE_SECRET not set, using default (not secure for production!)");
            "oauth-state-secret".to_string()
        });

        Self {
            google: ProviderCredentials::from_source(source, AuthProvider::Google),
            kakao: ProviderCredentials::from_source(source, AuthProvider::Kakao),
            naver: ProviderCredentials::from_source(source, AuthProvider::Naver),
            state_secret,
            state_max_age_secs: source.parse_or("OAUTH_STATE_MAX_AGE_SECS", 600i64),
            http_timeout_secs: source.parse_or("OAUTH_HTTP_TIMEOUT_SECS", 10u64),
        }
    }

    pub fn credentials(&self, provider: AuthProvider) -> &ProviderCredentials {
        match provider {
            AuthProvider::Google => &self.google,
            AuthProvider::Kakao => &self.kakao,
            AuthProvider::Naver => &self.naver,
        }
    }
}

/// JSON Web Token (JWT) 관련 설정
///
/// 서명 키가 없으면 토큰 발급 시 `SigningError`가 발생합니다.
/// 프로세스 시작 후에는 읽기 전용으로만 사용됩니다.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: Option<String>,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

impl JwtConfig {
    /// ```bash
    /// # 안전한 JWT 키 생성
    /// openssl rand -base64 32
    /// ```
    pub fn from_source(source: &ConfigSource) -> Self {
        let secret = source.get("JWT_SECRET");
        match &secret {
            None => log::warn!("JWT_SECRET not set, token issuance will fail"),
            Some(s) if s.len() < 32 => {
                log::warn!("JWT_SECRET is shorter than 256 bits (not secure for production!)")
            }
            _ => {}
        }

        Self {
            secret,
            access_token_ttl: Duration::milliseconds(
                source.parse_or("JWT_ACCESS_TOKEN_EXPIRATION_MS", DEFAULT_ACCESS_TOKEN_TTL_MS),
            ),
            refresh_token_ttl: Duration::milliseconds(
                source.parse_or("JWT_REFRESH_TOKEN_EXPIRATION_MS", DEFAULT_REFRESH_TOKEN_TTL_MS),
            ),
        }
    }

    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            access_token_ttl: Duration::milliseconds(DEFAULT_ACCESS_TOKEN_TTL_MS),
            refresh_token_ttl: Duration::milliseconds(DEFAULT_REFRESH_TOKEN_TTL_MS),
        }
    }
}

/// 리프레시 토큰 쿠키와 프론트엔드 리다이렉트 설정
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    pub cookie_path: String,
    /// 로그인 완료 후 돌아갈 프론트엔드 주소
    pub frontend_url: String,
    pub frontend_callback_path: String,
}

impl SessionConfig {
    pub fn from_source(source: &ConfigSource) -> Self {
        Self {
            cookie_name: source.string_or("REFRESH_COOKIE_NAME", "refresh_token"),
            cookie_secure: source.bool_or("REFRESH_COOKIE_SECURE", true),
            cookie_same_site: parse_same_site(&source.string_or("REFRESH_COOKIE_SAME_SITE", "lax")),
            cookie_path: source.string_or("REFRESH_COOKIE_PATH", "/"),
            frontend_url: source.string_or("FRONTEND_URL", "http://localhost:3000"),
            frontend_callback_path: source.string_or("FRONTEND_CALLBACK_PATH", "/login/callback"),
        }
    }

    pub fn frontend_callback_url(&self) -> String {
        format!(
            "{}{}",
            self.frontend_url.trim_end_matches('/'),
            self.frontend_callback_path
        )
    }
}

fn parse_same_site(value: &str) -> SameSite {
    match value.to_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        "lax" => SameSite::Lax,
        other => {
            log::error!("REFRESH_COOKIE_SAME_SITE 파싱 실패: '{}'. 기본값 lax 사용", other);
            SameSite::Lax
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_from_string() {
        assert_eq!("google".parse::<AuthProvider>().unwrap(), AuthProvider::Google);
        assert_eq!("kakao".parse::<AuthProvider>().unwrap(), AuthProvider::Kakao);
        assert_eq!("NAVER".parse::<AuthProvider>().unwrap(), AuthProvider::Naver);

        assert!("github".parse::<AuthProvider>().is_err());
        assert!("".parse::<AuthProvider>().is_err());
    }

    #[test]
    fn test_auth_provider_serialization() {
        let json = serde_json::to_string(&AuthProvider::Kakao).unwrap();
        assert_eq!(json, "\"kakao\"");

        let parsed: AuthProvider = serde_json::from_str("\"naver\"").unwrap();
        assert_eq!(parsed, AuthProvider::Naver);
    }

    #[test]
    fn test_provider_credentials_from_source() {
        let source = ConfigSource::from_pairs([
            ("KAKAO_CLIENT_ID", "kakao-id"),
            ("KAKAO_REDIRECT_URI", "http://localhost:8080/api/auth/kakao/callback"),
            ("KAKAO_TOKEN_URI", "http://127.0.0.1:9999/oauth/token"),
        ]);
        let kakao = ProviderCredentials::from_source(&source, AuthProvider::Kakao);
        let google = ProviderCredentials::from_source(&source, AuthProvider::Google);

        assert!(kakao.is_configured());
        assert!(kakao.client_secret.is_none());
        assert_eq!(kakao.token_uri, "http://127.0.0.1:9999/oauth/token");
        assert_eq!(kakao.auth_uri, "https://kauth.kakao.com/oauth/authorize");

        assert!(!google.is_configured());
    }

    #[test]
    fn test_jwt_defaults() {
        let source = ConfigSource::from_pairs([("JWT_SECRET", "0123456789abcdef0123456789abcdef")]);
        let jwt = JwtConfig::from_source(&source);

        assert_eq!(jwt.access_token_ttl.num_seconds(), 3600);
        assert_eq!(jwt.refresh_token_ttl.num_days(), 30);
    }

    #[test]
    fn test_session_config() {
        let source = ConfigSource::from_pairs([
            ("FRONTEND_URL", "http://localhost:3000/"),
            ("REFRESH_COOKIE_SAME_SITE", "strict"),
        ]);
        let session = SessionConfig::from_source(&source);

        assert_eq!(session.cookie_name, "refresh_token");
        assert!(session.cookie_secure);
        assert_eq!(session.cookie_same_site, SameSite::Strict);
        assert_eq!(session.frontend_callback_url(), "http://localhost:3000/login/callback");
    }
}
