//! # Configuration Module
//!
//! 인증 서비스와 게이트웨이의 설정을 담당하는 모듈입니다.
//! 설정은 시작 시 [`AppConfig::from_env`] / [`GatewayConfig::from_env`]로 한 번 만들어지고,
//! 각 컴포넌트에 생성자 인자로 전달됩니다. 전역 싱글톤이나 숨은 공유 상태는 없습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 설정 원천, 실행 환경, 서버 바인딩, Rate Limiting
//! - [`auth_config`] - OAuth 프로바이더, JWT, 리프레시 토큰 쿠키
//! - [`gateway_config`] - 라우트 규칙, CORS
//!
//! ## 환경 파일
//!
//! `PROFILE` 환경 변수에 따라 `.env.dev`, `.env.prod` 또는 `.env`가 먼저 로드됩니다.
//!
//! ```bash
//! PROFILE=dev cargo run --bin auth_service
//! PROFILE=prod cargo run --bin gateway
//! ```

pub mod data_config;
pub mod auth_config;
pub mod gateway_config;

pub use data_config::*;
pub use auth_config::*;
pub use gateway_config::*;

/// 인증 서비스 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub oauth: OAuthConfig,
    pub session: SessionConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_source(&ConfigSource::env())
    }

    pub fn from_source(source: &ConfigSource) -> Self {
        let config = Self {
            environment: Environment::from_source(source),
            server: ServerConfig::from_source(source, "", 8081),
            jwt: JwtConfig::from_source(source),
            oauth: OAuthConfig::from_source(source),
            session: SessionConfig::from_source(source),
            rate_limit: RateLimitConfig::from_source(source),
        };

        for provider in AuthProvider::ALL {
            if !config.oauth.credentials(provider).is_configured() {
                log::warn!(
                    "{} OAuth 자격 증명이 설정되지 않았습니다 ({}_CLIENT_ID / {}_REDIRECT_URI)",
                    provider,
                    provider.env_prefix(),
                    provider.env_prefix()
                );
            }
        }

        if config.environment.is_production() && !config.session.cookie_secure {
            log::warn!("운영 환경에서 REFRESH_COOKIE_SECURE=false 로 설정되어 있습니다");
        }

        config
    }
}

/// `PROFILE` 환경 변수에 맞는 .env 파일을 로드합니다.
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
pub fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    log::info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => log::info!(".env.prod 파일 로드 됨"),
            Err(e) => log::error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => log::info!(".env.dev 파일 로드 됨"),
            Err(e) => log::error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv::dotenv().ok();
            log::info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=labzang_auth::services=debug cargo run --bin auth_service
/// ```
pub fn init_logging() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info,actix_web=info"));
}
