//! 랩장 인증 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동합니다.
//! 설정을 읽어 토큰 서비스, OAuth 클라이언트, 쿠키 팩토리를 만들고 인증 API를 제공합니다.

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware, App, HttpServer};
use log::{error, info};

use labzang_auth::config::{self, AppConfig};
use labzang_auth::routes::configure_all_routes;
use labzang_auth::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    config::load_env_file();
    config::init_logging();

    info!("🚀 랩장 인증 서비스 시작중...");

    let config = AppConfig::from_env();
    let state = AppState::from_config(&config).map_err(|e| {
        error!("❌ 서비스 초기화 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(config, state).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS는 게이트웨이가 담당하므로 여기서는 Rate Limiting, 로깅, 경로 정규화만 적용합니다.
///
/// # Errors
///
/// * `std::io::Error` - Rate Limiting 설정 오류, 포트 바인딩 실패 또는 서버 실행 오류
///
/// # Examples
///
/// ```rust,ignore
/// // 서버는 0.0.0.0:8081에서 실행됩니다
/// // Health check: http://127.0.0.1:8081/health
/// // 인가 URL: http://127.0.0.1:8081/kakao/auth-url
/// ```
async fn start_http_server(config: AppConfig, state: AppState) -> std::io::Result<()> {
    let bind_address = config.server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(config.rate_limit.per_second)
        .burst_size(config.rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        config.rate_limit.per_second, config.rate_limit.burst_size
    );

    HttpServer::new(move || {
        let state = state.clone();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(|cfg| state.register(cfg))
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(4)
    .run()
    .await
}
