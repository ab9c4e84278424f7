//! 랩장 API 게이트웨이
//!
//! 브라우저 요청의 CORS를 검사하고 `/api/auth/**` 요청을 인증 서비스로 전달합니다.

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware, web, App, HttpServer};
use log::{error, info};

use labzang_auth::config::{self, GatewayConfig};
use labzang_auth::gateway::{build_cors, configure_gateway_routes, GatewayState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    config::load_env_file();
    config::init_logging();

    info!("🚀 랩장 게이트웨이 시작중...");

    let config = GatewayConfig::from_env();
    let state = GatewayState::from_config(&config).map_err(|e| {
        error!("❌ 게이트웨이 초기화 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    let state = web::Data::new(state);

    for rule in &config.routes {
        info!("🔀 라우트 {}: {} → {}", rule.id, rule.pattern, rule.upstream);
    }

    let bind_address = config.server.bind_address();
    info!("🌐 게이트웨이가 http://{} 에서 실행중입니다", bind_address);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(config.rate_limit.per_second)
        .burst_size(config.rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    let cors_config = config.cors.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            // CORS는 프록시보다 먼저 판단해야 하므로 로거 안쪽에 둡니다
            .wrap(build_cors(&cors_config))
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_gateway_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}
