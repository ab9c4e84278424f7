//! 인증 서비스 라우트 구성

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::errors::AppError;
use crate::handlers;

/// 모든 라우트를 설정합니다
///
/// 인증 라우트는 루트에 마운트됩니다. 게이트웨이가 `/api/auth` 접두사를 떼고 전달하기 때문입니다.
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let state = AppState::from_config(&config)?;
/// let app = App::new()
///     .configure(|cfg| state.register(cfg))
///     .configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // 잘못된 JSON 본문도 공통 에러 본문(400)으로 응답
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    );

    // Health check endpoint
    cfg.service(health_check);

    configure_auth_routes(cfg);

    cfg.default_service(web::to(not_found));
}

/// 소셜 로그인 라우트
///
/// ```bash
/// # 카카오 인가 URL
/// curl http://localhost:8081/kakao/auth-url
///
/// # 인가 코드 교환
/// curl -X POST http://localhost:8081/kakao/token \
///   -H "Content-Type: application/json" \
///   -d '{"code":"..."}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::auth_url)
        .service(handlers::auth::callback)
        .service(handlers::auth::token)
        .service(handlers::auth::user)
        .service(handlers::auth::set_refresh_token)
        .service(handlers::auth::clear_refresh_token)
        .service(handlers::auth::refresh)
        .service(handlers::auth::logout);
}

async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::NoRoute(req.path().to_string()))
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8081/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "labzang_auth_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
