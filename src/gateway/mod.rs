//! # API Gateway
//!
//! ```text
//! Browser ──▶ CORS 필터 ──▶ GatewayRouter ──▶ proxy ──▶ upstream
//!                 │               │
//!                 ▼               ▼
//!           Origin 거부      NoRoute (404)
//! ```

pub mod cors;
pub mod proxy;
pub mod route;
pub mod router;

use actix_web::web;
use serde_json::json;

pub use cors::build_cors;
pub use proxy::{proxy, GatewayState};
pub use route::RouteRule;
pub use router::{GatewayRouter, RoutedRequest};

/// 게이트웨이 라우트 설정
///
/// `/health` 외의 모든 요청은 라우트 규칙에 따라 업스트림으로 전달됩니다.
pub fn configure_gateway_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check).default_service(web::to(proxy));
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "labzang_gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
