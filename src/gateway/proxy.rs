//! 업스트림 프록시
//!
//! 라우터가 정한 업스트림으로 요청을 그대로 전달하고 응답을 돌려줍니다.
//! 리다이렉트는 따라가지 않고 클라이언트에게 그대로 전달합니다 (OAuth 콜백 302).

use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use reqwest::redirect::Policy;
use reqwest::Client;

use crate::config::GatewayConfig;
use crate::errors::{AppError, AppResult};
use crate::gateway::router::GatewayRouter;

/// 프록시가 전달하지 않는 hop-by-hop 헤더
const HOP_BY_HOP_HEADERS: [&str; 10] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
    "content-length",
];

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS.contains(&name)
}

/// 게이트웨이 공유 상태 (시작 후 읽기 전용)
pub struct GatewayState {
    pub router: GatewayRouter,
    client: Client,
}

impl GatewayState {
    pub fn from_config(config: &GatewayConfig) -> AppResult<Self> {
        let router = GatewayRouter::from_config(&config.routes)?;
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { router, client })
    }
}

/// 라우팅되지 않은 모든 요청을 처리하는 기본 서비스
///
/// # Errors
///
/// * `AppError::NoRoute` - 맞는 라우트가 없음 (404)
/// * `AppError::Network` - 업스트림 연결 실패 또는 타임아웃
pub async fn proxy(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<GatewayState>,
) -> AppResult<HttpResponse> {
    let routed = state.router.route(req.path())?;
    let target = routed.target_url(req.query_string());

    let method = reqwest::Method::from_bytes(req.method().as_str().as_bytes())
        .map_err(|e| AppError::Internal(format!("지원하지 않는 메서드: {}", e)))?;

    let mut upstream = state.client.request(method, &target);
    for (name, value) in req.headers() {
        if is_hop_by_hop(name.as_str()) {
            continue;
        }
        upstream = upstream.header(name.as_str(), value.as_bytes());
    }

    let conn = req.connection_info().clone();
    if let Some(addr) = conn.realip_remote_addr() {
        upstream = upstream.header("x-forwarded-for", addr);
    }
    upstream = upstream
        .header("x-forwarded-host", conn.host())
        .header("x-forwarded-proto", conn.scheme());

    if !body.is_empty() {
        upstream = upstream.body(body.to_vec());
    }

    let response = upstream.send().await.map_err(|e| {
        log::error!("업스트림 호출 실패 ({}): {}", routed.route_id, e);
        AppError::Network(format!("{} 업스트림 호출 실패", routed.route_id))
    })?;

    let status = StatusCode::from_u16(response.status().as_u16())
        .map_err(|e| AppError::Internal(format!("업스트림 상태 코드 오류: {}", e)))?;

    let mut builder = HttpResponse::build(status);
    for (name, value) in response.headers() {
        let name = name.as_str();
        // CORS 헤더는 게이트웨이 필터가 결정합니다
        if is_hop_by_hop(name) || name.starts_with("access-control-") {
            continue;
        }
        builder.append_header((name, value.as_bytes()));
    }

    let bytes = response.bytes().await.map_err(|e| {
        log::error!("업스트림 응답 수신 실패 ({}): {}", routed.route_id, e);
        AppError::Network(format!("{} 업스트림 응답 수신 실패", routed.route_id))
    })?;

    Ok(builder.body(bytes))
}
