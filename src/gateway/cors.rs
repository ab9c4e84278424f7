//! 게이트웨이 CORS 필터
//!
//! 허용된 Origin만 통과시키고 자격 증명(쿠키)을 허용합니다. 허용되지 않은 Origin의 요청은
//! 라우팅 전에 필터에서 거부됩니다.

use actix_cors::Cors;
use actix_web::http::header;

use crate::config::CorsConfig;

/// CORS 미들웨어 구성
///
/// # Examples
///
/// ```rust,ignore
/// let cors = build_cors(&config.cors);
/// App::new().wrap(cors)
/// ```
pub fn build_cors(config: &CorsConfig) -> Cors {
    let cors = config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors
        // 허용할 HTTP 메서드
        .allowed_methods(config.allowed_methods.iter().map(String::as_str))
        // 허용할 헤더
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        // 자격 증명(쿠키 등) 지원
        .supports_credentials()
        .block_on_origin_mismatch(true)
        // Preflight 요청 캐시 시간 (초)
        .max_age(config.max_age_secs)
}
