//! 인증 요청 관련 DTO
//!
//! 프론트엔드와 제공자 콜백에서 들어오는 요청 정보를 매핑합니다.
use serde::Deserialize;
use validator::Validate;

/// OAuth 콜백 쿼리 파라미터
///
/// 사용자가 동의를 거부하면 `code` 대신 `error`가 채워져 돌아옵니다.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// 인가 코드를 토큰으로 교환하는 요청 (`POST /{provider}/token`)
#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(length(min = 1, message = "Authorization code가 필요합니다"))]
    pub code: String,

    /// 인가 URL 발급 시 받은 state (네이버는 토큰 요청에도 필요)
    #[serde(default)]
    pub state: Option<String>,
}

/// 리프레시 토큰 쿠키 설정 요청
#[derive(Debug, Deserialize, Validate)]
pub struct SetRefreshTokenRequest {
    #[serde(rename = "refreshToken", alias = "refresh_token")]
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,
}
