use serde::{Deserialize, Serialize};

use crate::domain::models::identity::IdentityClaims;
use crate::domain::models::token::TokenPair;

/// 모든 엔드포인트 공통 에러 응답
///
/// ```json
/// { "success": false, "message": "...", "error": "invalid_grant", "error_description": "..." }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthUrlResponse {
    pub success: bool,
    pub auth_url: String,
}

impl AuthUrlResponse {
    pub fn new(auth_url: String) -> Self {
        Self { success: true, auth_url }
    }
}

/// 코드 교환 성공 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub success: bool,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: IdentityClaims,
}

impl TokenResponse {
    pub fn new(pair: TokenPair, user: IdentityClaims) -> Self {
        Self {
            success: true,
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
            user,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: IdentityClaims,
}

impl UserResponse {
    pub fn new(user: IdentityClaims) -> Self {
        Self { success: true, user }
    }
}

/// 리프레시로 재발급된 액세스 토큰 (리프레시 토큰은 쿠키에만 남습니다)
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true, message: None }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}
