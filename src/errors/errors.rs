//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 모든 실패를 하나의 응답 형식으로 변환합니다.
//!
//! ```json
//! { "success": false, "message": "...", "error": "invalid_grant", "error_description": "..." }
//! ```
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status |
//! |----------|-------------|
//! | `Validation`, `InvalidGrant` | 400 Bad Request |
//! | `Token`, `Unauthorized` | 401 Unauthorized |
//! | `NoRoute` | 404 Not Found |
//! | 나머지 | 500 Internal Server Error |
//!
//! 제공자 응답 본문이나 내부 에러 원문은 로그에만 남기고 응답에는 포함하지 않습니다.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::domain::dto::ErrorBody;

/// JWT 검증 실패 원인
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("토큰이 만료되었습니다")]
    Expired,

    #[error("토큰 형식이 올바르지 않습니다")]
    Malformed,

    #[error("토큰 서명이 유효하지 않습니다")]
    BadSignature,

    /// 액세스 토큰 자리에 리프레시 토큰이 오는 등 용도가 다른 토큰
    #[error("토큰 용도가 올바르지 않습니다")]
    WrongType,

    #[error("서명 키가 설정되지 않았습니다")]
    KeyUnavailable,
}

impl TokenError {
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Expired => "token_expired",
            TokenError::Malformed => "token_malformed",
            TokenError::BadSignature => "token_bad_signature",
            TokenError::WrongType => "token_wrong_type",
            TokenError::KeyUnavailable => "signing_key_unavailable",
        }
    }
}

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 제공자 자격 증명 등 필수 설정 누락
    #[error("설정 오류: {0}")]
    Config(String),

    /// 제공자/백엔드와의 전송 실패 (타임아웃 포함). 서버에서 재시도하지 않습니다.
    #[error("네트워크 오류: {0}")]
    Network(String),

    /// 만료되었거나 이미 사용된 인가 코드. 사용자가 로그인을 다시 시작해야 합니다.
    #[error("인가 코드가 유효하지 않습니다: {description}")]
    InvalidGrant {
        error: String,
        description: String,
    },

    #[error("사용자 정보 조회 실패: {0}")]
    ProfileFetch(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("인증이 필요합니다: {0}")]
    Unauthorized(String),

    #[error("일치하는 라우트가 없습니다: {0}")]
    NoRoute(String),

    /// 리프레시 토큰 쿠키 저장 실패. 로그인 성공으로 보고해서는 안 됩니다.
    #[error("리프레시 토큰 쿠키 저장 실패: {0}")]
    CookieWrite(String),

    #[error("토큰 서명 실패: {0}")]
    Signing(String),

    #[error("입력값 오류: {0}")]
    Validation(String),

    #[error("내부 서버 오류: {0}")]
    Internal(String),
}

impl AppError {
    /// 응답 본문의 `error` 필드에 들어갈 기계 판독용 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::Network(_) => "network_error",
            AppError::InvalidGrant { .. } => "invalid_grant",
            AppError::ProfileFetch(_) => "profile_fetch_error",
            AppError::Token(e) => e.code(),
            AppError::Unauthorized(_) => "unauthorized",
            AppError::NoRoute(_) => "no_route",
            AppError::CookieWrite(_) => "cookie_write_error",
            AppError::Signing(_) => "signing_error",
            AppError::Validation(_) => "invalid_request",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// 사용자에게 보여줄 메시지
    ///
    /// 내부 원인(제공자 응답, 라이브러리 에러 문자열)은 포함하지 않습니다.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(msg) => msg.clone(),
            AppError::Network(_) => "인증 서버와 통신하지 못했습니다. 잠시 후 다시 시도해주세요.".to_string(),
            AppError::InvalidGrant { .. } => {
                "인가 코드가 만료되었거나 이미 사용되었습니다. 다시 로그인해주세요.".to_string()
            }
            AppError::ProfileFetch(_) => "사용자 정보를 가져오지 못했습니다.".to_string(),
            AppError::Token(e) => e.to_string(),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::NoRoute(_) => "요청한 경로를 찾을 수 없습니다.".to_string(),
            AppError::CookieWrite(_) => "리프레시 토큰 저장에 실패했습니다.".to_string(),
            AppError::Signing(_) => "토큰을 발급하지 못했습니다.".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Internal(_) => "서버 내부 오류가 발생했습니다.".to_string(),
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        let error_description = match self {
            AppError::InvalidGrant { description, .. } => Some(description.clone()),
            _ => None,
        };

        ErrorBody {
            success: false,
            message: self.user_message(),
            error: Some(self.code().to_string()),
            error_description,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidGrant { .. } => StatusCode::BAD_REQUEST,
            AppError::Token(TokenError::KeyUnavailable) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Token(_) | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NoRoute(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        HttpResponse::build(status).json(self.to_body())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("code가 필요합니다".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidGrant {
                error: "invalid_grant".to_string(),
                description: "already used".to_string()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::from(TokenError::Expired).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NoRoute("/unmapped".to_string()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::CookieWrite("io".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Network("timeout".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_body_hides_internal_detail() {
        let error = AppError::Network("connect error: 10.0.0.3:443 refused".to_string());
        let body = error.to_body();

        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("network_error"));
        assert!(!body.message.contains("10.0.0.3"));
        assert!(body.error_description.is_none());
    }

    #[test]
    fn test_invalid_grant_carries_description() {
        let body = AppError::InvalidGrant {
            error: "invalid_grant".to_string(),
            description: "authorization code not found".to_string(),
        }
        .to_body();

        assert_eq!(body.error.as_deref(), Some("invalid_grant"));
        assert_eq!(body.error_description.as_deref(), Some("authorization code not found"));
    }

    #[actix_web::test]
    async fn test_error_response_is_uniform_json() {
        let response = AppError::from(TokenError::BadSignature).error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "token_bad_signature");
        assert!(json["message"].is_string());
        assert!(json.get("error_description").is_none());
    }
}
