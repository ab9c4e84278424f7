use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;

use crate::config::AuthProvider;
use crate::domain::models::identity::IdentityClaims;
use crate::domain::models::token::TokenClaims;
use crate::errors::AppError;

/// 검증된 액세스 토큰에서 추출된 사용자 정보
///
/// `AuthMiddleware`가 요청 extensions에 넣어 두면 핸들러 인자로 꺼내 쓸 수 있습니다.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    /// 제공자 기준 사용자 ID (`sub`)
    pub subject_id: String,

    /// 인증 제공자
    pub provider: AuthProvider,

    #[serde(skip)]
    pub claims: TokenClaims,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            subject_id: claims.sub.clone(),
            provider: claims.provider,
            claims,
        }
    }

    /// 토큰에 실린 프로필 클레임
    pub fn identity(&self) -> IdentityClaims {
        IdentityClaims::from_token_claims(&self.claims)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::Unauthorized(
                "인증되지 않은 요청입니다".to_string(),
            ))),
        }
    }
}
