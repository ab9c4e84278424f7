//! Naver 로그인
//!
//! 토큰 요청에도 인가 요청 때 보낸 `state`를 함께 보내야 합니다.
//! 토큰/프로필 엔드포인트 모두 실패를 HTTP 200 본문으로 알려줄 수 있습니다.

use async_trait::async_trait;

use crate::config::AuthProvider;
use crate::domain::models::identity::IdentityClaims;
use crate::domain::models::oauth::{NaverUserEnvelope, ProviderToken};
use crate::errors::{AppError, AppResult};
use crate::services::oauth::http::ProviderHttp;
use crate::services::oauth::provider::OAuthProvider;

pub struct NaverProvider {
    http: ProviderHttp,
}

impl NaverProvider {
    pub fn new(http: ProviderHttp) -> Self {
        Self { http }
    }
}

#[async_trait]
impl OAuthProvider for NaverProvider {
    fn kind(&self) -> AuthProvider {
        AuthProvider::Naver
    }

    fn authorization_url(&self, redirect_uri: Option<&str>, state: &str) -> AppResult<String> {
        self.http.authorization_url(redirect_uri, state, &[])
    }

    async fn exchange_code(&self, code: &str, state: Option<&str>) -> AppResult<ProviderToken> {
        let state = state.ok_or_else(|| {
            AppError::Validation("네이버 로그인에는 state 값이 필요합니다".to_string())
        })?;

        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.http.client_id()?),
            ("client_secret", self.http.client_secret()?),
            ("code", code),
            ("state", state),
        ];

        self.http.exchange_token(&params).await
    }

    async fn fetch_profile(&self, access_token: &str) -> AppResult<IdentityClaims> {
        let envelope: NaverUserEnvelope = self.http.fetch_json(access_token).await?;
        let user = envelope
            .into_user()
            .map_err(|reason| AppError::ProfileFetch(format!("naver 사용자 정보 조회 실패: {}", reason)))?;
        Ok(user.into())
    }
}
