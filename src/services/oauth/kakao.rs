//! Kakao 로그인
//!
//! client_secret은 콘솔에서 "Client Secret 사용"을 켠 앱에서만 보냅니다.
//! 이미 사용된 코드는 `KOE320` 에러 코드와 함께 `invalid_grant`로 거부됩니다.

use async_trait::async_trait;

use crate::config::AuthProvider;
use crate::domain::models::identity::IdentityClaims;
use crate::domain::models::oauth::{KakaoUserInfo, ProviderToken};
use crate::errors::AppResult;
use crate::services::oauth::http::ProviderHttp;
use crate::services::oauth::provider::OAuthProvider;

pub struct KakaoProvider {
    http: ProviderHttp,
}

impl KakaoProvider {
    pub fn new(http: ProviderHttp) -> Self {
        Self { http }
    }
}

#[async_trait]
impl OAuthProvider for KakaoProvider {
    fn kind(&self) -> AuthProvider {
        AuthProvider::Kakao
    }

    fn authorization_url(&self, redirect_uri: Option<&str>, state: &str) -> AppResult<String> {
        self.http.authorization_url(redirect_uri, state, &[])
    }

    async fn exchange_code(&self, code: &str, _state: Option<&str>) -> AppResult<ProviderToken> {
        let mut params = vec![
            ("grant_type", "authorization_code"),
            ("client_id", self.http.client_id()?),
            ("redirect_uri", self.http.redirect_uri(None)?),
            ("code", code),
        ];
        if let Some(secret) = self.http.optional_client_secret() {
            params.push(("client_secret", secret));
        }

        self.http.exchange_token(&params).await
    }

    async fn fetch_profile(&self, access_token: &str) -> AppResult<IdentityClaims> {
        let info: KakaoUserInfo = self.http.fetch_json(access_token).await?;
        Ok(info.into())
    }
}
