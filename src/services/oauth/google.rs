//! Google OAuth 2.0
//!
//! ```text
//! GET  https://accounts.google.com/o/oauth2/v2/auth?scope=openid%20email%20profile&...
//! POST https://oauth2.googleapis.com/token   (client_secret 필수)
//! GET  https://www.googleapis.com/oauth2/v2/userinfo
//! ```

use async_trait::async_trait;

use crate::config::AuthProvider;
use crate::domain::models::identity::IdentityClaims;
use crate::domain::models::oauth::{GoogleUserInfo, ProviderToken};
use crate::errors::AppResult;
use crate::services::oauth::http::ProviderHttp;
use crate::services::oauth::provider::OAuthProvider;

const GOOGLE_SCOPES: &str = "openid email profile";

pub struct GoogleProvider {
    http: ProviderHttp,
}

impl GoogleProvider {
    pub fn new(http: ProviderHttp) -> Self {
        Self { http }
    }
}

#[async_trait]
impl OAuthProvider for GoogleProvider {
    fn kind(&self) -> AuthProvider {
        AuthProvider::Google
    }

    fn authorization_url(&self, redirect_uri: Option<&str>, state: &str) -> AppResult<String> {
        self.http.authorization_url(
            redirect_uri,
            state,
            &[("scope", GOOGLE_SCOPES), ("access_type", "online")],
        )
    }

    async fn exchange_code(&self, code: &str, _state: Option<&str>) -> AppResult<ProviderToken> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.http.client_id()?),
            ("client_secret", self.http.client_secret()?),
            ("redirect_uri", self.http.redirect_uri(None)?),
        ];

        self.http.exchange_token(&params).await
    }

    async fn fetch_profile(&self, access_token: &str) -> AppResult<IdentityClaims> {
        let info: GoogleUserInfo = self.http.fetch_json(access_token).await?;
        Ok(info.into())
    }
}
