//! # OAuth Exchange Client
//!
//! 제공자별 구현([`OAuthProvider`])을 하나로 묶어 로그인 흐름을 진행합니다.
//!
//! ```text
//! Frontend            Auth Service (OAuthClient)             Provider
//!    │  GET /{p}/auth-url    │                                   │
//!    │──────────────────────▶│ state 서명, 인가 URL 생성          │
//!    │◀──────────────────────│                                   │
//!    │  사용자 동의 ──────────────────────────────────────────────▶│
//!    │  GET /{p}/callback?code&state                             │
//!    │──────────────────────▶│ state 검증                        │
//!    │                       │ POST token (code) ───────────────▶│
//!    │                       │ GET userinfo (bearer) ───────────▶│
//!    │◀──────────────────────│ IdentityClaims                    │
//! ```
//!
//! 로그인 시도마다 [`LoginAttempt`]가 단계 순서를 검사하며, 한 단계라도 실패하면
//! 그 시도는 `Failed`로 끝납니다. 서버 쪽 재시도는 없습니다.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{AuthProvider, OAuthConfig};
use crate::domain::models::identity::IdentityClaims;
use crate::domain::models::login::{LoginAttempt, LoginState};
use crate::domain::models::oauth::ProviderToken;
use crate::errors::{AppError, AppResult};
use crate::services::auth::OAuthStateSigner;
use crate::services::oauth::google::GoogleProvider;
use crate::services::oauth::http::{build_http_client, ProviderHttp};
use crate::services::oauth::kakao::KakaoProvider;
use crate::services::oauth::naver::NaverProvider;
use crate::services::oauth::provider::OAuthProvider;

#[derive(Clone)]
pub struct OAuthClient {
    providers: HashMap<AuthProvider, Arc<dyn OAuthProvider>>,
    state_signer: OAuthStateSigner,
}

impl OAuthClient {
    pub fn new(state_signer: OAuthStateSigner) -> Self {
        Self {
            providers: HashMap::new(),
            state_signer,
        }
    }

    /// 세 제공자를 모두 등록합니다. 자격 증명이 없는 제공자도 등록되며 호출 시 `ConfigError`가 납니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Internal` - HTTP 클라이언트를 만들 수 없는 경우
    pub fn from_config(config: &OAuthConfig) -> AppResult<Self> {
        let client = build_http_client(config.http_timeout_secs)?;
        let signer = OAuthStateSigner::new(config.state_secret.clone(), config.state_max_age_secs);

        Ok(Self::new(signer)
            .with_provider(Arc::new(GoogleProvider::new(ProviderHttp::new(
                config.google.clone(),
                client.clone(),
            ))))
            .with_provider(Arc::new(KakaoProvider::new(ProviderHttp::new(
                config.kakao.clone(),
                client.clone(),
            ))))
            .with_provider(Arc::new(NaverProvider::new(ProviderHttp::new(
                config.naver.clone(),
                client,
            )))))
    }

    pub fn with_provider(mut self, provider: Arc<dyn OAuthProvider>) -> Self {
        self.providers.insert(provider.kind(), provider);
        self
    }

    fn provider(&self, kind: AuthProvider) -> AppResult<&Arc<dyn OAuthProvider>> {
        self.providers
            .get(&kind)
            .ok_or_else(|| AppError::Config(format!("{} 로그인이 지원되지 않습니다", kind.display_name())))
    }

    /// 인가 URL 생성
    ///
    /// 매번 새 서명된 state를 만들어 URL에 담습니다.
    ///
    /// # Arguments
    ///
    /// * `kind` - 인증 제공자
    /// * `redirect_uri` - 설정값 대신 사용할 redirect URI (없으면 설정값)
    ///
    /// # Errors
    ///
    /// * `AppError::Config` - 제공자 자격 증명이 설정되지 않은 경우
    pub fn get_authorization_url(
        &self,
        kind: AuthProvider,
        redirect_uri: Option<&str>,
    ) -> AppResult<String> {
        let mut attempt = LoginAttempt::new(kind);
        attempt.advance(LoginState::AuthUrlRequested)?;

        let result = self.state_signer.generate().and_then(|state| {
            self.provider(kind)
                .and_then(|provider| provider.authorization_url(redirect_uri, &state))
        });
        let url = attempt.step(LoginState::RedirectedToProvider, result)?;

        log::info!("🔗 {} 인가 URL 발급", kind);
        Ok(url)
    }

    /// 콜백으로 돌아온 state 검증
    pub fn verify_state(&self, state: &str) -> AppResult<()> {
        self.state_signer.verify(state)
    }

    /// 인가 코드를 제공자 토큰으로 교환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidGrant` - 만료되었거나 이미 사용된 코드
    /// * `AppError::Network` - 전송 실패 또는 타임아웃
    /// * `AppError::Config` - 자격 증명 누락
    pub async fn exchange_code(
        &self,
        kind: AuthProvider,
        code: &str,
        state: Option<&str>,
    ) -> AppResult<ProviderToken> {
        self.provider(kind)?.exchange_code(code, state).await
    }

    /// 제공자 액세스 토큰으로 사용자 정보를 조회합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ProfileFetch` - 전송 실패, 타임아웃, 실패 응답 또는 응답 형식 오류
    /// * `AppError::Config` - 지원하지 않는 제공자
    pub async fn fetch_profile(
        &self,
        kind: AuthProvider,
        provider_access_token: &str,
    ) -> AppResult<IdentityClaims> {
        self.provider(kind)?.fetch_profile(provider_access_token).await
    }

    /// 콜백 이후 단계를 순서대로 진행합니다: state 검증 → 코드 교환 → 프로필 조회.
    ///
    /// state가 있으면 반드시 검증합니다. 제공자 콜백(`GET /callback`)은 state 없이 이 함수를
    /// 부르지 않으며, state 없이 호출되는 것은 프론트엔드가 코드만 전달하는 `POST /token` 경로뿐입니다.
    pub async fn complete_callback(
        &self,
        kind: AuthProvider,
        code: &str,
        state: Option<&str>,
    ) -> AppResult<IdentityClaims> {
        let mut attempt = LoginAttempt::from_callback(kind);

        if let Some(state) = state {
            if let Err(e) = self.verify_state(state) {
                attempt.fail(e.to_string());
                return Err(e);
            }
        }

        let exchanged = self.exchange_code(kind, code, state).await;
        let token = attempt.step(LoginState::TokenExchanged, exchanged)?;

        let fetched = self.fetch_profile(kind, &token.access_token).await;
        let identity = attempt.step(LoginState::ProfileFetched, fetched)?;

        attempt.advance(LoginState::Complete)?;
        log::info!("✅ {} 로그인 완료: subject={}", kind, identity.subject_id);
        Ok(identity)
    }
}
