//! # Session Bridge
//!
//! 로그인 결과를 클라이언트 쪽에 어떻게 보관할지 결정합니다.
//!
//! - 액세스 토큰: 프로세스 메모리에만 보관 (디스크 등 영구 저장소에 쓰지 않음)
//! - 리프레시 토큰: 인증 서비스의 `set-refresh-token` 엔드포인트를 통해 HttpOnly 쿠키로만 저장
//!
//! 리프레시 쿠키 저장이 성공한 뒤에만 액세스 토큰을 돌려주므로,
//! 쿠키 저장에 실패한 로그인은 성공으로 보고되지 않습니다.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::AuthProvider;
use crate::domain::models::token::TokenPair;
use crate::errors::{AppError, AppResult};
use crate::session::callback::extract_tokens_from_callback_url;

pub const MISSING_TOKENS_MESSAGE: &str = "토큰이 누락되었습니다.";
pub const COOKIE_WRITE_FAILED_MESSAGE: &str = "리프레시 토큰 저장에 실패했습니다.";

/// 리프레시 쿠키를 실제로 저장/삭제하는 쪽
#[async_trait]
pub trait SessionBackend: Send + Sync {
    async fn set_refresh_cookie(&self, refresh_token: &str) -> AppResult<()>;

    async fn clear_refresh_cookie(&self) -> AppResult<()>;

    /// 서버 쪽 로그아웃 처리
    async fn backend_logout(&self) -> AppResult<()>;
}

/// 인증 서비스(게이트웨이 경유)를 호출하는 백엔드
///
/// 응답의 `Set-Cookie`는 클라이언트의 쿠키 저장소에만 남고 호출자에게 노출되지 않습니다.
pub struct HttpSessionBackend {
    client: Client,
    base_url: String,
    provider: AuthProvider,
}

impl HttpSessionBackend {
    /// # Arguments
    ///
    /// * `base_url` - 인증 API 주소 (예: `http://localhost:8080/api/auth`)
    /// * `provider` - 로그인한 제공자
    /// * `timeout_secs` - 요청 타임아웃
    pub fn new(base_url: &str, provider: AuthProvider, timeout_secs: u64) -> AppResult<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            provider,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.provider, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder, action: &str) -> AppResult<()> {
        let response = request.send().await.map_err(|e| {
            log::error!("{} 요청 실패: {}", action, e);
            AppError::Network(format!("{} 요청 실패", action))
        })?;

        if !response.status().is_success() {
            return Err(AppError::CookieWrite(format!(
                "{} 응답 상태 {}",
                action,
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionBackend for HttpSessionBackend {
    async fn set_refresh_cookie(&self, refresh_token: &str) -> AppResult<()> {
        let request = self
            .client
            .post(self.endpoint("set-refresh-token"))
            .json(&json!({ "refreshToken": refresh_token }));
        self.send(request, "리프레시 쿠키 설정").await
    }

    async fn clear_refresh_cookie(&self) -> AppResult<()> {
        let request = self.client.delete(self.endpoint("set-refresh-token"));
        self.send(request, "리프레시 쿠키 삭제").await
    }

    async fn backend_logout(&self) -> AppResult<()> {
        let request = self.client.post(self.endpoint("logout"));
        self.send(request, "로그아웃").await
    }
}

/// `complete_login` 결과
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Success { access_token: String },
    Failure { error: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success { .. })
    }

    fn failure(error: &str) -> Self {
        LoginOutcome::Failure {
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTokenStatus {
    Missing,
    Valid,
    Expired,
}

/// 현재 클라이언트 인증 상태
///
/// 서버 세션 저장소 없이 메모리의 액세스 토큰 만료 시간만으로 판단합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: AccessTokenStatus,
    pub is_authenticated: bool,
}

pub struct SessionBridge<B: SessionBackend> {
    backend: B,
    access_token: RwLock<Option<String>>,
}

impl<B: SessionBackend> SessionBridge<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            access_token: RwLock::new(None),
        }
    }

    pub async fn set_refresh_cookie(&self, refresh_token: &str) -> AppResult<()> {
        self.backend.set_refresh_cookie(refresh_token).await
    }

    pub async fn clear_refresh_cookie(&self) -> AppResult<()> {
        self.backend.clear_refresh_cookie().await
    }

    /// 로그인 마무리
    ///
    /// 두 토큰이 모두 있어야 하며, 리프레시 쿠키 저장에 성공한 경우에만
    /// 액세스 토큰을 메모리에 보관하고 돌려줍니다.
    pub async fn complete_login(&self, pair: &TokenPair) -> LoginOutcome {
        if pair.access_token.trim().is_empty() || pair.refresh_token.trim().is_empty() {
            log::warn!("로그인 완료 실패: 토큰 누락");
            return LoginOutcome::failure(MISSING_TOKENS_MESSAGE);
        }

        if let Err(e) = self.backend.set_refresh_cookie(&pair.refresh_token).await {
            log::error!("리프레시 쿠키 저장 실패: {}", e);
            self.store_access_token(None);
            return LoginOutcome::failure(COOKIE_WRITE_FAILED_MESSAGE);
        }

        self.store_access_token(Some(pair.access_token.clone()));
        LoginOutcome::Success {
            access_token: pair.access_token.clone(),
        }
    }

    /// 콜백 URL에서 토큰을 꺼내 로그인을 마무리합니다.
    pub async fn complete_login_from_url(&self, callback_url: &str) -> LoginOutcome {
        match extract_tokens_from_callback_url(callback_url) {
            Some(pair) => self.complete_login(&pair).await,
            None => LoginOutcome::failure(MISSING_TOKENS_MESSAGE),
        }
    }

    /// 로그아웃
    ///
    /// 메모리의 액세스 토큰을 지우고 서버 로그아웃을 시도한 뒤 리프레시 쿠키를 삭제합니다.
    /// 서버 로그아웃 실패는 전체 결과에 영향을 주지 않습니다.
    pub async fn logout(&self) -> AppResult<()> {
        self.store_access_token(None);

        if let Err(e) = self.backend.backend_logout().await {
            log::warn!("서버 로그아웃 실패 (무시): {}", e);
        }

        self.backend.clear_refresh_cookie().await
    }

    pub fn access_token(&self) -> Option<String> {
        self.access_token
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn auth_session(&self) -> AuthSession {
        let status = match self.access_token() {
            None => AccessTokenStatus::Missing,
            Some(token) => match unverified_expiry(&token) {
                Some(exp) if exp > Utc::now().timestamp() => AccessTokenStatus::Valid,
                _ => AccessTokenStatus::Expired,
            },
        };

        AuthSession {
            access_token: status,
            is_authenticated: status == AccessTokenStatus::Valid,
        }
    }

    fn store_access_token(&self, token: Option<String>) {
        let mut guard = self
            .access_token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = token;
    }
}

#[derive(Deserialize)]
struct ExpiryOnly {
    exp: i64,
}

/// 서명 검증 없이 `exp`만 읽습니다. 클라이언트는 서명 키를 갖지 않으므로 표시용으로만 사용합니다.
fn unverified_expiry(token: &str) -> Option<i64> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<ExpiryOnly>(token, &DecodingKey::from_secret(&[]), &validation)
        .ok()
        .map(|data| data.claims.exp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use httpmock::prelude::*;

    use crate::config::JwtConfig;
    use crate::services::auth::TokenService;

    #[derive(Default)]
    struct RecordingBackend {
        fail_cookie: bool,
        fail_logout: bool,
        set_calls: AtomicUsize,
        clear_calls: AtomicUsize,
        logout_calls: AtomicUsize,
    }

    #[async_trait]
    impl SessionBackend for RecordingBackend {
        async fn set_refresh_cookie(&self, _refresh_token: &str) -> AppResult<()> {
            self.set_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_cookie {
                return Err(AppError::CookieWrite("storage unavailable".to_string()));
            }
            Ok(())
        }

        async fn clear_refresh_cookie(&self) -> AppResult<()> {
            self.clear_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn backend_logout(&self) -> AppResult<()> {
            self.logout_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_logout {
                return Err(AppError::Network("connection refused".to_string()));
            }
            Ok(())
        }
    }

    fn pair(access: &str, refresh: &str) -> TokenPair {
        TokenPair::bearer(access.to_string(), refresh.to_string(), 3600)
    }

    #[actix_web::test]
    async fn test_missing_access_token_skips_cookie_api() {
        let bridge = SessionBridge::new(RecordingBackend::default());

        let outcome = bridge.complete_login(&pair("", "x")).await;

        assert_eq!(
            outcome,
            LoginOutcome::Failure {
                error: "토큰이 누락되었습니다.".to_string()
            }
        );
        assert_eq!(bridge.backend.set_calls.load(Ordering::SeqCst), 0);
        assert!(bridge.access_token().is_none());
    }

    #[actix_web::test]
    async fn test_cookie_failure_does_not_expose_access_token() {
        let bridge = SessionBridge::new(RecordingBackend {
            fail_cookie: true,
            ..Default::default()
        });

        let outcome = bridge.complete_login(&pair("A", "B")).await;

        assert!(!outcome.is_success());
        assert!(bridge.access_token().is_none());
        assert!(!bridge.auth_session().is_authenticated);
    }

    #[actix_web::test]
    async fn test_successful_login_keeps_token_in_memory() {
        let tokens = TokenService::new(JwtConfig::with_secret("bridge-test-secret-bridge-test-secret"));
        let access = tokens
            .issue_access_token("4242", AuthProvider::Kakao, &serde_json::Map::new())
            .unwrap();
        let bridge = SessionBridge::new(RecordingBackend::default());

        let outcome = bridge
            .complete_login_from_url(&format!(
                "http://localhost:3000/login/callback#access_token={}&refresh_token=R",
                access
            ))
            .await;

        assert_eq!(outcome, LoginOutcome::Success { access_token: access.clone() });
        assert_eq!(bridge.access_token(), Some(access));
        assert_eq!(
            bridge.auth_session(),
            AuthSession {
                access_token: AccessTokenStatus::Valid,
                is_authenticated: true
            }
        );
    }

    #[actix_web::test]
    async fn test_logout_survives_backend_failure() {
        let bridge = SessionBridge::new(RecordingBackend {
            fail_logout: true,
            ..Default::default()
        });
        bridge.complete_login(&pair("A", "B")).await;

        assert!(bridge.logout().await.is_ok());
        assert_eq!(bridge.backend.logout_calls.load(Ordering::SeqCst), 1);
        assert_eq!(bridge.backend.clear_calls.load(Ordering::SeqCst), 1);
        assert_eq!(bridge.auth_session().access_token, AccessTokenStatus::Missing);
    }

    #[actix_web::test]
    async fn test_http_backend_posts_refresh_token() {
        let server = MockServer::start_async().await;
        let set_cookie = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/auth/kakao/set-refresh-token")
                    .json_body(serde_json::json!({ "refreshToken": "R" }));
                then.status(200)
                    .header("set-cookie", "refresh_token=R; HttpOnly; Path=/")
                    .header("content-type", "application/json")
                    .body(r#"{"success":true}"#);
            })
            .await;
        let failing = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/auth/kakao/set-refresh-token");
                then.status(500).body(r#"{"success":false,"message":"x"}"#);
            })
            .await;

        let backend =
            HttpSessionBackend::new(&server.url("/api/auth/"), AuthProvider::Kakao, 5).unwrap();

        assert!(backend.set_refresh_cookie("R").await.is_ok());
        set_cookie.assert_async().await;

        let cleared = backend.clear_refresh_cookie().await;
        failing.assert_async().await;
        assert!(matches!(cleared, Err(AppError::CookieWrite(_))));
    }
}
