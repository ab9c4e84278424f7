//! 제공자 HTTP 호출 공통 처리
//!
//! 모든 제공자 호출은 명시적인 타임아웃을 가지며 서버 쪽에서 재시도하지 않습니다.
//! 토큰 교환의 전송 실패는 `AppError::Network`, 사용자 정보 조회의 실패는 원인과 상관없이
//! `AppError::ProfileFetch`로 변환됩니다.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{AuthProvider, ProviderCredentials};
use crate::domain::models::oauth::{ProviderErrorBody, ProviderToken, TokenEndpointResponse};
use crate::errors::{AppError, AppResult};

/// 제공자 자격 증명이 잘못되었음을 뜻하는 에러 코드
const CLIENT_ERROR_CODES: [&str; 2] = ["invalid_client", "unauthorized_client"];

pub fn build_http_client(timeout_secs: u64) -> AppResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| AppError::Internal(format!("HTTP 클라이언트 생성 실패: {}", e)))
}

/// 한 제공자의 자격 증명과 HTTP 클라이언트
#[derive(Clone)]
pub struct ProviderHttp {
    credentials: ProviderCredentials,
    client: Client,
}

impl ProviderHttp {
    pub fn new(credentials: ProviderCredentials, client: Client) -> Self {
        Self { credentials, client }
    }

    pub fn provider(&self) -> AuthProvider {
        self.credentials.provider
    }

    pub fn client_id(&self) -> AppResult<&str> {
        self.credentials
            .client_id
            .as_deref()
            .ok_or_else(|| self.missing("CLIENT_ID"))
    }

    pub fn client_secret(&self) -> AppResult<&str> {
        self.credentials
            .client_secret
            .as_deref()
            .ok_or_else(|| self.missing("CLIENT_SECRET"))
    }

    pub fn optional_client_secret(&self) -> Option<&str> {
        self.credentials.client_secret.as_deref()
    }

    /// 호출자가 넘긴 값이 있으면 그것을, 없으면 설정된 redirect URI를 사용합니다.
    pub fn redirect_uri<'a>(&'a self, redirect_override: Option<&'a str>) -> AppResult<&'a str> {
        redirect_override
            .filter(|uri| !uri.is_empty())
            .or(self.credentials.redirect_uri.as_deref())
            .ok_or_else(|| self.missing("REDIRECT_URI"))
    }

    fn missing(&self, key: &str) -> AppError {
        AppError::Config(format!(
            "{} 로그인 설정이 없습니다 ({}_{})",
            self.provider().display_name(),
            self.provider().env_prefix(),
            key
        ))
    }

    /// 인가 엔드포인트 URL 생성
    ///
    /// `client_id`, `redirect_uri`, `response_type=code`, `state` 뒤에 제공자별 매개변수를 붙입니다.
    pub fn authorization_url(
        &self,
        redirect_override: Option<&str>,
        state: &str,
        extra: &[(&str, &str)],
    ) -> AppResult<String> {
        let mut params = vec![
            ("client_id", self.client_id()?),
            ("redirect_uri", self.redirect_uri(redirect_override)?),
            ("response_type", "code"),
            ("state", state),
        ];
        params.extend_from_slice(extra);

        let url = Url::parse_with_params(&self.credentials.auth_uri, &params).map_err(|e| {
            AppError::Config(format!(
                "{} 인가 URL이 올바르지 않습니다: {}",
                self.provider(),
                e
            ))
        })?;

        Ok(url.to_string())
    }

    /// 토큰 엔드포인트에 form 요청을 보내고 응답을 해석합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Network` - 전송 실패, 타임아웃, 제공자 5xx
    /// * `AppError::Config` - `invalid_client` 등 자격 증명 문제
    /// * `AppError::InvalidGrant` - 만료/재사용/잘못된 코드 (HTTP 200 에러 본문 포함)
    pub async fn exchange_token(&self, params: &[(&str, &str)]) -> AppResult<ProviderToken> {
        let provider = self.provider();
        let response = self
            .client
            .post(&self.credentials.token_uri)
            .form(params)
            .send()
            .await
            .map_err(|e| transport_error(provider, "토큰 요청", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(provider, "토큰 응답 수신", e))?;

        if status.is_server_error() {
            log::error!("{} 토큰 엔드포인트 오류: status={} body={}", provider, status, body);
            return Err(AppError::Network(format!(
                "{} 토큰 엔드포인트가 {}를 반환했습니다",
                provider, status
            )));
        }

        match serde_json::from_str::<TokenEndpointResponse>(&body) {
            Ok(TokenEndpointResponse::Success(token)) if status.is_success() => Ok(token),
            Ok(TokenEndpointResponse::Error(err)) => Err(classify_token_error(provider, err)),
            Ok(TokenEndpointResponse::Success(_)) | Err(_) if status.is_client_error() => {
                log::warn!("{} 토큰 교환 거부: status={} body={}", provider, status, body);
                Err(AppError::InvalidGrant {
                    error: "invalid_grant".to_string(),
                    description: format!("토큰 엔드포인트가 {}를 반환했습니다", status),
                })
            }
            _ => {
                log::error!("{} 토큰 응답 형식 오류: status={} body={}", provider, status, body);
                Err(AppError::Network(format!(
                    "{} 토큰 응답을 해석할 수 없습니다",
                    provider
                )))
            }
        }
    }

    /// 사용자 정보 엔드포인트를 Bearer 토큰으로 호출합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ProfileFetch` - 전송 실패, 타임아웃, 실패 상태 코드 또는 응답 형식 오류
    pub async fn fetch_json<T: DeserializeOwned>(&self, access_token: &str) -> AppResult<T> {
        let provider = self.provider();
        let response = self
            .client
            .get(&self.credentials.userinfo_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                log::error!("{} 사용자 정보 요청 실패: {}", provider, e);
                AppError::ProfileFetch(format!("{} 사용자 정보 요청 실패", provider))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("{} 사용자 정보 조회 실패: status={} body={}", provider, status, body);
            return Err(AppError::ProfileFetch(format!(
                "{} 사용자 정보 엔드포인트가 {}를 반환했습니다",
                provider, status
            )));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::ProfileFetch(format!("{} 사용자 정보 파싱 실패: {}", provider, e))
        })
    }
}

fn classify_token_error(provider: AuthProvider, err: ProviderErrorBody) -> AppError {
    let description = err.error_description.unwrap_or_default();
    log::warn!(
        "{} 토큰 교환 실패: error={} code={:?} description={}",
        provider,
        err.error,
        err.error_code,
        description
    );

    if CLIENT_ERROR_CODES.contains(&err.error.as_str()) {
        return AppError::Config(format!(
            "{} 클라이언트 설정이 올바르지 않습니다 ({})",
            provider.display_name(),
            err.error
        ));
    }

    AppError::InvalidGrant {
        error: err.error,
        description,
    }
}

fn transport_error(provider: AuthProvider, action: &str, e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        log::error!("{} {} 타임아웃: {}", provider, action, e);
        AppError::Network(format!("{} {} 시간 초과", provider, action))
    } else {
        log::error!("{} {} 실패: {}", provider, action, e);
        AppError::Network(format!("{} {} 실패", provider, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn credentials(server: &MockServer) -> ProviderCredentials {
        ProviderCredentials {
            provider: AuthProvider::Kakao,
            client_id: Some("kakao-client".to_string()),
            client_secret: None,
            redirect_uri: Some("http://localhost:8080/api/auth/kakao/callback".to_string()),
            auth_uri: server.url("/oauth/authorize"),
            token_uri: server.url("/oauth/token"),
            userinfo_uri: server.url("/v2/user/me"),
        }
    }

    fn http(server: &MockServer) -> ProviderHttp {
        ProviderHttp::new(credentials(server), build_http_client(5).unwrap())
    }

    #[actix_web::test]
    async fn test_http_200_error_body_is_invalid_grant() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth/token");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"error":"invalid_request","error_description":"no valid data in session"}"#);
            })
            .await;

        let result = http(&server).exchange_token(&[("code", "used")]).await;
        match result {
            Err(AppError::InvalidGrant { error, description }) => {
                assert_eq!(error, "invalid_request");
                assert_eq!(description, "no valid data in session");
            }
            other => panic!("unexpected: {:?}", other.map(|t| t.access_token)),
        }
    }

    #[actix_web::test]
    async fn test_invalid_client_is_config_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth/token");
                then.status(401)
                    .header("content-type", "application/json")
                    .body(r#"{"error":"invalid_client","error_description":"Bad client credentials"}"#);
            })
            .await;

        let result = http(&server).exchange_token(&[("code", "c")]).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[actix_web::test]
    async fn test_server_error_is_network_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth/token");
                then.status(503).body("upstream down");
            })
            .await;

        let result = http(&server).exchange_token(&[("code", "c")]).await;
        assert!(matches!(result, Err(AppError::Network(_))));
    }

    #[actix_web::test]
    async fn test_unreachable_provider_is_network_error() {
        let mut creds = credentials(&MockServer::start_async().await);
        creds.token_uri = "http://127.0.0.1:1/oauth/token".to_string();
        let http = ProviderHttp::new(creds, build_http_client(2).unwrap());

        let result = http.exchange_token(&[("code", "c")]).await;
        assert!(matches!(result, Err(AppError::Network(_))));
    }

    #[actix_web::test]
    async fn test_profile_failure_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/user/me");
                then.status(401).body(r#"{"msg":"this access token does not exist","code":-401}"#);
            })
            .await;

        let result = http(&server)
            .fetch_json::<serde_json::Value>("expired-token")
            .await;
        assert!(matches!(result, Err(AppError::ProfileFetch(_))));
    }

    #[actix_web::test]
    async fn test_unreachable_userinfo_is_profile_fetch_error() {
        let mut creds = credentials(&MockServer::start_async().await);
        creds.userinfo_uri = "http://127.0.0.1:1/v2/user/me".to_string();
        let http = ProviderHttp::new(creds, build_http_client(2).unwrap());

        let result = http.fetch_json::<serde_json::Value>("kakao-at").await;
        assert!(matches!(result, Err(AppError::ProfileFetch(_))));
    }

    #[test]
    fn test_missing_client_id_is_config_error() {
        let mut creds = ProviderCredentials::from_source(
            &crate::config::ConfigSource::from_pairs(Vec::<(String, String)>::new()),
            AuthProvider::Google,
        );
        creds.redirect_uri = Some("http://localhost/cb".to_string());
        let http = ProviderHttp::new(creds, Client::new());

        assert!(matches!(
            http.authorization_url(None, "state", &[]),
            Err(AppError::Config(_))
        ));
    }
}
