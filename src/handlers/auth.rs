//! Authentication HTTP Handlers
//!
//! 소셜 로그인(Google, Kakao, Naver)과 리프레시 토큰 쿠키를 처리하는 엔드포인트입니다.
//! 게이트웨이는 `/api/auth/{provider}/...` 요청을 접두사를 떼고 이 서비스의 `/{provider}/...`로 전달합니다.
//!
//! | Method | Path | 설명 |
//! |--------|------|------|
//! | GET | `/{provider}/auth-url` | 인가 URL 발급 |
//! | GET | `/{provider}/callback` | 제공자 콜백, 프론트엔드로 리다이렉트 |
//! | POST | `/{provider}/token` | 인가 코드 → 토큰 쌍 |
//! | GET | `/{provider}/user` | 액세스 토큰의 사용자 정보 |
//! | POST/DELETE | `/{provider}/set-refresh-token` | 리프레시 쿠키 설정/삭제 |
//! | POST | `/{provider}/refresh` | 쿠키의 리프레시 토큰으로 액세스 토큰 재발급 |
//! | POST | `/{provider}/logout` | 리프레시 쿠키 삭제 |
use actix_web::http::header;
use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::config::{AuthProvider, SessionConfig};
use crate::domain::models::token::TokenPair;
use crate::domain::{
    AuthUrlResponse, AuthenticatedUser, CallbackQuery, RefreshResponse, SetRefreshTokenRequest,
    SuccessResponse, TokenRequest, TokenResponse, UserResponse,
};
use crate::errors::{AppError, AppResult};
use crate::middlewares::AuthMiddleware;
use crate::services::auth::TokenService;
use crate::services::oauth::OAuthClient;
use crate::session::RefreshCookieFactory;

fn parse_provider(raw: &str) -> AppResult<AuthProvider> {
    raw.parse()
        .map_err(|_| AppError::NoRoute(format!("지원하지 않는 로그인 제공자: {}", raw)))
}

/// 인가 URL 발급
///
/// # Endpoint
/// `GET /{provider}/auth-url`
///
/// # Response
/// ```json
/// { "success": true, "auth_url": "https://kauth.kakao.com/oauth/authorize?client_id=...&state=..." }
/// ```
#[get("/{provider}/auth-url")]
pub async fn auth_url(
    path: web::Path<String>,
    oauth: web::Data<OAuthClient>,
) -> AppResult<HttpResponse> {
    let provider = parse_provider(&path)?;
    let url = oauth.get_authorization_url(provider, None)?;

    Ok(HttpResponse::Ok().json(AuthUrlResponse::new(url)))
}

/// 제공자 콜백
///
/// `code`와 함께 인가 URL에서 발급한 `state`가 반드시 있어야 하며, 서명이 맞지 않거나
/// 누락되면 코드 교환 없이 에러로 리다이렉트합니다.
/// 성공하면 리프레시 쿠키를 설정하고 프론트엔드 콜백 페이지로 리다이렉트합니다.
/// 토큰은 서버 로그나 Referer에 남지 않도록 URL 프래그먼트에 담습니다.
///
/// ```text
/// 302 Location: http://localhost:3000/login/callback#access_token=...&refresh_token=...&token_type=Bearer&expires_in=3600
/// 302 Location: http://localhost:3000/login/callback?error=invalid_grant&message=...
/// ```
#[get("/{provider}/callback")]
pub async fn callback(
    path: web::Path<String>,
    query: web::Query<CallbackQuery>,
    oauth: web::Data<OAuthClient>,
    tokens: web::Data<TokenService>,
    cookies: web::Data<RefreshCookieFactory>,
    session: web::Data<SessionConfig>,
) -> AppResult<HttpResponse> {
    let provider = parse_provider(&path)?;
    let query = query.into_inner();

    let result = match (query.error, query.code, query.state) {
        (Some(error), _, _) => {
            log::warn!(
                "{} 로그인 취소/실패: {} {}",
                provider,
                error,
                query.error_description.unwrap_or_default()
            );
            Err(AppError::InvalidGrant {
                error,
                description: "사용자가 로그인을 취소했거나 제공자가 요청을 거부했습니다".to_string(),
            })
        }
        (None, Some(code), Some(state)) if !code.is_empty() && !state.is_empty() => {
            login(&oauth, &tokens, provider, &code, Some(&state)).await
        }
        (None, Some(code), _) if !code.is_empty() => {
            Err(AppError::Validation("state 값이 필요합니다".to_string()))
        }
        _ => Err(AppError::Validation("Authorization code가 필요합니다".to_string())),
    };

    let target = session.frontend_callback_url();
    match result {
        Ok((pair, _)) => Ok(HttpResponse::Found()
            .cookie(cookies.build(&pair.refresh_token))
            .insert_header((header::LOCATION, success_redirect(&target, &pair)))
            .finish()),
        Err(e) => {
            log::warn!("{} 콜백 처리 실패: {}", provider, e);
            Ok(HttpResponse::Found()
                .insert_header((header::LOCATION, error_redirect(&target, &e)))
                .finish())
        }
    }
}

/// 인가 코드를 토큰 쌍으로 교환
///
/// # Endpoint
/// `POST /{provider}/token`
///
/// # Request Body
/// ```json
/// { "code": "...", "state": "..." }
/// ```
///
/// 리프레시 토큰은 응답 본문과 함께 HttpOnly 쿠키로도 설정됩니다.
#[post("/{provider}/token")]
pub async fn token(
    path: web::Path<String>,
    payload: web::Json<TokenRequest>,
    oauth: web::Data<OAuthClient>,
    tokens: web::Data<TokenService>,
    cookies: web::Data<RefreshCookieFactory>,
) -> AppResult<HttpResponse> {
    let provider = parse_provider(&path)?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (pair, identity) =
        login(&oauth, &tokens, provider, &payload.code, payload.state.as_deref()).await?;

    Ok(HttpResponse::Ok()
        .cookie(cookies.build(&pair.refresh_token))
        .json(TokenResponse::new(pair, identity)))
}

async fn login(
    oauth: &OAuthClient,
    tokens: &TokenService,
    provider: AuthProvider,
    code: &str,
    state: Option<&str>,
) -> AppResult<(TokenPair, crate::domain::IdentityClaims)> {
    let identity = oauth.complete_callback(provider, code, state).await?;
    let pair = tokens.issue_token_pair(&identity)?;
    Ok((pair, identity))
}

fn success_redirect(target: &str, pair: &TokenPair) -> String {
    let fragment = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("access_token", &pair.access_token)
        .append_pair("refresh_token", &pair.refresh_token)
        .append_pair("token_type", &pair.token_type)
        .append_pair("expires_in", &pair.expires_in.to_string())
        .finish();
    format!("{}#{}", target, fragment)
}

fn error_redirect(target: &str, error: &AppError) -> String {
    format!(
        "{}?error={}&message={}",
        target,
        urlencoding::encode(error.code()),
        urlencoding::encode(&error.user_message())
    )
}

/// 액세스 토큰의 사용자 정보
///
/// # Endpoint
/// `GET /{provider}/user`
///
/// # Headers
/// `Authorization: Bearer <access_token>`
#[get("/{provider}/user", wrap = "AuthMiddleware::required()")]
pub async fn user(path: web::Path<String>, user: AuthenticatedUser) -> AppResult<HttpResponse> {
    let provider = parse_provider(&path)?;
    if user.provider != provider {
        return Err(AppError::Unauthorized(format!(
            "{} 로그인 토큰이 아닙니다",
            provider.display_name()
        )));
    }

    Ok(HttpResponse::Ok().json(UserResponse::new(user.identity())))
}

/// 리프레시 토큰을 HttpOnly 쿠키로 설정
///
/// # Endpoint
/// `POST /{provider}/set-refresh-token`
///
/// # Request Body
/// ```json
/// { "refreshToken": "eyJ..." }
/// ```
#[post("/{provider}/set-refresh-token")]
pub async fn set_refresh_token(
    path: web::Path<String>,
    payload: web::Json<SetRefreshTokenRequest>,
    tokens: web::Data<TokenService>,
    cookies: web::Data<RefreshCookieFactory>,
) -> AppResult<HttpResponse> {
    parse_provider(&path)?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let claims = tokens.validate_refresh(&payload.refresh_token)?;

    let mut response = HttpResponse::Ok().json(SuccessResponse::ok());
    response
        .add_cookie(&cookies.build(&payload.refresh_token))
        .map_err(|e| AppError::CookieWrite(e.to_string()))?;

    log::info!("🍪 {} 리프레시 쿠키 설정: subject={}", claims.provider, claims.sub);
    Ok(response)
}

/// 리프레시 토큰 쿠키 삭제
///
/// # Endpoint
/// `DELETE /{provider}/set-refresh-token`
#[delete("/{provider}/set-refresh-token")]
pub async fn clear_refresh_token(
    path: web::Path<String>,
    cookies: web::Data<RefreshCookieFactory>,
) -> AppResult<HttpResponse> {
    parse_provider(&path)?;

    Ok(HttpResponse::Ok()
        .cookie(cookies.removal())
        .json(SuccessResponse::ok()))
}

/// 쿠키의 리프레시 토큰으로 액세스 토큰 재발급
///
/// 리프레시 토큰에는 사용자 정보 클레임이 없으므로 새 액세스 토큰에는 `sub`, `provider`만 담깁니다.
#[post("/{provider}/refresh")]
pub async fn refresh(
    req: HttpRequest,
    path: web::Path<String>,
    tokens: web::Data<TokenService>,
    cookies: web::Data<RefreshCookieFactory>,
) -> AppResult<HttpResponse> {
    let provider = parse_provider(&path)?;
    let refresh_token = cookies
        .read(&req)
        .ok_or_else(|| AppError::Unauthorized("리프레시 토큰이 없습니다".to_string()))?;

    let claims = tokens.validate_refresh(&refresh_token)?;
    if claims.provider != provider {
        return Err(AppError::Unauthorized(format!(
            "{} 로그인 토큰이 아닙니다",
            provider.display_name()
        )));
    }

    let access_token =
        tokens.issue_access_token(&claims.sub, claims.provider, &serde_json::Map::new())?;

    Ok(HttpResponse::Ok().json(RefreshResponse {
        success: true,
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.access_ttl_secs(),
    }))
}

/// 로그아웃
///
/// 서버는 세션을 저장하지 않으므로 리프레시 쿠키를 지우는 것으로 끝납니다.
#[post("/{provider}/logout")]
pub async fn logout(
    path: web::Path<String>,
    cookies: web::Data<RefreshCookieFactory>,
) -> AppResult<HttpResponse> {
    let provider = parse_provider(&path)?;
    log::info!("👋 {} 로그아웃", provider);

    Ok(HttpResponse::Ok()
        .cookie(cookies.removal())
        .json(SuccessResponse::with_message("로그아웃되었습니다")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_redirect_puts_tokens_in_fragment() {
        let pair = TokenPair::bearer("a.b.c".to_string(), "r.s.t".to_string(), 3600);
        let location = success_redirect("http://localhost:3000/login/callback", &pair);

        assert_eq!(
            location,
            "http://localhost:3000/login/callback#access_token=a.b.c&refresh_token=r.s.t&token_type=Bearer&expires_in=3600"
        );
        let extracted = crate::session::extract_tokens_from_callback_url(&location).unwrap();
        assert_eq!(extracted, pair);
    }

    #[test]
    fn test_error_redirect_hides_detail() {
        let error = AppError::Network("connect error: 10.0.0.3:443".to_string());
        let location = error_redirect("http://localhost:3000/login/callback", &error);

        assert!(location.starts_with("http://localhost:3000/login/callback?error="));
        assert!(!location.contains("10.0.0.3"));
    }

    #[test]
    fn test_unknown_provider_is_not_found() {
        assert!(matches!(parse_provider("github"), Err(AppError::NoRoute(_))));
        assert_eq!(parse_provider("naver").unwrap(), AuthProvider::Naver);
    }
}
