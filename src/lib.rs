//! 랩장 인증 서비스
//!
//! Google, Kakao, Naver 소셜 로그인을 처리하고 자체 JWT를 발급하는 인증 서비스와,
//! 브라우저 요청을 인증 서비스로 전달하는 API 게이트웨이를 제공합니다.
//!
//! # Features
//!
//! - **OAuth 2.0**: 인가 URL 발급, 인가 코드 교환, 사용자 정보 조회 (Google/Kakao/Naver)
//! - **JWT 인증**: HS256 액세스/리프레시 토큰, 상태 없는 검증
//! - **세션 브리지**: 리프레시 토큰은 HttpOnly 쿠키, 액세스 토큰은 메모리에만 보관
//! - **API 게이트웨이**: `/api/auth/**` 경로 재작성, 프록시, CORS 필터
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │     Gateway     │ ← CORS, /api/auth/** → /**
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, 쿠키
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← OAuth 클라이언트, 토큰 서비스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ OAuth Providers │ ← Google / Kakao / Naver
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use labzang_auth::config::AppConfig;
//! use labzang_auth::services::auth::TokenService;
//! use labzang_auth::services::oauth::OAuthClient;
//! use labzang_auth::config::AuthProvider;
//!
//! let config = AppConfig::from_env();
//! let oauth = OAuthClient::from_config(&config.oauth)?;
//! let tokens = TokenService::new(config.jwt.clone());
//!
//! let identity = oauth.complete_callback(AuthProvider::Kakao, &code, Some(&state)).await?;
//! let pair = tokens.issue_token_pair(&identity)?;
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod gateway;
pub mod handlers;
pub mod middlewares;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;

pub use errors::{AppError, AppResult};
pub use state::AppState;
