//! 로그인 세션 처리
//!
//! - [`cookie`]: 서버가 내려주는 리프레시 토큰 쿠키
//! - [`callback`]: 콜백 URL 토큰 추출
//! - [`bridge`]: 클라이언트 쪽 토큰 보관 규칙

pub mod bridge;
pub mod callback;
pub mod cookie;

pub use bridge::{AccessTokenStatus, AuthSession, HttpSessionBackend, LoginOutcome, SessionBackend, SessionBridge};
pub use callback::extract_tokens_from_callback_url;
pub use cookie::RefreshCookieFactory;
