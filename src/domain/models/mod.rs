//! # Domain Models Module
//!
//! 인증 흐름에서 오가는 값 객체를 정의합니다. 서버는 사용자 정보를 저장하지 않으므로
//! 모든 모델은 한 요청 안에서 만들어지고 버려집니다.
//!
//! ```text
//! models/
//! ├── oauth/     ← 제공자 응답 (토큰, 사용자 정보)
//! ├── identity   ← 제공자 공통 프로필 클레임
//! ├── token/     ← JWT 클레임과 토큰 쌍
//! ├── login      ← 로그인 시도 상태 머신
//! └── auth/      ← 미들웨어가 주입하는 인증 사용자
//! ```

pub mod auth;
pub mod identity;
pub mod login;
pub mod oauth;
pub mod token;

pub use auth::AuthenticatedUser;
pub use identity::IdentityClaims;
pub use login::{LoginAttempt, LoginState};
pub use token::{TokenClaims, TokenPair, TokenType};
