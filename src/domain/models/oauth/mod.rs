//! 외부 OAuth 제공자의 응답 모델
//!
//! 제공자마다 다른 사용자 정보 응답을 [`IdentityClaims`](crate::domain::models::identity::IdentityClaims)
//! 하나로 정규화합니다.

pub mod provider_token;
pub mod google_user;
pub mod kakao_user;
pub mod naver_user;

pub use provider_token::{ProviderErrorBody, ProviderToken, TokenEndpointResponse};
pub use google_user::GoogleUserInfo;
pub use kakao_user::KakaoUserInfo;
pub use naver_user::{NaverUserEnvelope, NaverUserInfo};
