//! # Kakao 사용자 정보 모델
//!
//! `GET https://kapi.kakao.com/v2/user/me` 응답
//!
//! ```json
//! {
//!   "id": 123456789,
//!   "properties": { "nickname": "라그장" },
//!   "kakao_account": {
//!     "email": "user@kakao.com",
//!     "is_email_verified": true,
//!     "profile": { "nickname": "라그장", "profile_image_url": "http://k.kakaocdn.net/..." }
//!   }
//! }
//! ```
//!
//! 동의 항목에 따라 `kakao_account` 하위 값은 모두 생략될 수 있습니다.

use serde::Deserialize;

use crate::config::AuthProvider;
use crate::domain::models::identity::IdentityClaims;

#[derive(Debug, Deserialize)]
pub struct KakaoUserInfo {
    pub id: i64,
    #[serde(default)]
    pub properties: Option<KakaoProperties>,
    #[serde(default)]
    pub kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Deserialize)]
pub struct KakaoProperties {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KakaoAccount {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_email_verified: Option<bool>,
    #[serde(default)]
    pub profile: Option<KakaoProfile>,
}

#[derive(Debug, Deserialize)]
pub struct KakaoProfile {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl From<KakaoUserInfo> for IdentityClaims {
    fn from(info: KakaoUserInfo) -> Self {
        let account = info.kakao_account;
        let profile = account.as_ref().and_then(|a| a.profile.as_ref());

        // 계정 프로필을 우선하고, 없으면 구버전 properties 값을 사용
        let nickname = profile
            .and_then(|p| p.nickname.clone())
            .or_else(|| info.properties.as_ref().and_then(|p| p.nickname.clone()));
        let profile_image_url = profile
            .and_then(|p| p.profile_image_url.clone())
            .or_else(|| info.properties.as_ref().and_then(|p| p.profile_image.clone()));

        IdentityClaims {
            subject_id: info.id.to_string(),
            provider: AuthProvider::Kakao,
            nickname,
            email: account.as_ref().and_then(|a| a.email.clone()),
            email_verified: account
                .as_ref()
                .and_then(|a| a.is_email_verified)
                .unwrap_or(false),
            profile_image_url,
        }
    }
}
