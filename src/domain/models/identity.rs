//! 제공자에서 가져온 사용자 식별 정보

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::AuthProvider;
use crate::domain::models::token::TokenClaims;

/// 사용자 식별 클레임
///
/// 제공자 프로필에서 한 번 만들어진 뒤 변경되지 않으며, 로그인 세션 동안만 유효합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub subject_id: String,
    pub provider: AuthProvider,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub email_verified: bool,
    pub profile_image_url: Option<String>,
}

impl IdentityClaims {
    /// 액세스 토큰에 실을 추가 클레임
    ///
    /// 값이 없는 항목은 넣지 않습니다.
    pub fn to_claim_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(nickname) = &self.nickname {
            map.insert("nickname".to_string(), Value::from(nickname.clone()));
        }
        if let Some(email) = &self.email {
            map.insert("email".to_string(), Value::from(email.clone()));
        }
        map.insert("email_verified".to_string(), Value::from(self.email_verified));
        if let Some(url) = &self.profile_image_url {
            map.insert("profile_image_url".to_string(), Value::from(url.clone()));
        }
        map
    }

    /// 검증된 액세스 토큰 클레임에서 식별 정보를 복원합니다.
    pub fn from_token_claims(claims: &TokenClaims) -> Self {
        Self {
            subject_id: claims.sub.clone(),
            provider: claims.provider,
            nickname: claims.extra_str("nickname").map(str::to_string),
            email: claims.extra_str("email").map(str::to_string),
            email_verified: claims.extra_bool("email_verified").unwrap_or(false),
            profile_image_url: claims.extra_str("profile_image_url").map(str::to_string),
        }
    }
}
