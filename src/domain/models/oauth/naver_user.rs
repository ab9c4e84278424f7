//! # Naver 사용자 정보 모델
//!
//! `GET https://openapi.naver.com/v1/nid/me` 응답
//!
//! ```json
//! {
//!   "resultcode": "00",
//!   "message": "success",
//!   "response": { "id": "abc123", "nickname": "labzang", "email": "user@naver.com", "profile_image": "https://..." }
//! }
//! ```

use serde::Deserialize;

use crate::config::AuthProvider;
use crate::domain::models::identity::IdentityClaims;

#[derive(Debug, Deserialize)]
pub struct NaverUserEnvelope {
    pub resultcode: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub response: Option<NaverUserInfo>,
}

#[derive(Debug, Deserialize)]
pub struct NaverUserInfo {
    pub id: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl NaverUserEnvelope {
    /// `resultcode`가 `"00"`이 아니면 실패 메시지를 돌려줍니다.
    pub fn into_user(self) -> Result<NaverUserInfo, String> {
        match (self.resultcode.as_str(), self.response) {
            ("00", Some(user)) => Ok(user),
            (code, _) => Err(format!(
                "resultcode={} message={}",
                code,
                self.message.unwrap_or_default()
            )),
        }
    }
}

impl From<NaverUserInfo> for IdentityClaims {
    /// 네이버 프로필 응답에는 이메일 인증 여부가 없으므로 `email_verified`는 항상 `false`입니다.
    fn from(info: NaverUserInfo) -> Self {
        IdentityClaims {
            subject_id: info.id,
            provider: AuthProvider::Naver,
            nickname: info.nickname.or(info.name),
            email: info.email,
            email_verified: false,
            profile_image_url: info.profile_image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result_code() {
        let envelope: NaverUserEnvelope = serde_json::from_str(
            r#"{"resultcode":"024","message":"Authentication failed"}"#,
        )
        .unwrap();

        let err = envelope.into_user().unwrap_err();
        assert!(err.contains("024"));
    }

    #[test]
    fn test_naver_identity() {
        let envelope: NaverUserEnvelope = serde_json::from_str(
            r#"{"resultcode":"00","message":"success","response":{"id":"nv-1","name":"홍길동","email":"gd@naver.com"}}"#,
        )
        .unwrap();
        let identity = IdentityClaims::from(envelope.into_user().unwrap());

        assert_eq!(identity.subject_id, "nv-1");
        assert_eq!(identity.nickname.as_deref(), Some("홍길동"));
        assert_eq!(identity.email.as_deref(), Some("gd@naver.com"));
        assert!(!identity.email_verified);
    }
}
