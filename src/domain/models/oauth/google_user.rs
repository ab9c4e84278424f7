//! # Google 사용자 정보 모델
//!
//! `GET https://www.googleapis.com/oauth2/v2/userinfo` 응답
//!
//! ```json
//! {
//!   "id": "1234567890",
//!   "email": "user@gmail.com",
//!   "verified_email": true,
//!   "name": "John Doe",
//!   "picture": "https://lh3.googleusercontent.com/.../photo.jpg"
//! }
//! ```

use serde::Deserialize;

use crate::config::AuthProvider;
use crate::domain::models::identity::IdentityClaims;

#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub id: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub verified_email: Option<bool>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub picture: Option<String>,
}

impl From<GoogleUserInfo> for IdentityClaims {
    fn from(info: GoogleUserInfo) -> Self {
        IdentityClaims {
            subject_id: info.id,
            provider: AuthProvider::Google,
            nickname: info.name,
            email: info.email,
            email_verified: info.verified_email.unwrap_or(false),
            profile_image_url: info.picture,
        }
    }
}
