//! JWT 클레임 구조체와 토큰 쌍
//!
//! RFC 7519 표준 클레임(`sub`, `iat`, `exp`, `jti`)에 제공자, 토큰 용도,
//! 그리고 로그인 시 전달된 사용자 정보 클레임을 더해 서명합니다.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::AuthProvider;

/// 토큰 용도
///
/// 리프레시 토큰이 액세스 토큰 자리에 쓰이지 않도록 `type` 클레임으로 구분합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `sub`: 제공자 내 사용자 ID
/// - `provider`: OAuth 제공자 (google, kakao, naver)
/// - `type`: 토큰 용도 (access, refresh)
/// - `jti`: 토큰 고유 ID
/// - `iat` / `exp`: 발급/만료 시간 (Unix timestamp, 초)
/// - 그 밖의 키: 액세스 토큰에만 포함되는 사용자 정보 (nickname, email 등)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub provider: AuthProvider,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenClaims {
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    pub fn extra_bool(&self, key: &str) -> Option<bool> {
        self.extra.get(key).and_then(Value::as_bool)
    }
}

/// 클라이언트에게 전달되는 토큰 쌍
///
/// 액세스 토큰은 클라이언트 프로세스 메모리에만 보관하고,
/// 리프레시 토큰은 HTTP-only 쿠키로만 저장합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// 액세스 토큰 만료까지 남은 시간 (초)
    pub expires_in: i64,
}

impl TokenPair {
    pub fn bearer(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_flatten_extra_fields() {
        let mut extra = Map::new();
        extra.insert("nickname".to_string(), Value::from("라그장"));
        extra.insert("email_verified".to_string(), Value::from(true));

        let claims = TokenClaims {
            sub: "12345".to_string(),
            provider: AuthProvider::Kakao,
            token_type: TokenType::Access,
            jti: "jti-1".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
            extra,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["type"], "access");
        assert_eq!(json["provider"], "kakao");
        assert_eq!(json["nickname"], "라그장");

        let parsed: TokenClaims = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.extra_str("nickname"), Some("라그장"));
        assert_eq!(parsed.extra_bool("email_verified"), Some(true));
        assert_eq!(parsed, claims);
    }
}
