//! 제공자 토큰 엔드포인트 응답 모델
//!
//! 네이버는 잘못된 코드에도 HTTP 200과 에러 본문을 돌려주므로 상태 코드만으로는
//! 성공 여부를 알 수 없습니다. 본문을 성공/에러 중 하나로 명시적으로 해석합니다.

use serde::{Deserialize, Deserializer};

/// 제공자가 발급한 액세스 토큰
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// 네이버는 문자열(`"3600"`)로 돌려줍니다
    #[serde(default, deserialize_with = "number_or_string")]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// RFC 6749 §5.2 에러 응답 (카카오는 `error_code` 추가)
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorBody {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TokenEndpointResponse {
    Success(ProviderToken),
    Error(ProviderErrorBody),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body() {
        let body = r#"{"access_token":"ya29.a0","expires_in":3599,"token_type":"Bearer","scope":"openid email"}"#;
        match serde_json::from_str::<TokenEndpointResponse>(body).unwrap() {
            TokenEndpointResponse::Success(token) => {
                assert_eq!(token.access_token, "ya29.a0");
                assert_eq!(token.expires_in, Some(3599));
                assert!(token.refresh_token.is_none());
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_error_body() {
        let body = r#"{"error":"invalid_grant","error_description":"authorization code not found for code=abc","error_code":"KOE320"}"#;
        match serde_json::from_str::<TokenEndpointResponse>(body).unwrap() {
            TokenEndpointResponse::Error(err) => {
                assert_eq!(err.error, "invalid_grant");
                assert_eq!(err.error_code.as_deref(), Some("KOE320"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_naver_string_expires_in() {
        let body = r#"{"access_token":"AAAA","refresh_token":"c8ce","token_type":"bearer","expires_in":"3600"}"#;
        match serde_json::from_str::<TokenEndpointResponse>(body).unwrap() {
            TokenEndpointResponse::Success(token) => assert_eq!(token.expires_in, Some(3600)),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_garbage_body_is_rejected() {
        assert!(serde_json::from_str::<TokenEndpointResponse>(r#"{"ok":true}"#).is_err());
    }
}
