//! 로그인 콜백 URL에서 토큰 추출

use url::Url;

use crate::domain::models::token::TokenPair;

const DEFAULT_EXPIRES_IN: i64 = 3600;

/// 콜백 URL의 쿼리, 그다음 프래그먼트에서 토큰을 찾습니다.
///
/// `access_token`/`accessToken`, `refresh_token`/`refreshToken` 두 표기를 모두 받으며,
/// 두 토큰 중 하나라도 어느 위치에도 없으면 `None`입니다.
///
/// # Examples
///
/// ```rust,ignore
/// let pair = extract_tokens_from_callback_url("https://x/cb#access_token=A&refresh_token=B").unwrap();
/// assert_eq!(pair.access_token, "A");
/// ```
pub fn extract_tokens_from_callback_url(callback_url: &str) -> Option<TokenPair> {
    let url = Url::parse(callback_url).ok()?;

    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let fragment: Vec<(String, String)> = url
        .fragment()
        .map(|f| url::form_urlencoded::parse(f.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    let lookup = |names: &[&str]| -> Option<String> {
        [&query, &fragment].into_iter().find_map(|params| {
            params
                .iter()
                .find(|(key, value)| names.contains(&key.as_str()) && !value.is_empty())
                .map(|(_, value)| value.clone())
        })
    };

    let access_token = lookup(&["access_token", "accessToken"])?;
    let refresh_token = lookup(&["refresh_token", "refreshToken"])?;
    let expires_in = lookup(&["expires_in", "expiresIn"])
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_EXPIRES_IN);

    let mut pair = TokenPair::bearer(access_token, refresh_token, expires_in);
    if let Some(token_type) = lookup(&["token_type", "tokenType"]) {
        pair.token_type = token_type;
    }
    Some(pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_in_query() {
        let pair = extract_tokens_from_callback_url("https://x/cb?access_token=A&refresh_token=B").unwrap();
        assert_eq!(pair.access_token, "A");
        assert_eq!(pair.refresh_token, "B");
        assert_eq!(pair.expires_in, 3600);
        assert_eq!(pair.token_type, "Bearer");
    }

    #[test]
    fn test_tokens_in_fragment() {
        let pair = extract_tokens_from_callback_url("https://x/cb#access_token=A&refresh_token=B").unwrap();
        assert_eq!(pair.access_token, "A");
        assert_eq!(pair.refresh_token, "B");
    }

    #[test]
    fn test_camel_case_names() {
        let pair = extract_tokens_from_callback_url(
            "https://x/cb?accessToken=A#refreshToken=B&expiresIn=120",
        )
        .unwrap();
        assert_eq!(pair.access_token, "A");
        assert_eq!(pair.refresh_token, "B");
        assert_eq!(pair.expires_in, 120);
    }

    #[test]
    fn test_query_wins_over_fragment() {
        let pair = extract_tokens_from_callback_url(
            "https://x/cb?access_token=Q&refresh_token=R#access_token=F",
        )
        .unwrap();
        assert_eq!(pair.access_token, "Q");
    }

    #[test]
    fn test_missing_token_is_none() {
        assert!(extract_tokens_from_callback_url("https://x/cb?access_token=A").is_none());
        assert!(extract_tokens_from_callback_url("https://x/cb#refresh_token=B").is_none());
        assert!(extract_tokens_from_callback_url("not a url").is_none());
    }
}
