//! 리프레시 토큰 쿠키
//!
//! 리프레시 토큰은 항상 HttpOnly 쿠키로만 전달되어 페이지 스크립트에서 읽을 수 없습니다.

use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::HttpRequest;

use crate::config::SessionConfig;

#[derive(Debug, Clone)]
pub struct RefreshCookieFactory {
    name: String,
    secure: bool,
    same_site: SameSite,
    path: String,
    max_age_secs: i64,
}

impl RefreshCookieFactory {
    /// # Arguments
    ///
    /// * `config` - 쿠키 이름, Secure, SameSite, Path 설정
    /// * `max_age_secs` - 쿠키 유효 시간 (리프레시 토큰 유효 시간과 같게 설정)
    pub fn new(config: &SessionConfig, max_age_secs: i64) -> Self {
        Self {
            name: config.cookie_name.clone(),
            secure: config.cookie_secure,
            same_site: config.cookie_same_site,
            path: config.cookie_path.clone(),
            max_age_secs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 리프레시 토큰을 담은 쿠키. 같은 값으로 여러 번 설정해도 결과가 같습니다.
    pub fn build(&self, refresh_token: &str) -> Cookie<'static> {
        Cookie::build(self.name.clone(), refresh_token.to_string())
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .path(self.path.clone())
            .max_age(time::Duration::seconds(self.max_age_secs))
            .finish()
    }

    /// 쿠키 삭제용 쿠키 (빈 값, 만료된 Max-Age)
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(self.name.clone(), "")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .path(self.path.clone())
            .finish();
        cookie.make_removal();
        cookie
    }

    /// 요청에 실려 온 리프레시 토큰
    pub fn read(&self, req: &HttpRequest) -> Option<String> {
        req.cookie(&self.name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;
    use actix_web::test::TestRequest;

    fn factory() -> RefreshCookieFactory {
        let config = SessionConfig::from_source(&ConfigSource::from_pairs([(
            "REFRESH_COOKIE_SAME_SITE",
            "strict",
        )]));
        RefreshCookieFactory::new(&config, 2_592_000)
    }

    #[test]
    fn test_refresh_cookie_attributes() {
        let cookie = factory().build("refresh-value");

        assert_eq!(cookie.name(), "refresh_token");
        assert_eq!(cookie.value(), "refresh-value");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(2_592_000)));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = factory().removal();

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }

    #[test]
    fn test_read_from_request() {
        let factory = factory();
        let req = TestRequest::default()
            .cookie(factory.build("abc"))
            .to_http_request();

        assert_eq!(factory.read(&req).as_deref(), Some("abc"));
        assert!(factory.read(&TestRequest::default().to_http_request()).is_none());
    }
}
