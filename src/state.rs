//! 인증 서비스 공유 상태
//!
//! 시작 시 설정으로부터 한 번 만들어지고 모든 워커가 읽기 전용으로 공유합니다.

use actix_web::web;

use crate::config::{AppConfig, SessionConfig};
use crate::errors::AppResult;
use crate::services::auth::TokenService;
use crate::services::oauth::OAuthClient;
use crate::session::RefreshCookieFactory;

#[derive(Clone)]
pub struct AppState {
    pub tokens: web::Data<TokenService>,
    pub oauth: web::Data<OAuthClient>,
    pub cookies: web::Data<RefreshCookieFactory>,
    pub session: web::Data<SessionConfig>,
}

impl AppState {
    /// # Errors
    ///
    /// * `AppError::Internal` - 제공자 HTTP 클라이언트를 만들 수 없는 경우
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let tokens = TokenService::new(config.jwt.clone());
        let oauth = OAuthClient::from_config(&config.oauth)?;
        let cookies = RefreshCookieFactory::new(&config.session, config.jwt.refresh_token_ttl.num_seconds());

        Ok(Self::new(tokens, oauth, cookies, config.session.clone()))
    }

    pub fn new(
        tokens: TokenService,
        oauth: OAuthClient,
        cookies: RefreshCookieFactory,
        session: SessionConfig,
    ) -> Self {
        Self {
            tokens: web::Data::new(tokens),
            oauth: web::Data::new(oauth),
            cookies: web::Data::new(cookies),
            session: web::Data::new(session),
        }
    }

    /// 핸들러와 미들웨어가 꺼내 쓸 수 있도록 등록합니다.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.tokens.clone())
            .app_data(self.oauth.clone())
            .app_data(self.cookies.clone())
            .app_data(self.session.clone());
    }
}
