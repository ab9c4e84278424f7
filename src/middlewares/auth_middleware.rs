//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 Bearer 액세스 토큰을 검증하고 사용자 정보를 추출합니다.
//!
//! ```rust,ignore
//! #[get("/{provider}/user", wrap = "AuthMiddleware::required()")]
//! async fn user(user: AuthenticatedUser) -> AppResult<HttpResponse> { ... }
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
///
/// 토큰이 없거나 유효하지 않으면 핸들러를 호출하지 않고 401 공통 에러 본문으로 응답합니다.
/// 리프레시 토큰은 액세스 토큰 자리에 사용할 수 없습니다.
#[derive(Debug, Clone, Default)]
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
