//! # HTTP Handlers
//!
//! 요청을 DTO로 받아 서비스 계층을 호출하고 응답을 만듭니다.
//! 모든 핸들러는 `AppResult<HttpResponse>`를 돌려주며, 에러는 [`AppError`](crate::errors::AppError)가
//! 공통 에러 본문으로 변환합니다.

pub mod auth;
