//! 토큰 발급/검증과 OAuth state 서명

pub mod oauth_state;
pub mod token_service;

pub use oauth_state::*;
pub use token_service::*;
