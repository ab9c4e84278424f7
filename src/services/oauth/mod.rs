//! OAuth 제공자 연동
//!
//! - [`provider`]: 제공자 공통 트레이트
//! - [`google`], [`kakao`], [`naver`]: 제공자별 구현
//! - [`client`]: 로그인 단계를 순서대로 진행하는 exchange client

pub mod client;
pub mod google;
pub mod http;
pub mod kakao;
pub mod naver;
pub mod provider;

pub use client::OAuthClient;
pub use provider::OAuthProvider;
