//! # Domain Layer Module
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── DTOs     - HTTP 요청/응답 계약
//! └── Models   - 토큰, 프로필, 로그인 상태 등 값 객체
//!      │
//!      ▼
//! Application Layer (Services)
//! ```

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
