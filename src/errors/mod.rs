pub mod errors;

pub use errors::{AppError, AppResult, TokenError};
