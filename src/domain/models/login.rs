//! 로그인 시도 상태 머신
//!
//! ```text
//! Idle → AuthUrlRequested → RedirectedToProvider → CallbackReceived
//!      → TokenExchanged → ProfileFetched → Complete
//!
//! 종료 상태가 아닌 모든 상태 → Failed
//! ```
//!
//! 서버는 상태를 저장하지 않으므로 한 번의 HTTP 요청 안에서 진행되는 구간만 추적합니다.
//! 인가 URL 요청은 `Idle`에서, 콜백/코드 교환 요청은 `CallbackReceived`에서 시작합니다.

use std::fmt;

use crate::config::AuthProvider;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Idle,
    AuthUrlRequested,
    RedirectedToProvider,
    CallbackReceived,
    TokenExchanged,
    ProfileFetched,
    Complete,
    Failed,
}

impl LoginState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoginState::Complete | LoginState::Failed)
    }

    /// 정상 흐름에서 바로 다음 상태
    fn successor(&self) -> Option<LoginState> {
        match self {
            LoginState::Idle => Some(LoginState::AuthUrlRequested),
            LoginState::AuthUrlRequested => Some(LoginState::RedirectedToProvider),
            LoginState::RedirectedToProvider => Some(LoginState::CallbackReceived),
            LoginState::CallbackReceived => Some(LoginState::TokenExchanged),
            LoginState::TokenExchanged => Some(LoginState::ProfileFetched),
            LoginState::ProfileFetched => Some(LoginState::Complete),
            LoginState::Complete | LoginState::Failed => None,
        }
    }
}

impl fmt::Display for LoginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// 한 번의 로그인 시도
#[derive(Debug, Clone)]
pub struct LoginAttempt {
    provider: AuthProvider,
    state: LoginState,
    failure: Option<String>,
}

impl LoginAttempt {
    pub fn new(provider: AuthProvider) -> Self {
        Self {
            provider,
            state: LoginState::Idle,
            failure: None,
        }
    }

    /// 제공자가 콜백으로 코드를 돌려준 시점부터 시작하는 시도
    pub fn from_callback(provider: AuthProvider) -> Self {
        Self {
            provider,
            state: LoginState::CallbackReceived,
            failure: None,
        }
    }

    pub fn provider(&self) -> AuthProvider {
        self.provider
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// 다음 상태로 진행합니다. 순서를 건너뛰거나 되돌아가는 전이는 거부합니다.
    pub fn advance(&mut self, next: LoginState) -> AppResult<()> {
        if next == LoginState::Failed {
            return Err(AppError::Internal(
                "Failed 상태로는 fail()을 통해서만 전이할 수 있습니다".to_string(),
            ));
        }

        if self.state.successor() != Some(next) {
            return Err(AppError::Internal(format!(
                "{} 로그인 상태 전이 오류: {} → {}",
                self.provider, self.state, next
            )));
        }

        log::debug!("{} 로그인 상태: {} → {}", self.provider, self.state, next);
        self.state = next;
        Ok(())
    }

    /// 시도를 실패로 끝냅니다. 이미 종료된 시도는 바뀌지 않습니다.
    pub fn fail(&mut self, reason: impl Into<String>) {
        if self.state.is_terminal() {
            return;
        }
        let reason = reason.into();
        log::warn!("{} 로그인 실패 ({} 단계): {}", self.provider, self.state, reason);
        self.failure = Some(reason);
        self.state = LoginState::Failed;
    }

    /// 단계 결과를 받아 성공이면 다음 상태로, 실패면 `Failed`로 전이합니다.
    pub fn step<T>(&mut self, next: LoginState, result: AppResult<T>) -> AppResult<T> {
        match result {
            Ok(value) => {
                self.advance(next)?;
                Ok(value)
            }
            Err(e) => {
                self.fail(e.to_string());
                Err(e)
            }
        }
    }
}
