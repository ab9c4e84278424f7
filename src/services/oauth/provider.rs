use async_trait::async_trait;

use crate::config::AuthProvider;
use crate::domain::models::identity::IdentityClaims;
use crate::domain::models::oauth::ProviderToken;
use crate::errors::AppResult;

/// OAuth 제공자 공통 동작
///
/// 제공자마다 다른 매개변수와 응답 형식은 구현체 안에서 처리하고,
/// 호출하는 쪽은 항상 같은 순서(인가 URL → 코드 교환 → 프로필 조회)로 사용합니다.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    fn kind(&self) -> AuthProvider;

    /// 인가 엔드포인트 URL
    ///
    /// # Errors
    ///
    /// * `AppError::Config` - client id 또는 redirect uri가 설정되지 않은 경우
    fn authorization_url(&self, redirect_uri: Option<&str>, state: &str) -> AppResult<String>;

    /// 인가 코드를 제공자 액세스 토큰으로 교환합니다. 코드는 한 번만 사용할 수 있습니다.
    async fn exchange_code(&self, code: &str, state: Option<&str>) -> AppResult<ProviderToken>;

    async fn fetch_profile(&self, access_token: &str) -> AppResult<IdentityClaims>;
}
