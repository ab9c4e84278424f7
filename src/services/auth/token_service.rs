//! JWT 토큰 관리 서비스 구현
//!
//! JSON Web Token 기반의 인증 시스템을 제공합니다.
//! 액세스 토큰과 리프레시 토큰의 생성, 검증을 담당합니다.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::{AuthProvider, JwtConfig};
use crate::domain::models::identity::IdentityClaims;
use crate::domain::models::token::{TokenClaims, TokenPair, TokenType};
use crate::errors::{AppError, TokenError};

/// 추가 클레임으로 덮어쓸 수 없는 예약 키
///
/// `aud`, `iss`, `nbf`는 검증 규칙이 붙는 등록 클레임이므로 사용자 정보로 싣지 않습니다.
const RESERVED_CLAIMS: [&str; 9] = [
    "sub", "provider", "type", "jti", "iat", "exp", "aud", "iss", "nbf",
];

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용하여 JWT 토큰을 생성하고 검증합니다.
/// 액세스 토큰(기본 1시간)과 리프레시 토큰(기본 30일)을 지원합니다.
/// 설정은 생성 시 한 번 읽히며 이후에는 변경되지 않으므로 여러 워커가 공유해도 안전합니다.
#[derive(Clone)]
pub struct TokenService {
    config: JwtConfig,
    keys: Option<(EncodingKey, DecodingKey)>,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        let keys = config.secret.as_ref().map(|secret| {
            (
                EncodingKey::from_secret(secret.as_bytes()),
                DecodingKey::from_secret(secret.as_bytes()),
            )
        });

        Self { config, keys }
    }

    /// 액세스 토큰 만료까지의 시간 (초)
    pub fn access_ttl_secs(&self) -> i64 {
        self.config.access_token_ttl.num_seconds()
    }

    /// 액세스 토큰 생성
    ///
    /// # Arguments
    ///
    /// * `subject_id` - 제공자 기준 사용자 ID
    /// * `provider` - 인증 제공자
    /// * `claims` - 토큰에 함께 실을 사용자 정보 (예약 키는 무시됩니다)
    ///
    /// # Errors
    ///
    /// * `AppError::Signing` - 서명 키가 없거나 서명에 실패한 경우
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = token_service.issue_access_token("4242", AuthProvider::Kakao, &identity.to_claim_map())?;
    /// ```
    pub fn issue_access_token(
        &self,
        subject_id: &str,
        provider: AuthProvider,
        claims: &Map<String, Value>,
    ) -> Result<String, AppError> {
        let extra = claims
            .iter()
            .filter(|(key, _)| !RESERVED_CLAIMS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        self.issue(subject_id, provider, TokenType::Access, extra)
    }

    /// 리프레시 토큰 생성
    ///
    /// 사용자 정보 클레임 없이 `sub`, `provider`만 담습니다.
    ///
    /// # Security
    ///
    /// 리프레시 토큰은 HttpOnly 쿠키로만 저장해야 합니다.
    pub fn issue_refresh_token(
        &self,
        subject_id: &str,
        provider: AuthProvider,
    ) -> Result<String, AppError> {
        self.issue(subject_id, provider, TokenType::Refresh, Map::new())
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pair = token_service.issue_token_pair(&identity)?;
    /// println!("Expires in: {} seconds", pair.expires_in);
    /// ```
    pub fn issue_token_pair(&self, identity: &IdentityClaims) -> Result<TokenPair, AppError> {
        let access_token = self.issue_access_token(
            &identity.subject_id,
            identity.provider,
            &identity.to_claim_map(),
        )?;
        let refresh_token = self.issue_refresh_token(&identity.subject_id, identity.provider)?;

        Ok(TokenPair::bearer(access_token, refresh_token, self.access_ttl_secs()))
    }

    fn issue(
        &self,
        subject_id: &str,
        provider: AuthProvider,
        token_type: TokenType,
        extra: Map<String, Value>,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => self.config.access_token_ttl,
            TokenType::Refresh => self.config.refresh_token_ttl,
        };

        let claims = TokenClaims {
            sub: subject_id.to_string(),
            provider,
            token_type,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            extra,
        };

        self.encode_claims(&claims)
    }

    pub(crate) fn encode_claims(&self, claims: &TokenClaims) -> Result<String, AppError> {
        let (encoding_key, _) = self
            .keys
            .as_ref()
            .ok_or_else(|| AppError::Signing("JWT_SECRET이 설정되지 않았습니다".to_string()))?;

        encode(&Header::new(Algorithm::HS256), claims, encoding_key)
            .map_err(|e| AppError::Signing(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// 서명과 만료 시간을 검사하며 만료 유예 시간(leeway)은 두지 않습니다.
    /// 토큰 용도(`type`)는 검사하지 않으므로 용도가 정해진 곳에서는
    /// [`validate_access`](Self::validate_access) / [`validate_refresh`](Self::validate_refresh)를 사용합니다.
    ///
    /// # Errors
    ///
    /// * `TokenError::Expired` - 만료된 토큰
    /// * `TokenError::BadSignature` - 다른 키로 서명된 토큰
    /// * `TokenError::Malformed` - 그 밖의 형식 오류
    /// * `TokenError::KeyUnavailable` - 서명 키가 설정되지 않음
    pub fn validate(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let (_, decoding_key) = self.keys.as_ref().ok_or(TokenError::KeyUnavailable)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<TokenClaims>(token, decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            })
    }

    pub fn validate_access(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.validate_typed(token, TokenType::Access)
    }

    pub fn validate_refresh(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.validate_typed(token, TokenType::Refresh)
    }

    fn validate_typed(&self, token: &str, expected: TokenType) -> Result<TokenClaims, TokenError> {
        let claims = self.validate(token)?;
        if claims.token_type != expected {
            return Err(TokenError::WrongType);
        }
        Ok(claims)
    }

    /// 만료 여부만 확인합니다.
    ///
    /// 만료되었으면 `Ok(true)`, 유효하면 `Ok(false)`, 그 밖의 이유로 검증에 실패하면 에러를 돌려줍니다.
    pub fn is_expired(&self, token: &str) -> Result<bool, TokenError> {
        match self.validate(token) {
            Ok(_) => Ok(false),
            Err(TokenError::Expired) => Ok(true),
            Err(e) => Err(e),
        }
    }

    /// 토큰으로부터 사용자 ID 추출
    pub fn subject_of(&self, token: &str) -> Result<String, TokenError> {
        self.validate(token).map(|claims| claims.sub)
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰 부분만을 추출합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Unauthorized` - 잘못된 헤더 형식이거나 토큰이 비어 있는 경우
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::Unauthorized(
                "유효하지 않은 인증 헤더 형식입니다".to_string(),
            )),
        }
    }
}
