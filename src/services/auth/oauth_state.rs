//! OAuth `state` 매개변수 서명/검증
//!
//! 서버에 상태를 저장하지 않고 CSRF를 막기 위해 state 값 자체에 발급 시각과 서명을 담습니다.
//!
//! ```text
//! state = "{timestamp}.{nonce}.{base64url(hmac_sha256(secret, timestamp:nonce))}"
//! ```

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct OAuthStateSigner {
    secret: String,
    max_age_secs: i64,
}

impl OAuthStateSigner {
    pub fn new(secret: impl Into<String>, max_age_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            max_age_secs,
        }
    }

    /// 새 state 발급
    ///
    /// # Errors
    ///
    /// * `AppError::Internal` - HMAC 키를 초기화할 수 없는 경우
    pub fn generate(&self) -> AppResult<String> {
        self.generate_at(Utc::now().timestamp())
    }

    fn generate_at(&self, timestamp: i64) -> AppResult<String> {
        let nonce = Uuid::new_v4().simple().to_string();
        let signature = self.mac(timestamp, &nonce)?.finalize().into_bytes();
        Ok(format!(
            "{}.{}.{}",
            timestamp,
            nonce,
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// 콜백으로 돌아온 state를 검증합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Validation` - 형식 오류, 서명 불일치, 유효 시간 초과
    pub fn verify(&self, state: &str) -> AppResult<()> {
        let invalid = || AppError::Validation("유효하지 않은 state 값입니다".to_string());

        let mut parts = state.splitn(3, '.');
        let (Some(ts), Some(nonce), Some(signature)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        let timestamp: i64 = ts.parse().map_err(|_| invalid())?;
        let signature = URL_SAFE_NO_PAD.decode(signature).map_err(|_| invalid())?;

        if self.mac(timestamp, nonce)?.verify_slice(&signature).is_err() {
            log::warn!("OAuth state 서명 불일치");
            return Err(invalid());
        }

        let age = Utc::now().timestamp() - timestamp;
        if age < 0 || age > self.max_age_secs {
            log::warn!("OAuth state 유효 시간 초과 (age={}s)", age);
            return Err(AppError::Validation(
                "로그인 요청이 만료되었습니다. 다시 시도해주세요".to_string(),
            ));
        }

        Ok(())
    }

    fn mac(&self, timestamp: i64, nonce: &str) -> AppResult<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| AppError::Internal(format!("state 서명 키 오류: {}", e)))?;
        mac.update(format!("{}:{}", timestamp, nonce).as_bytes());
        Ok(mac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_state_verifies() {
        let signer = OAuthStateSigner::new("state-secret", 600);
        let state = signer.generate().unwrap();

        assert!(signer.verify(&state).is_ok());
        assert_ne!(state, signer.generate().unwrap());
    }

    #[test]
    fn test_tampered_state_is_rejected() {
        let signer = OAuthStateSigner::new("state-secret", 600);
        let state = signer.generate().unwrap();
        let other = OAuthStateSigner::new("other-secret", 600);

        assert!(other.verify(&state).is_err());
        assert!(signer.verify("garbage").is_err());
        assert!(signer.verify(&format!("{}x", state)).is_err());
    }

    #[test]
    fn test_signature_is_hmac_over_timestamp_and_nonce() {
        let signer = OAuthStateSigner::new("state-secret", 600);
        let state = signer.generate().unwrap();
        let (prefix, signature) = state.rsplit_once('.').unwrap();

        let mut mac = HmacSha256::new_from_slice(b"state-secret").unwrap();
        mac.update(prefix.replacen('.', ":", 1).as_bytes());
        assert_eq!(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()), signature);

        // 같은 시각에 다른 nonce를 붙이면 서명이 맞지 않습니다
        let (ts, _) = prefix.split_once('.').unwrap();
        let forged = format!("{}.{}.{}", ts, "attacker-nonce", signature);
        assert!(matches!(signer.verify(&forged), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_stale_state_is_rejected() {
        let signer = OAuthStateSigner::new("state-secret", 600);
        let state = signer.generate_at(Utc::now().timestamp() - 601).unwrap();

        assert!(matches!(signer.verify(&state), Err(AppError::Validation(_))));
    }
}
