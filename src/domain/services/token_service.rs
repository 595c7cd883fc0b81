use crate::domain::models::auth::Claims;
use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

/// Issues and resolves signed, time-bound session tokens. Anything that is
/// not a well-formed, correctly signed, unexpired token with a subject
/// resolves to Unauthorized.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn issue(&self, user_id: &str) -> Result<String, AppError> {
        self.issue_with_ttl(user_id, self.ttl)
    }

    pub fn issue_with_ttl(&self, user_id: &str, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("JWT encoding failed: {}", e);
            AppError::Internal
        })
    }

    pub fn resolve(&self, token: &str) -> Result<String, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::Unauthorized)?;

        if data.claims.sub.is_empty() {
            return Err(AppError::Unauthorized);
        }

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("unit-test-secret", 30)
    }

    #[test]
    fn issued_token_resolves_to_subject() {
        let svc = service();
        let token = svc.issue("user-1").unwrap();
        assert_eq!(svc.resolve(&token).unwrap(), "user-1");
    }

    #[test]
    fn expired_token_is_invalid() {
        let svc = service();
        let token = svc.issue_with_ttl("user-1", Duration::zero()).unwrap();
        std::thread::sleep(std::time::Duration::from_secs(1));
        assert!(matches!(svc.resolve(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn tampered_signature_is_invalid() {
        let svc = service();
        let token = svc.issue("user-1").unwrap();

        // Flip a byte in the signature segment.
        let mut bytes = token.into_bytes();
        let sig_start = bytes.iter().rposition(|&b| b == b'.').unwrap() + 1;
        bytes[sig_start] = if bytes[sig_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(matches!(svc.resolve(&tampered), Err(AppError::Unauthorized)));
    }

    #[test]
    fn garbage_is_invalid() {
        let svc = service();
        assert!(svc.resolve("not-a-token").is_err());
        assert!(svc.resolve("").is_err());
    }

    #[test]
    fn empty_subject_is_invalid() {
        let svc = service();
        let token = svc.issue("").unwrap();
        assert!(matches!(svc.resolve(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn foreign_secret_is_invalid() {
        let token = service().issue("user-1").unwrap();
        let other = TokenService::new("different-secret", 30);
        assert!(other.resolve(&token).is_err());
    }
}
