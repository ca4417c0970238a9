use std::fmt;

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use uuid::Uuid;

use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::types::internal::Claims;

/// Issues and validates HS256 bearer tokens
pub struct TokenService {
    jwt_secret: String,
    lifetime_minutes: i64,
}

impl TokenService {
    pub fn new(jwt_secret: String, lifetime_minutes: i64) -> Self {
        Self {
            jwt_secret,
            lifetime_minutes,
        }
    }

    /// Sign a token for `user_id` in `org_id`
    pub fn issue(&self, user_id: &str, org_id: &str) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let exp = self
            .lifetime_minutes
            .checked_mul(60)
            .and_then(|seconds| now.checked_add(seconds))
            .ok_or_else(|| {
                InternalError::crypto(
                    "jwt_exp",
                    format!("token lifetime of {} minutes overflows", self.lifetime_minutes),
                )
            })?;
        let claims = Claims {
            sub: user_id.to_string(),
            org: org_id.to_string(),
            iat: now,
            exp,
            jti: Uuid::new_v4().to_string(),
        };

        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, InternalError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_encode", e.to_string()))
    }

    /// Verify signature and expiry before any claim is trusted
    pub fn validate(&self, token: &str) -> Result<Claims, InternalError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => CredentialError::ExpiredToken,
            _ => CredentialError::invalid_token(e.to_string()),
        })?;

        Ok(token_data.claims)
    }

    pub fn lifetime_minutes(&self) -> i64 {
        self.lifetime_minutes
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("lifetime_minutes", &self.lifetime_minutes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-minimum-32-characters-long";

    fn service() -> TokenService {
        TokenService::new(SECRET.to_string(), 60)
    }

    #[test]
    fn test_issue_and_validate() {
        let token = service().issue("user-1", "org-1").unwrap();
        let claims = service().validate(&token).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.org, "org-1");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_each_token_has_unique_jti() {
        let a = service().validate(&service().issue("u", "o").unwrap()).unwrap();
        let b = service().validate(&service().issue("u", "o").unwrap()).unwrap();

        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_expired_token() {
        let now = Utc::now().timestamp();
        let token = service()
            .sign(&Claims {
                sub: "user-1".to_string(),
                org: "org-1".to_string(),
                iat: now - 7200,
                exp: now - 3600,
                jti: "old".to_string(),
            })
            .unwrap();

        match service().validate(&token) {
            Err(InternalError::Credential(CredentialError::ExpiredToken)) => {}
            other => panic!("Expected ExpiredToken, got {:?}", other),
        }
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let foreign = TokenService::new("another-secret-that-is-also-32-chars!!".to_string(), 60);
        let token = foreign.issue("user-1", "org-1").unwrap();

        match service().validate(&token) {
            Err(InternalError::Credential(CredentialError::InvalidToken { .. })) => {}
            other => panic!("Expected InvalidToken, got {:?}", other),
        }
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let token = service().issue("user-1", "org-1").unwrap();
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let other = service().issue("user-2", "org-2").unwrap();
        parts[1] = other.split('.').nth(1).unwrap().to_string();

        assert!(service().validate(&parts.join(".")).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            service().validate("not.a.jwt"),
            Err(InternalError::Credential(CredentialError::InvalidToken { .. }))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        assert!(!format!("{:?}", service()).contains(SECRET));
    }

    #[test]
    fn test_overflowing_lifetime_is_an_error() {
        let service = TokenService::new(SECRET.to_string(), i64::MAX);

        match service.issue("user-1", "org-1") {
            Err(InternalError::Crypto { operation, .. }) => assert_eq!(operation, "jwt_exp"),
            other => panic!("Expected Crypto error, got {:?}", other),
        }
    }
}
