//! Bearer token held for the signed-in user
//!
//! Where the token is stored (local storage, keychain) is up to the embedding
//! app; the client only needs to know whether it is still usable.

use chrono::Utc;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;

/// Claims read from the access token without verifying its signature
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.trim().is_empty()).then_some(token),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// A token is present and, if it is a JWT carrying `exp`, not expired.
    /// Opaque tokens are trusted until the backend answers 401.
    pub fn is_authenticated(&self) -> bool {
        let Some(token) = self.token.as_deref() else {
            return false;
        };

        match expiry(token) {
            Some(exp) => exp > Utc::now().timestamp(),
            None => true,
        }
    }

    pub fn clear(&mut self) {
        self.token = None;
    }
}

fn expiry(token: &str) -> Option<i64> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .ok()
        .and_then(|data| data.claims.exp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        aud: Option<String>,
    }

    fn encode_claims(claims: &TestClaims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(b"server-secret"),
        )
        .unwrap()
    }

    fn jwt(exp: i64) -> String {
        encode_claims(&TestClaims {
            sub: "42".into(),
            exp,
            aud: None,
        })
    }

    fn jwt_with_audience(exp: i64, aud: &str) -> String {
        encode_claims(&TestClaims {
            sub: "42".into(),
            exp,
            aud: Some(aud.into()),
        })
    }

    #[test]
    fn test_anonymous_session() {
        assert!(!Session::anonymous().is_authenticated());
        assert!(!Session::new("  ").is_authenticated());
    }

    #[test]
    fn test_jwt_expiry() {
        let now = Utc::now().timestamp();
        assert!(Session::new(jwt(now + 3600)).is_authenticated());
        assert!(!Session::new(jwt(now - 60)).is_authenticated());
    }

    #[test]
    fn test_jwt_expiry_with_audience() {
        let now = Utc::now().timestamp();
        assert!(Session::new(jwt_with_audience(now + 3600, "marketplace")).is_authenticated());
        assert!(!Session::new(jwt_with_audience(now - 60, "marketplace")).is_authenticated());
    }

    #[test]
    fn test_opaque_token_is_trusted() {
        assert!(Session::new("opaque-token-value").is_authenticated());
    }

    #[test]
    fn test_clear() {
        let mut session = Session::new("token");
        session.clear();
        assert!(session.token().is_none());
    }
}
