//! Session token issuing and verification

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Sessions last eight hours.
pub const SESSION_TTL_SECONDS: u64 = 8 * 60 * 60;
pub const ADMIN_ROLE: &str = "admin";

/// Session token claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub role: String,
    /// Admin username
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

/// HS256 keys derived once from the session secret.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

impl SessionKeys {
    pub fn new(secret: &str) -> Self {
        // Expiry is checked against an explicit clock in `claims_at`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, subject: &str) -> jsonwebtoken::errors::Result<String> {
        self.issue_at(subject, now())
    }

    pub fn issue_at(&self, subject: &str, issued_at: u64) -> jsonwebtoken::errors::Result<String> {
        let claims = SessionClaims {
            role: ADMIN_ROLE.to_owned(),
            sub: subject.to_owned(),
            iat: issued_at,
            exp: issued_at + SESSION_TTL_SECONDS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> bool {
        self.verify_at(token, now())
    }

    pub fn verify_at(&self, token: &str, at: u64) -> bool {
        self.claims_at(token, at).is_some()
    }

    pub fn claims(&self, token: &str) -> Option<SessionClaims> {
        self.claims_at(token, now())
    }

    /// Decoded claims of a token that is authentic, admin-scoped and unexpired at `at`.
    pub fn claims_at(&self, token: &str, at: u64) -> Option<SessionClaims> {
        let data = match decode::<SessionClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(error = %e, "session token rejected");
                return None;
            }
        };

        let claims = data.claims;
        if claims.role != ADMIN_ROLE || at >= claims.exp {
            tracing::debug!(sub = %claims.sub, "session token expired or not admin-scoped");
            return None;
        }

        Some(claims)
    }
}
