use crate::types::Claims;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default access token lifetime in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Process-wide signing key. Never printed.
#[derive(Clone)]
pub struct SigningSecret(String);

impl SigningSecret {
    /// Wraps a secret, rejecting the empty string.
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            None
        } else {
            Some(Self(secret))
        }
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// Token verification failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Not a well-formed token, wrong algorithm, or bad signature.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Signature checked out but the expiry claim is absent.
    #[error("token is missing the exp claim")]
    MissingClaim,

    /// The current time has reached `exp`.
    #[error("token expired")]
    Expired,
}

/// Claims as they appear on the wire. `exp` stays optional so a signed
/// token without it is reported as [`TokenError::MissingClaim`] rather than
/// a decoding failure.
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// Issues and verifies HS256 bearer tokens.
///
/// The codec owns its signing keys; nothing is read from the environment
/// after construction, so it can be shared freely across requests.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl_secs", &self.ttl.num_seconds())
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Creates a codec signing with `secret`; tokens live for `ttl_secs`.
    pub fn new(secret: &SigningSecret, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Issues a token for `subject` expiring one TTL from now.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = WireClaims {
            sub: subject.to_string(),
            exp: Some((now + self.ttl).timestamp()),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &WireClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Malformed(format!("failed to sign token: {}", e)))
    }

    /// Verifies a token against the current wall clock.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token as if the current time were `now`.
    ///
    /// The signature and algorithm are checked before any claim is read.
    /// Expiry is strict: a token is rejected once `now >= exp`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        // Expiry is enforced below with our own clock, so jsonwebtoken only
        // checks structure, algorithm and signature.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::new();

        let data = decode::<WireClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;

        let exp = data.claims.exp.ok_or(TokenError::MissingClaim)?;
        if now.timestamp() >= exp {
            return Err(TokenError::Expired);
        }

        Ok(Claims {
            sub: data.claims.sub,
            exp,
        })
    }
}
