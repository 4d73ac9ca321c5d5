//! Session cookie and ID token handling.
//!
//! Both token kinds are HS256 JWTs. ID tokens come from the identity
//! provider's sign-in flow and are signed with `session.id_token_secret`;
//! session cookies are minted here and signed with `session.session_secret`.

use crate::error::AuthError;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use folio_config::SessionConfig;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by a session cookie. Inserted into request extensions by
/// the guard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Claims expected in an ID token presented at sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdTokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub admin: bool,
    pub exp: i64,
}

/// The identity service as seen by the Session Guard.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify a session cookie value and return its claims.
    async fn verify_session_cookie(&self, cookie: &str) -> Result<Claims, AuthError>;

    /// Exchange a verified ID token for a session cookie value.
    async fn create_session_cookie(&self, id_token: &str) -> Result<String, AuthError>;
}

#[derive(Clone)]
pub struct JwtIdentityProvider {
    session_encoding: EncodingKey,
    session_decoding: DecodingKey,
    id_token_decoding: DecodingKey,
    max_age_seconds: i64,
}

impl std::fmt::Debug for JwtIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIdentityProvider")
            .field("max_age_seconds", &self.max_age_seconds)
            .field("keys", &"[REDACTED]")
            .finish()
    }
}

impl JwtIdentityProvider {
    pub fn new(session_secret: &str, id_token_secret: &str, max_age_seconds: i64) -> Self {
        Self {
            session_encoding: EncodingKey::from_secret(session_secret.as_bytes()),
            session_decoding: DecodingKey::from_secret(session_secret.as_bytes()),
            id_token_decoding: DecodingKey::from_secret(id_token_secret.as_bytes()),
            max_age_seconds,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            &config.session_secret,
            &config.id_token_secret,
            config.max_age_seconds,
        )
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation
    }

    fn sign_session(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.session_encoding)
            .map_err(|e| AuthError::EncodingError(e.to_string()))
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn verify_session_cookie(&self, cookie: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(cookie, &self.session_decoding, &Self::validation())?;
        Ok(data.claims)
    }

    async fn create_session_cookie(&self, id_token: &str) -> Result<String, AuthError> {
        let id_claims =
            decode::<IdTokenClaims>(id_token, &self.id_token_decoding, &Self::validation())?
                .claims;

        let now = Utc::now();
        let claims = Claims {
            sub: id_claims.sub,
            email: id_claims.email,
            admin: id_claims.admin,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.max_age_seconds)).timestamp(),
        };
        self.sign_session(&claims)
    }
}

/// Signs an ID token the way the identity provider would. Used by tests and
/// local tooling.
pub fn issue_id_token(
    id_token_secret: &str,
    sub: &str,
    email: Option<&str>,
    admin: bool,
    ttl: Duration,
) -> Result<String, AuthError> {
    let claims = IdTokenClaims {
        sub: sub.to_string(),
        email: email.map(str::to_string),
        admin,
        exp: (Utc::now() + ttl).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(id_token_secret.as_bytes()),
    )
    .map_err(|e| AuthError::EncodingError(e.to_string()))
}
