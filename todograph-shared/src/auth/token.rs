/// Bearer token codec
///
/// The codec turns a user id into an opaque signed credential and back.
/// Both the Auth and Todo services stay ignorant of the signing mechanism;
/// swapping the trust scheme means swapping this type and nothing else.
///
/// Tokens are HS256-signed JWTs carrying `{ sub, iss, iat, exp }`. The
/// signing secret is injected at construction (sourced from configuration,
/// never a process-wide constant), and every byte of a token is covered by
/// the signature: any mutation fails verification.
///
/// # Example
///
/// ```
/// use todograph_shared::auth::token::TokenCodec;
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let codec = TokenCodec::new("secret-key-at-least-32-bytes-long!!", Duration::hours(720));
/// let user_id = Uuid::new_v4();
///
/// let token = codec.issue(user_id)?;
/// assert_eq!(codec.verify(&token)?, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer pinned into every token and checked on verification
pub const ISSUER: &str = "todograph";

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to encode token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Signature did not validate or the payload is malformed
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// JWT claims carried by a bearer token
///
/// `sub` is the authenticated user id; the rest are standard bookkeeping
/// claims validated by [`TokenCodec::verify`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Issuer - always "todograph"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Issues and verifies bearer tokens with a construction-injected secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    /// Creates a codec from a signing secret and a token time-to-live
    ///
    /// The secret should be at least 32 bytes; configuration loading
    /// enforces that before this is ever called.
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issues a signed token bound to `user_id`
    ///
    /// # Errors
    ///
    /// Returns `TokenError::CreateError` if encoding fails
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let header = Header::new(Algorithm::HS256);
        let token = encode(&header, &claims, &self.encoding)
            .map_err(|e| TokenError::CreateError(format!("Token encoding failed: {}", e)))?;

        tracing::debug!(user_id = %user_id, "token issued");
        Ok(token)
    }

    /// Verifies a token and extracts the user id it is bound to
    ///
    /// Checks the signature, the issuer, and the expiration time. A token
    /// signed with a different secret or tampered in any byte fails.
    ///
    /// # Errors
    ///
    /// - `TokenError::Expired` if the token is past its `exp` claim
    /// - `TokenError::Invalid` for any other validation failure
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.validate_exp = true;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(format!("Token validation failed: {}", e)),
            }
        })?;

        tracing::debug!(user_id = %data.claims.sub, "token verified");
        Ok(data.claims.sub)
    }
}
