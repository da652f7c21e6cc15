/// Request-identity resolution
///
/// Per-request gateway contract: a missing authorization header yields an
/// anonymous [`Identity`]; a present header must carry a valid bearer
/// credential or the whole request fails before any operation logic runs.
/// The two cases are deliberately asymmetric — anonymity is tolerated,
/// a bad token never is.
///
/// Both `authorization: Bearer <token>` and `authorization: <token>` are
/// accepted; the `"Bearer "` prefix strip is conditional, not mandatory.

use uuid::Uuid;

use super::token::{TokenCodec, TokenError};

/// The identity attached to a request after the boundary check
///
/// Inserted into axum request extensions by the API server's identity
/// layer; handlers that need a caller extract the user id from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity(Option<Uuid>);

impl Identity {
    /// An anonymous context (no authorization header was sent)
    pub fn anonymous() -> Self {
        Self(None)
    }

    /// An authenticated context bound to `user_id`
    pub fn user(user_id: Uuid) -> Self {
        Self(Some(user_id))
    }

    /// The resolved user id, if any
    pub fn user_id(&self) -> Option<Uuid> {
        self.0
    }

    /// True when no identity was presented
    pub fn is_anonymous(&self) -> bool {
        self.0.is_none()
    }
}

/// Resolves an identity from the raw authorization header value
///
/// - `None` (header absent) resolves to [`Identity::anonymous`]
/// - `Some(value)` strips a literal `"Bearer "` prefix if present and
///   verifies the remainder with the codec
///
/// # Errors
///
/// Propagates the codec's [`TokenError`] for a present-but-invalid
/// credential; the caller must treat this as a hard request failure.
pub fn authenticate_header(
    codec: &TokenCodec,
    header: Option<&str>,
) -> Result<Identity, TokenError> {
    let Some(raw) = header else {
        return Ok(Identity::anonymous());
    };

    let token = raw.strip_prefix("Bearer ").unwrap_or(raw);
    let user_id = codec.verify(token)?;

    Ok(Identity::user(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret-key-at-least-32-bytes-long", Duration::hours(1))
    }

    #[test]
    fn test_missing_header_is_anonymous() {
        let identity = authenticate_header(&codec(), None).expect("Should resolve");
        assert!(identity.is_anonymous());
        assert_eq!(identity.user_id(), None);
    }

    #[test]
    fn test_bearer_prefixed_header() {
        let codec = codec();
        let user_id = Uuid::new_v4();
        let token = codec.issue(user_id).expect("Should issue token");

        let identity = authenticate_header(&codec, Some(&format!("Bearer {}", token)))
            .expect("Should resolve");

        assert_eq!(identity.user_id(), Some(user_id));
    }

    #[test]
    fn test_bare_token_header() {
        let codec = codec();
        let user_id = Uuid::new_v4();
        let token = codec.issue(user_id).expect("Should issue token");

        // No "Bearer " prefix; the strip is conditional
        let identity = authenticate_header(&codec, Some(&token)).expect("Should resolve");

        assert_eq!(identity.user_id(), Some(user_id));
    }

    #[test]
    fn test_invalid_token_is_a_hard_error() {
        let result = authenticate_header(&codec(), Some("Bearer garbage"));
        assert!(result.is_err());

        let result = authenticate_header(&codec(), Some(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let other = TokenCodec::new("another-secret-also-32-bytes-long!!!!!", Duration::hours(1));
        let token = other.issue(Uuid::new_v4()).expect("Should issue token");

        let result = authenticate_header(&codec(), Some(&format!("Bearer {}", token)));
        assert!(result.is_err());
    }
}
