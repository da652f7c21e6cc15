/// Authentication operations
///
/// - `signUpUser`: register a new account and issue a token
/// - `signInUser`: authenticate an existing account and issue a token
///
/// Both are reachable anonymously; they are the only way to obtain the
/// bearer credential every todo operation requires.
///
/// # Errors
///
/// - `409 Conflict`: sign-up with an already-registered email
/// - `404 Not Found`: sign-in with an unknown email
/// - `401 Invalid Credential`: sign-in with a wrong password
/// - `422 Validation Error`: malformed email on sign-up

use serde::{Deserialize, Serialize};
use todograph_shared::{auth::password, models::CreateUser};
use tracing::{info, warn};
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// signUpUser variables
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpInput {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Email address, used as the login key
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Plaintext password; only its hash is ever stored
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// signInUser variables
///
/// No shape validation here: an email nobody registered answers
/// `NotFound` whatever it looks like.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInInput {
    /// Email address
    pub email: String,

    /// Plaintext password
    pub password: String,
}

/// Token payload returned by both mutations
#[derive(Debug, Serialize)]
pub struct TokenPayload {
    /// Signed bearer credential bound to the user's id
    pub token: String,
}

/// Registers a new user and returns a freshly issued token
///
/// Exactly one user row is written on success. Repeating the call with
/// the same email always fails with `Conflict` afterwards.
pub async fn sign_up_user(state: &AppState, input: SignUpInput) -> ApiResult<TokenPayload> {
    input.validate()?;

    // Check first for a friendly error; the unique index still backstops
    // the race where two registrations interleave
    if state.users.find_by_email(&input.email).await?.is_some() {
        warn!(email = %input.email, "sign-up with already-registered email");
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let password_hash = password::hash_password(&input.password)?;

    let user = state
        .users
        .create(CreateUser {
            name: input.name,
            email: input.email,
            password_hash,
        })
        .await?;

    let token = state.codec.issue(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(TokenPayload { token })
}

/// Authenticates a user and returns a token bound to their id
///
/// An unknown email and a wrong password are distinct failures: the
/// former is a lookup miss, the latter an invalid credential.
pub async fn sign_in_user(state: &AppState, input: SignInInput) -> ApiResult<TokenPayload> {
    let user = state
        .users
        .find_by_email(&input.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User does not exist".to_string()))?;

    let valid = password::verify_password(&input.password, &user.password_hash)?;
    if !valid {
        warn!(user_id = %user.id, "sign-in with incorrect password");
        return Err(ApiError::InvalidCredential("Password incorrect".to_string()));
    }

    let token = state.codec.issue(user.id)?;

    info!(user_id = %user.id, "user signed in");
    Ok(TokenPayload { token })
}
