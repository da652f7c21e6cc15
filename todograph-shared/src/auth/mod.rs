/// Authentication utilities
///
/// This module provides the authentication primitives for Todograph:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`token`]: issuing and verifying the signed bearer credential
/// - [`identity`]: resolving a request's identity from its authorization header
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Bearer Tokens**: HS256-signed user-id claims with configurable expiry
/// - **Constant-time Comparison**: password verification never short-circuits

pub mod identity;
pub mod password;
pub mod token;
