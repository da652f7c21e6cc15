/// API route handlers
///
/// The graph-query endpoint dispatches to per-resource operation modules:
///
/// - `health`: health check endpoint
/// - `graphql`: named-operation dispatcher and response envelope
/// - `auth`: signUpUser / signInUser
/// - `todos`: createTodo / getTodoById / updateOrMarkTodo / deleteTodo
/// - `users`: getUser / getUsers / deleteUsersTodos

pub mod auth;
pub mod graphql;
pub mod health;
pub mod todos;
pub mod users;

use crate::error::ApiError;
use todograph_shared::auth::identity::Identity;
use uuid::Uuid;

/// Resolves the calling user or fails with `Unauthenticated`
///
/// Every todo operation requires an identity; an anonymous context is
/// rejected with the same message the browser client already expects.
pub(crate) fn require_user(identity: Identity) -> Result<Uuid, ApiError> {
    identity
        .user_id()
        .ok_or_else(|| ApiError::Unauthenticated("Unauthorized access. Please log in.".to_string()))
}
