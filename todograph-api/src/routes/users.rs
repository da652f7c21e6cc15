/// User queries and the administrative bulk delete
///
/// `getUser` is the caller's own profile with their todos; `getUsers` and
/// `deleteUsersTodos` are the administrative surfaces carried over from
/// the original API.

use serde::Serialize;
use todograph_shared::{
    auth::identity::Identity,
    models::{Todo, User},
};
use tracing::info;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::require_user,
};

/// A user together with the todos they own
#[derive(Debug, Serialize)]
pub struct UserWithTodos {
    /// The user record (password hash is never serialized)
    #[serde(flatten)]
    pub user: User,

    /// Owned todos, ordered by creation time
    pub todos: Vec<Todo>,
}

/// Returns the calling user and their todos
pub async fn get_user(state: &AppState, identity: Identity) -> ApiResult<UserWithTodos> {
    let user_id = require_user(identity)?;

    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let todos = state.todos.list_by_owner(user_id).await?;

    Ok(UserWithTodos { user, todos })
}

/// Returns all users along with their todos
pub async fn get_users(state: &AppState) -> ApiResult<Vec<UserWithTodos>> {
    let users = state.users.list().await?;

    let mut result = Vec::with_capacity(users.len());
    for user in users {
        let todos = state.todos.list_by_owner(user.id).await?;
        result.push(UserWithTodos { user, todos });
    }

    Ok(result)
}

/// Deletes every todo and every user
///
/// Administrative escape hatch; todos go first so the pass works even
/// without the cascade on `todos.user_id`.
pub async fn delete_users_todos(state: &AppState) -> ApiResult<&'static str> {
    let todos_removed = state.todos.delete_all().await?;
    let users_removed = state.users.delete_all().await?;

    info!(todos_removed, users_removed, "bulk delete completed");
    Ok("All Todos and Users have been deleted")
}
