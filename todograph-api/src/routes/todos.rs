/// Todo operations
///
/// All of these require a resolved identity; the lookup for a single todo
/// folds ownership into its predicate, so another user's todo answers
/// exactly like a nonexistent one.

use serde::Deserialize;
use todograph_shared::{
    auth::identity::Identity,
    models::{CreateTodo, Todo, UpdateTodo},
};
use tracing::info;
use uuid::Uuid;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    routes::require_user,
};

/// createTodo variables
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoInput {
    /// Required task label
    pub task: String,

    /// Optional longer text
    #[serde(default)]
    pub description: Option<String>,
}

/// getTodoById / deleteTodo variables
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoIdInput {
    /// Todo id
    pub id: Uuid,
}

/// updateOrMarkTodo variables
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrMarkInput {
    /// Todo to update
    pub todo_id: Uuid,

    /// New task label (ignored when `is_mark` is set)
    #[serde(default)]
    pub task: Option<String>,

    /// When true, flips the completion flag
    #[serde(default)]
    pub is_mark: Option<bool>,

    /// New description
    #[serde(default)]
    pub description: Option<String>,
}

/// Creates a todo owned by the caller
///
/// Returns the confirmation string the browser client shows verbatim.
pub async fn create_todo(
    state: &AppState,
    identity: Identity,
    input: CreateTodoInput,
) -> ApiResult<&'static str> {
    let user_id = require_user(identity)?;

    if input.task.trim().is_empty() {
        return Err(blank_task_error());
    }

    let todo = state
        .todos
        .create(CreateTodo {
            user_id,
            task: input.task,
            description: input.description.unwrap_or_default(),
        })
        .await?;

    info!(todo_id = %todo.id, user_id = %user_id, "todo created");
    Ok("Todo saved successfully!")
}

/// Fetches a single todo owned by the caller
pub async fn get_todo_by_id(
    state: &AppState,
    identity: Identity,
    input: TodoIdInput,
) -> ApiResult<Todo> {
    let user_id = require_user(identity)?;

    state
        .todos
        .find_owned(input.id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Todo with ID {} not found", input.id)))
}

/// The merged update/toggle protocol
///
/// Branch order is significant and must not change — the client relies
/// on it:
///
/// 1. miss on the ownership-folded lookup fails with `NotFound`;
/// 2. `isMark` set: the completion flag flips, a supplied description is
///    overwritten, and `task` is ignored entirely;
/// 3. otherwise a supplied `task` and/or `description` overwrites exactly
///    those fields, leaving the rest at their prior values;
/// 4. otherwise nothing was requested and the call fails with
///    `InvalidArgument` — there is no no-op update.
///
/// A text field counts as supplied only when non-empty. Concurrent calls
/// on the same todo race last-write-wins per field; there is no version
/// check.
pub async fn update_or_mark_todo(
    state: &AppState,
    identity: Identity,
    input: UpdateOrMarkInput,
) -> ApiResult<Todo> {
    let user_id = require_user(identity)?;

    let todo = state
        .todos
        .find_owned(input.todo_id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Todo with ID {} not found", input.todo_id)))?;

    let task = supplied(input.task);
    let description = supplied(input.description);

    let changes = if input.is_mark.unwrap_or(false) {
        UpdateTodo {
            task: None,
            description,
            is_done: Some(!todo.is_done),
        }
    } else if task.is_some() || description.is_some() {
        if let Some(t) = &task {
            if t.trim().is_empty() {
                return Err(blank_task_error());
            }
        }
        UpdateTodo {
            task,
            description,
            is_done: None,
        }
    } else {
        return Err(ApiError::InvalidArgument(
            "Invalid input for updating or marking Todo".to_string(),
        ));
    };

    let updated = state
        .todos
        .update(todo.id, changes)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Todo with ID {} not found", input.todo_id)))?;

    info!(todo_id = %updated.id, is_done = updated.is_done, "todo updated");
    Ok(updated)
}

/// Deletes a todo owned by the caller
pub async fn delete_todo(
    state: &AppState,
    identity: Identity,
    input: TodoIdInput,
) -> ApiResult<&'static str> {
    let user_id = require_user(identity)?;

    let todo = state
        .todos
        .find_owned(input.id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Todo with ID {} not found", input.id)))?;

    state.todos.delete(todo.id).await?;

    info!(todo_id = %todo.id, user_id = %user_id, "todo deleted");
    Ok("Todo deleted successfully!")
}

/// A text field is supplied only when non-empty
fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn blank_task_error() -> ApiError {
    ApiError::ValidationError(vec![ValidationErrorDetail {
        field: "task".to_string(),
        message: "Task must not be blank".to_string(),
    }])
}
