/// Todo model
///
/// A todo item owned by exactly one user. The owner is fixed at creation
/// and never reassigned; the task label must be non-empty after trimming,
/// enforced by the service layer before anything is persisted.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     task VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     is_done BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Todo record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique todo ID
    pub id: Uuid,

    /// Owning user, fixed at creation
    pub user_id: Uuid,

    /// Short required task label (non-empty after trimming)
    pub task: String,

    /// Optional longer text, defaults to empty
    pub description: String,

    /// Completion flag, false at creation
    pub is_done: bool,

    /// When the todo was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new todo
#[derive(Debug, Clone)]
pub struct CreateTodo {
    /// Owning user
    pub user_id: Uuid,

    /// Task label (already validated as non-empty)
    pub task: String,

    /// Longer text; empty string when the caller supplied none
    pub description: String,
}

/// Partial update of a todo: only `Some` fields are written
#[derive(Debug, Clone, Default)]
pub struct UpdateTodo {
    /// New task label
    pub task: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New completion flag
    pub is_done: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_serializes_camel_case() {
        let todo = Todo {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            task: "Buy milk".to_string(),
            description: String::new(),
            is_done: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&todo).unwrap();
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"isDone\":false"));
        assert!(json.contains("\"createdAt\""));
    }

    #[test]
    fn test_update_todo_default_is_empty() {
        let update = UpdateTodo::default();
        assert!(update.task.is_none());
        assert!(update.description.is_none());
        assert!(update.is_done.is_none());
    }
}
