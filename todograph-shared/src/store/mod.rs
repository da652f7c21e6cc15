/// Persistence contracts
///
/// The services depend on storage only through these two traits — a
/// minimal CRUD contract (find-by-id, find-by-unique-field, create,
/// update, delete). Each operation is atomic on its own; nothing here
/// requires multi-statement transactions. The production implementations
/// live in [`postgres`]; test harnesses substitute in-memory ones.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{CreateTodo, CreateUser, Todo, UpdateTodo, User};

pub mod postgres;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Unique-key violation (e.g. a duplicate email)
    #[error("Duplicate value for unique field: {0}")]
    Duplicate(&'static str),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(String),
}

/// Store for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user; fails with [`StoreError::Duplicate`] when the
    /// email is already taken
    async fn create(&self, data: CreateUser) -> Result<User, StoreError>;

    /// Finds a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Finds a user by its unique email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Lists all users, oldest first
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    /// Deletes every user; administrative escape hatch
    async fn delete_all(&self) -> Result<u64, StoreError>;
}

/// Store for todo records
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Persists a new todo
    async fn create(&self, data: CreateTodo) -> Result<Todo, StoreError>;

    /// Ownership-folded lookup: `None` when no todo with `id` exists that
    /// is owned by `owner`, so a non-owned todo is indistinguishable from
    /// a nonexistent one
    async fn find_owned(&self, id: Uuid, owner: Uuid) -> Result<Option<Todo>, StoreError>;

    /// All todos owned by `owner`, ordered by creation time
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Todo>, StoreError>;

    /// Writes only the supplied fields; returns the updated row, or `None`
    /// when the todo does not exist
    async fn update(&self, id: Uuid, changes: UpdateTodo) -> Result<Option<Todo>, StoreError>;

    /// Deletes a todo by id; true when a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Deletes every todo; administrative escape hatch
    async fn delete_all(&self) -> Result<u64, StoreError>;
}
