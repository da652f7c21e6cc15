/// PostgreSQL store implementations
///
/// Thin sqlx wrappers over the `users` and `todos` tables. Each method is
/// a single statement; atomicity is the database's per-row guarantee.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreateTodo, CreateUser, Todo, UpdateTodo, User};

use super::{StoreError, TodoStore, UserStore};

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                // Unique constraint violations surface as Duplicate so the
                // service layer can answer with Conflict
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return StoreError::Duplicate("email");
                    }
                }
                StoreError::Database(format!("Database error: {}", db_err))
            }
            _ => StoreError::Database(format!("Database error: {}", err)),
        }
    }
}

/// User store backed by PostgreSQL
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, data: CreateUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(user_id = %user.id, "user row created");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

/// Todo store backed by PostgreSQL
#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn create(&self, data: CreateTodo) -> Result<Todo, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (user_id, task, description)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, task, description, is_done, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.task)
        .bind(data.description)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(todo_id = %todo.id, user_id = %todo.user_id, "todo row created");
        Ok(todo)
    }

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> Result<Option<Todo>, StoreError> {
        // Ownership is part of the lookup predicate, not a secondary check
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, user_id, task, description, is_done, created_at
            FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Todo>, StoreError> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, user_id, task, description, is_done, created_at
            FROM todos
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn update(&self, id: Uuid, changes: UpdateTodo) -> Result<Option<Todo>, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET task = COALESCE($2, task),
                description = COALESCE($3, description),
                is_done = COALESCE($4, is_done)
            WHERE id = $1
            RETURNING id, user_id, task, description, is_done, created_at
            "#,
        )
        .bind(id)
        .bind(changes.task)
        .bind(changes.description)
        .bind(changes.is_done)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM todos").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
