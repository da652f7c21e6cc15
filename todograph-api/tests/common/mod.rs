/// Common test utilities for integration tests
///
/// Provides the shared infrastructure for driving the full router in
/// tests: in-memory implementations of the store contracts (so no
/// database is needed), a TestContext wiring them into the real app,
/// and helpers for issuing named operations.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::Service as _;
use uuid::Uuid;

use todograph_api::app::{build_router, AppState};
use todograph_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use todograph_shared::auth::token::TokenCodec;
use todograph_shared::models::{CreateTodo, CreateUser, Todo, UpdateTodo, User};
use todograph_shared::store::{StoreError, TodoStore, UserStore};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// In-memory user store
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, data: CreateUser) -> Result<User, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == data.email) {
            return Err(StoreError::Duplicate("email"));
        }
        let user = User {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let removed = rows.len() as u64;
        rows.clear();
        Ok(removed)
    }
}

/// In-memory todo store; insertion order doubles as creation order
#[derive(Default)]
pub struct MemoryTodoStore {
    rows: Mutex<Vec<Todo>>,
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn create(&self, data: CreateTodo) -> Result<Todo, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let todo = Todo {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            task: data.task,
            description: data.description,
            is_done: false,
            created_at: Utc::now(),
        };
        rows.push(todo.clone());
        Ok(todo)
    }

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> Result<Option<Todo>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|t| t.id == id && t.user_id == owner)
            .cloned())
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Todo>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|t| t.user_id == owner).cloned().collect())
    }

    async fn update(&self, id: Uuid, changes: UpdateTodo) -> Result<Option<Todo>, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(todo) = rows.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(task) = changes.task {
            todo.task = task;
        }
        if let Some(description) = changes.description {
            todo.description = description;
        }
        if let Some(is_done) = changes.is_done {
            todo.is_done = is_done;
        }
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() < before)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let removed = rows.len() as u64;
        rows.clear();
        Ok(removed)
    }
}

/// Test context: the real router over in-memory stores
pub struct TestContext {
    pub app: axum::Router,
    pub codec: TokenCodec,
}

impl TestContext {
    pub fn new() -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "postgresql://unused".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
                token_ttl_hours: 24,
            },
        };

        let codec = TokenCodec::new(TEST_SECRET, Duration::hours(24));

        let state = AppState::new(
            Arc::new(MemoryUserStore::default()),
            Arc::new(MemoryTodoStore::default()),
            Arc::new(codec.clone()),
            config,
        );

        Self {
            app: build_router(state),
            codec,
        }
    }
}

/// Executes one named operation against the router
///
/// `auth_header` is the raw authorization header value (with or without
/// the "Bearer " prefix), or None to send no header at all.
pub async fn call_op(
    ctx: &TestContext,
    auth_header: Option<&str>,
    operation: &str,
    variables: Value,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header("content-type", "application/json");

    if let Some(value) = auth_header {
        builder = builder.header("authorization", value);
    }

    let request = builder
        .body(Body::from(
            json!({
                "operationName": operation,
                "variables": variables,
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };

    (status, body)
}

/// Registers a user and returns their bearer token
pub async fn sign_up(ctx: &TestContext, name: &str, email: &str, password: &str) -> String {
    let (status, body) = call_op(
        ctx,
        None,
        "signUpUser",
        json!({ "name": name, "email": email, "password": password }),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "sign-up failed: {}", body);
    body["data"]["signUpUser"]["token"]
        .as_str()
        .expect("token in sign-up response")
        .to_string()
}

/// Creates a todo and returns its id (looked up via getUser, since the
/// createTodo mutation returns only a confirmation string)
pub async fn create_todo(ctx: &TestContext, token: &str, task: &str, description: &str) -> Uuid {
    let (status, body) = call_op(
        ctx,
        Some(&format!("Bearer {}", token)),
        "createTodo",
        json!({ "task": task, "description": description }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", body);

    let (status, body) = call_op(
        ctx,
        Some(&format!("Bearer {}", token)),
        "getUser",
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let todos = body["data"]["getUser"]["todos"].as_array().unwrap();
    let created = todos
        .iter()
        .find(|t| t["task"] == task)
        .expect("created todo in list");
    created["id"].as_str().unwrap().parse().unwrap()
}
