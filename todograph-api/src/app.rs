/// Application state and router builder
///
/// This module defines the shared application state and builds the Axum
/// router. The router exposes exactly two surfaces: a public health check
/// and the single graph-query endpoint, with the identity layer applied to
/// the latter.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use chrono::Duration;
/// use todograph_api::{app::{build_router, AppState}, config::Config};
/// use todograph_shared::auth::token::TokenCodec;
/// use todograph_shared::db::pool::{create_pool, DatabaseConfig};
/// use todograph_shared::store::postgres::{PgTodoStore, PgUserStore};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     max_connections: config.database.max_connections,
///     ..Default::default()
/// })
/// .await?;
///
/// let codec = TokenCodec::new(&config.jwt.secret, Duration::hours(config.jwt.token_ttl_hours));
/// let state = AppState::new(
///     Arc::new(PgUserStore::new(pool.clone())),
///     Arc::new(PgTodoStore::new(pool)),
///     Arc::new(codec),
///     config,
/// );
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, routes};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use todograph_shared::{
    auth::{identity, token::TokenCodec},
    store::{TodoStore, UserStore},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; all
/// fields are Arc'd for cheap cloning. Stores are held behind their
/// traits so tests can substitute in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    /// User record store
    pub users: Arc<dyn UserStore>,

    /// Todo record store
    pub todos: Arc<dyn TodoStore>,

    /// Bearer token codec (secret injected from configuration)
    pub codec: Arc<TokenCodec>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(
        users: Arc<dyn UserStore>,
        todos: Arc<dyn TodoStore>,
        codec: Arc<TokenCodec>,
        config: Config,
    ) -> Self {
        Self {
            users,
            todos,
            codec,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health      # Health check (public)
/// └── /graphql     # Named-operation endpoint (identity layer applied)
/// ```
///
/// The identity layer resolves the authorization header before any
/// operation runs: no header means an anonymous context, a present but
/// invalid token fails the whole request.
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let graphql_routes = Router::new()
        .route("/graphql", post(routes::graphql::execute))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            identity_layer,
        ));

    Router::new()
        .merge(health_routes)
        .merge(graphql_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Identity resolution middleware
///
/// Attaches an [`identity::Identity`] to request extensions. A missing
/// authorization header proceeds anonymously; a malformed or invalid
/// token aborts the request here, before any operation-specific logic.
async fn identity_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let resolved = identity::authenticate_header(&state.codec, auth_header).map_err(|e| {
        tracing::warn!(error = %e, "rejected request with invalid token");
        ApiError::AuthenticationFailed("Authentication failed: invalid or expired token".to_string())
    })?;

    req.extensions_mut().insert(resolved);

    Ok(next.run(req).await)
}
