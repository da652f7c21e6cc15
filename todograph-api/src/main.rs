//! # Todograph API Server
//!
//! Single-endpoint task-management API: email/password accounts, bearer
//! tokens, and per-user todo CRUD behind named query/mutation operations.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p todograph-api
//! ```

use std::sync::Arc;

use chrono::Duration;
use todograph_api::{
    app::{build_router, AppState},
    config::Config,
};
use todograph_shared::{
    auth::token::TokenCodec,
    db::pool::{create_pool, DatabaseConfig},
    store::postgres::{PgTodoStore, PgUserStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todograph_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Todograph API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    sqlx::migrate!("../migrations").run(&pool).await?;

    let codec = TokenCodec::new(
        &config.jwt.secret,
        Duration::hours(config.jwt.token_ttl_hours),
    );

    let state = AppState::new(
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(PgTodoStore::new(pool)),
        Arc::new(codec),
        config,
    );

    let app = build_router(state);

    tracing::info!("Server listening on http://{}", bind_address);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
