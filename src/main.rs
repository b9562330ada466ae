use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use user_directory::config::AppConfig;
use user_directory::database::{self, store::UserStore};
use user_directory::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Starting user directory in {:?} mode", config.environment);

    // An unsigned token issuer is a configuration fault, not something to
    // discover on the first login request.
    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set in {:?} mode", config.environment);
    }

    let pool = database::connect(&config.database)
        .await
        .context("failed to open database")?;
    database::migrate(&pool).await.context("failed to migrate database")?;

    let state = AppState {
        config: Arc::new(config),
        store: UserStore::new(pool),
    };

    let bind_addr = format!("0.0.0.0:{}", state.config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("User directory listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
