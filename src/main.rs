use std::{sync::Arc, time::Duration};

use book_catalog::{
    config::Config,
    db,
    routes::{create_router, AppState},
    services::{auth, HttpSummaryClient, TokenIssuer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("book_catalog=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    db::run_migrations(&pool).await?;
    tracing::info!("Database ready");

    let store = Arc::new(db::PgStore::new(pool));

    match &config.default_password {
        Some(password) => {
            auth::ensure_default_user(store.as_ref(), &config.default_username, password).await?;
        }
        None => tracing::warn!(
            username = %config.default_username,
            "DEFAULT_PASSWORD not set, skipping default user seeding"
        ),
    }

    let summarizer = HttpSummaryClient::new(
        &config.summary_service_url,
        Duration::from_secs(config.summary_timeout_secs),
    )?;

    let state = AppState::new(
        store.clone(),
        store,
        Arc::new(summarizer),
        TokenIssuer::new(&config.jwt_secret, config.jwt_expiry_minutes),
    );

    let app = create_router(state, Duration::from_secs(config.request_timeout_secs));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
