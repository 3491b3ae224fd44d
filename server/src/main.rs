//! Inventory tracker server: loads settings, prepares the database, serves the item pages.
//!
//! Run from repo root: `cargo run -p inventory-server`

use inventory_tracker::{apply_schema, build_app, connect, log_routes, AppState, Settings, Templates, ITEM_TABLE};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.default_log_filter())),
        )
        .init();

    let pool = connect(&settings.database_url, settings.db_max_connections).await?;
    apply_schema(&pool, &ITEM_TABLE).await?;

    let state = AppState::new(pool, Templates::new()?, settings.cookie_key()?);
    let app = build_app(state, &settings);
    if settings.debug {
        log_routes();
    }

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("inventory tracker listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
