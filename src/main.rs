use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod calendar;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;


use crate::{
    config::Config,
    db::{delivery_store::DeliveryStore, note_store::NoteStore},
    handlers::AppState,
    services::{GenerationService, NotificationService},
};

// Multi-threaded runtime: every request is its own task, and the outbound
// generation call only parks its own task while it waits.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "delivery_desk=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Invalid configuration")?;

    let pool = db::init_db_pool(&config.database_url)
        .await
        .context("Failed to open database")?;

    let notifications = Arc::new(NotificationService::new(config.notification_log.clone()));
    let generator = GenerationService::new(
        config.generator_url.clone(),
        config.generator_model.clone(),
        config.generator_timeout,
    )
    .context("Failed to build generation client")?;

    let state = AppState {
        deliveries: Arc::new(DeliveryStore::new(
            pool.clone(),
            notifications.clone(),
            config.delivery_options(),
        )),
        notes: Arc::new(NoteStore::new(pool)),
        generator: Arc::new(generator),
    };

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!(
        "Notifications are appended to {}",
        notifications.path().display()
    );

    axum::serve(listener, handlers::router(state)).await?;

    Ok(())
}
