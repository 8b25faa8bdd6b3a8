use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;
use dotenvy::dotenv;

mod api;
mod config;
mod db;
mod docs;
mod model;
mod models;
mod routes;
mod state;
mod stats;
mod store;
mod utils;
mod view;

use config::Config;
use state::{DashboardState, RefreshError};
use store::IncomeStore;

use crate::docs::ApiDoc;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Income dashboard is running"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env().context("Invalid configuration")?;

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let store = IncomeStore::from_config(&config).await?;
    info!(backend = store.backend_name(), "Record store ready");

    let state = Data::new(DashboardState::new(store));
    let state_for_initial_load = state.clone();

    // Clone values for the closure (avoid move issues)
    let server_addr = config.server_addr.clone();

    actix_web::rt::spawn(async move {
        match state_for_initial_load.refresh().await {
            Ok(snapshot) => log::info!(
                "Initial income load complete: {} records",
                snapshot.records.len()
            ),
            Err(RefreshError::InProgress) => warn!("Initial income load skipped: already loading"),
            // already logged by the state
            Err(RefreshError::Store(_)) => {}
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(state.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, &config))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
