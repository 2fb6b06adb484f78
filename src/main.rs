use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;
use dotenvy::dotenv;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod routes;
mod service;
mod store;
mod validation;

use config::Config;
use db::{init_db, run_migrations};

use crate::docs::ApiDoc;
use crate::service::{EmployeeRecordService, LeaveRequestRecordService, PhotoAssetStore};
use crate::store::MySqlStore;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "HR records service"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    if config.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to apply migrations")?;
        info!("Migrations applied");
    }

    let store = Arc::new(MySqlStore::new(pool));
    let photos = PhotoAssetStore::new(&config.photo_dir).with_max_bytes(config.max_photo_bytes);
    info!(photo_dir = %photos.root().display(), "Photo storage ready");

    let employees = Data::new(EmployeeRecordService::new(store.clone(), photos));
    let leaves = Data::new(LeaveRequestRecordService::new(store.clone(), store));

    let rate_limit = routes::rate_limit(config.rate_protected_per_min)?;
    let api_prefix = config.api_prefix.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(employees.clone())
            .app_data(leaves.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, &api_prefix, &rate_limit))
    })
    .bind(&config.server_addr)?
    .run()
    .await?;

    Ok(())
}
