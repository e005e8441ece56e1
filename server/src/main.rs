// server/src/main.rs

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web as actix_data, App, HttpServer};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

use shizuka_server::config::AppConfig;
use shizuka_server::state::AppState;
use shizuka_server::{db, web};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting Shizuka storefront server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      panic!("Configuration error: {}", e);
    }
  };

  let db_pool = match db::init_pool(&app_config.database_url).await {
    Ok(pool) => {
      tracing::info!("Successfully connected to the database.");
      pool
    }
    Err(e) => {
      tracing::error!(error = %e, "Failed to connect to the database.");
      panic!("Database connection error: {}", e);
    }
  };

  if let Err(e) = db::run_migrations(&db_pool).await {
    tracing::error!(error = %e, "Failed to apply database migrations.");
    panic!("Migration error: {}", e);
  }

  if app_config.seed_db {
    if let Err(e) = db::seed_products(&db_pool).await {
      tracing::error!(error = %e, "Failed to seed the catalog.");
    }
  }

  let app_state = AppState {
    db_pool: db_pool.clone(),
    config: app_config.clone(),
  };

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      // The storefront SPA is served from another origin in development.
      .wrap(Cors::permissive())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
