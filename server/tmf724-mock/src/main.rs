//! Binary entrypoint for the TMF724 mock server.

use std::sync::Arc;

use sqlx_postgres::PgPoolOptions;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tmf724_mock::{AppState, Config, StoreKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = Config::from_env()?;

  let state = match config.store {
    StoreKind::Memory => AppState::in_memory(),
    StoreKind::Postgres => {
      let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_lazy_with(config.database.connect_options()?);
      AppState::postgres(pool)
    }
  };

  // Not retried; store calls surface as 500s until the tables exist.
  if let Err(e) = state.prepare().await {
    error!(error = %e, "database connection error");
  }

  let backend = state.backend();
  let app = tmf724_mock::router(Arc::new(state));

  let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
  info!(
    store = backend,
    "TMF724 API server running at http://{}",
    listener.local_addr()?
  );

  axum::serve(listener, app).await?;

  Ok(())
}
