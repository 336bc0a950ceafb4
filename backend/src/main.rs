//! Statistics service entry-point: loads settings, prepares storage, and
//! serves the hit and stats endpoints.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use stats_backend::config::StatsSettings;
use stats_backend::inbound::http::health::HealthState;
use stats_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = StatsSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(bind_addr);

    if let Some(url) = settings.database_url() {
        if settings.run_migrations() {
            run_migrations(url).await.map_err(std::io::Error::other)?;
        } else {
            info!("skipping database migrations");
        }
        let max_size = settings.pool_max_size().map_err(std::io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(max_size))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
