//! Service entry-point: loads settings, prepares storage and serves the API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use foodgram::inbound::http::health::HealthState;
use foodgram::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use foodgram::settings::ServiceSettings;
use server::{ServerConfig, create_server};

/// Merge CLI flags, `FOODGRAM_*` variables and the config file.
fn load_settings(args: impl IntoIterator<Item = OsString>) -> std::io::Result<ServiceSettings> {
    ServiceSettings::load_from_iter(args).map_err(|err| std::io::Error::other(err.to_string()))
}

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

    let settings = load_settings(std::env::args_os())?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let limits = settings.recipe_limits().map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(bind_addr, limits);

    match settings.database_url.as_deref() {
        Some(database_url) => {
            if settings.run_migrations {
                run_pending_migrations(database_url)
                    .await
                    .map_err(std::io::Error::other)?;
            }
            let pool = DbPool::new(
                PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
            )
            .await
            .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None => info!("no database configured; serving fixture data"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
