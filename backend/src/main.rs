//! Backend entry-point: loads settings, prepares persistence and serves the
//! REST API with its OpenAPI docs.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use academy::inbound::http::health::HealthState;
use academy::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use academy::settings::{AppSettings, BuildMode};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load settings")?;
    let mode = BuildMode::from_debug_assertions();
    let bind_addr = settings.bind_addr()?;
    let jwt_secret = settings.jwt_secret(mode)?;

    let mut config = ServerConfig::new(bind_addr, jwt_secret)
        .with_request_timeout(settings.request_timeout())
        .with_token_ttl(settings.token_ttl())
        .with_bcrypt_cost(settings.bcrypt_cost());

    if let Some(url) = settings.database_url() {
        run_migrations(url)
            .await
            .wrap_err("failed to apply database migrations")?;
        let pool = DbPool::new(
            PoolConfig::new(url).with_max_size(settings.db_max_connections()),
        )
        .await
        .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "academy server listening");
    server.await?;
    Ok(())
}
