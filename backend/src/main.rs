//! Backend entry-point: loads settings, wires the library services and
//! serves the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use library_backend::inbound::http::health::HealthState;
use server::{ServerConfig, ServerSettings, build_http_state, create_server, seed_demo_data};

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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = ServerConfig::new(settings.bind_addr()?).with_bcrypt_cost(settings.bcrypt_cost());

    if settings.seed_demo_data {
        let state = build_http_state(&config);
        seed_demo_data(&state)
            .await
            .map_err(|e| std::io::Error::other(format!("failed to seed demo data: {e}")))?;
    }

    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %config.bind_addr(), "starting library backend");
    let server = create_server(health_state, config)?;
    server.await
}
