//! Backend entry-point: wires the claims REST API and OpenAPI docs.

use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::domain::AdminProvisioner;
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
use backend::outbound::SaltedSha256Hasher;

mod server;

use server::{create_server, AppSettings, ServerConfig};

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

    let settings =
        AppSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;

    let key_path = settings.session_key_file();
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev =
                std::env::var("RELIEF_SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path.display(), error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {}: {e}",
                    key_path.display()
                )));
            }
        }
    };

    let database_url = settings
        .database_url
        .clone()
        .ok_or_else(|| std::io::Error::other("RELIEF_DATABASE_URL is required"))?;
    let pool_config = PoolConfig::new(database_url).with_max_size(settings.pool_max_size);
    let db_pool = DbPool::new(pool_config)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    provision_admin(&db_pool).await?;

    let bind_addr = settings.bind_addr()?;
    let config = ServerConfig::new(key, settings.cookie_secure, SameSite::Lax, bind_addr, db_pool);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(addr = %bind_addr, "listening");
    server.await
}

/// Ensure the built-in administrator account exists before serving traffic.
async fn provision_admin(pool: &DbPool) -> std::io::Result<()> {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let hasher = Arc::new(SaltedSha256Hasher);
    let provisioner = AdminProvisioner::new(users, hasher);
    provisioner
        .ensure_admin()
        .await
        .map_err(|err| std::io::Error::other(format!("admin provisioning failed: {err}")))?;
    Ok(())
}
