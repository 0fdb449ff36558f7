//! Server configuration: environment settings and the runtime bundle.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use backend::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Settings loaded from CLI flags, environment, and config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RELIEF")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Socket address the HTTP listener binds to.
    #[ortho_config(default = "0.0.0.0:8080".to_string())]
    pub bind_addr: String,
    /// Maximum connections held by the database pool.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Require HTTPS for the session cookie.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
}

impl AppSettings {
    /// Parse the configured bind address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        self.bind_addr
            .parse()
            .map_err(|err| std::io::Error::other(format!("invalid bind address: {err}")))
    }

    /// Path to the session key file, with the conventional default.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("/var/run/secrets/session_key"))
    }
}

/// Runtime bundle handed to the server factory.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        db_pool: DbPool,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool,
        }
    }
}
