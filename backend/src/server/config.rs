//! Server settings loaded via OrthoConfig, and the resolved server
//! configuration handed to [`super::create_server`].

use std::net::SocketAddr;
use std::sync::Arc;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use library_backend::outbound::credentials::DEFAULT_BCRYPT_COST;
use library_backend::outbound::persistence::InMemoryLibraryStore;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Values read from `LIBRARY_*` environment variables, configuration files
/// and the command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LIBRARY")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// bcrypt work factor for employee passwords.
    pub bcrypt_cost: Option<u32>,
    /// Load a small demonstration catalogue on startup.
    #[ortho_config(default = false)]
    pub seed_demo_data: bool,
}

impl ServerSettings {
    /// Resolve the listen address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`std::io::ErrorKind::InvalidInput`] when the configured value
    /// is not a socket address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw:?}: {err}"),
            )
        })
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) bcrypt_cost: u32,
    pub(crate) store: Arc<InMemoryLibraryStore>,
}

impl ServerConfig {
    /// Configuration over a fresh, empty store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            store: Arc::new(InMemoryLibraryStore::new()),
        }
    }

    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
