//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use academy::middleware::DEFAULT_REQUEST_TIMEOUT;
use academy::outbound::persistence::DbPool;
use academy::outbound::security::JwtSecret;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) request_timeout: Duration,
    pub(crate) jwt_secret: JwtSecret,
    pub(crate) token_ttl: Duration,
    pub(crate) bcrypt_cost: u32,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration with in-memory persistence.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, jwt_secret: JwtSecret) -> Self {
        Self {
            bind_addr,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            jwt_secret,
            token_ttl: Duration::from_secs(3600),
            bcrypt_cost: 10,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses the PostgreSQL repositories instead of
    /// the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Deadline applied to every request.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Lifetime of issued bearer tokens.
    #[must_use]
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// bcrypt work factor for new password hashes.
    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}
