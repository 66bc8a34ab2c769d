//! Server settings loaded via OrthoConfig.
//!
//! Values come from `ACADEMY_*` environment variables or matching CLI flags.
//! Secrets are validated against the build mode: debug builds tolerate a
//! missing JWT secret and generate an ephemeral one, release builds refuse to
//! start without it.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use crate::outbound::security::{JwtSecret, MAX_COST, MIN_COST};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_BCRYPT_COST: u32 = 10;
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
/// Minimum accepted length of a configured JWT secret in bytes.
pub const JWT_SECRET_MIN_LEN: usize = 32;

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to ephemeral secrets with a warning.
    Debug,
    /// Release builds require every secret to be configured.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    /// ```
    /// use academy::settings::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while validating settings.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The bind address does not parse as `host:port`.
    #[error("invalid bind address '{value}'; expected host:port")]
    InvalidBindAddr { value: String },
    /// Release builds need an explicit JWT secret.
    #[error("ACADEMY_JWT_SECRET must be set in release builds")]
    MissingJwtSecret,
    /// The configured JWT secret is too short to sign tokens safely.
    #[error("JWT secret too short: need >= {min_len} bytes, got {length}")]
    JwtSecretTooShort { length: usize, min_len: usize },
}

/// Configuration values for the academy server.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACADEMY")]
pub struct AppSettings {
    /// Socket address to listen on.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. In-memory adapters are used when absent.
    pub database_url: Option<String>,
    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: Option<String>,
    /// bcrypt work factor.
    #[ortho_config(default = DEFAULT_BCRYPT_COST)]
    pub bcrypt_cost: Option<u32>,
    /// Bearer token lifetime in seconds.
    #[ortho_config(default = DEFAULT_TOKEN_TTL_SECS)]
    pub token_ttl_secs: Option<u64>,
    /// Per-request deadline in seconds.
    #[ortho_config(default = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: Option<u64>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = DEFAULT_DB_MAX_CONNECTIONS)]
    pub db_max_connections: Option<u32>,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("db_max_connections", &self.db_max_connections)
            .finish()
    }
}

impl AppSettings {
    /// Parsed listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
            })
    }

    /// Configured database URL, ignoring blank values.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// bcrypt cost, clamped into the range bcrypt accepts.
    #[must_use]
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
            .unwrap_or(DEFAULT_BCRYPT_COST)
            .clamp(MIN_COST, MAX_COST)
    }

    /// Bearer token lifetime.
    #[must_use]
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS).max(1))
    }

    /// Deadline applied to each request.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
                .max(1),
        )
    }

    /// Maximum pooled database connections.
    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
            .max(1)
    }

    /// Resolve the token signing secret for the given build mode.
    ///
    /// # Errors
    ///
    /// Release builds fail when the secret is absent or shorter than
    /// [`JWT_SECRET_MIN_LEN`] bytes.
    pub fn jwt_secret(&self, mode: BuildMode) -> Result<JwtSecret, SettingsError> {
        match self.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) if secret.len() >= JWT_SECRET_MIN_LEN => {
                Ok(JwtSecret::new(secret.as_bytes().to_vec()))
            }
            Some(secret) => {
                if mode.is_debug() {
                    warn!(
                        length = secret.len(),
                        min_len = JWT_SECRET_MIN_LEN,
                        "JWT secret shorter than recommended (dev only)"
                    );
                    Ok(JwtSecret::new(secret.as_bytes().to_vec()))
                } else {
                    Err(SettingsError::JwtSecretTooShort {
                        length: secret.len(),
                        min_len: JWT_SECRET_MIN_LEN,
                    })
                }
            }
            None => {
                if mode.is_debug() {
                    warn!("ACADEMY_JWT_SECRET not set; using ephemeral secret (dev only)");
                    Ok(JwtSecret::generate())
                } else {
                    Err(SettingsError::MissingJwtSecret)
                }
            }
        }
    }
}
