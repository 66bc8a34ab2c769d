//! Port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::{PasswordHash, RawPassword};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Hashing or verification could not run.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Hashes new passwords and checks login attempts against stored hashes.
///
/// Implementations are expected to be CPU-heavy and must not block the async
/// executor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a validated password.
    async fn hash(&self, password: &RawPassword) -> Result<PasswordHash, PasswordHasherError>;

    /// Compare a login attempt with a stored hash.
    async fn verify(
        &self,
        password: &RawPassword,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError>;
}
