//! bcrypt-backed `PasswordHasher` implementation.
//!
//! Hashing is CPU bound, so both operations run on tokio's blocking pool.

use async_trait::async_trait;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{PasswordHash, RawPassword};

/// Lowest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Password hasher using bcrypt at a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher, clamping `cost` into bcrypt's supported range.
    ///
    /// # Examples
    /// ```
    /// use academy::outbound::security::BcryptPasswordHasher;
    ///
    /// assert_eq!(BcryptPasswordHasher::new(99).cost(), 31);
    /// assert_eq!(BcryptPasswordHasher::new(1).cost(), 4);
    /// ```
    pub fn new(cost: u32) -> Self {
        let clamped = cost.clamp(MIN_COST, MAX_COST);
        if clamped != cost {
            warn!(requested = cost, applied = clamped, "bcrypt cost out of range");
        }
        Self { cost: clamped }
    }

    /// Cost factor applied to new hashes.
    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(10)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &RawPassword) -> Result<PasswordHash, PasswordHasherError> {
        let secret = Zeroizing::new(password.expose().to_owned());
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(secret.as_bytes(), cost))
            .await
            .map_err(|err| PasswordHasherError::hashing(format!("task join error: {err}")))?
            .map(PasswordHash::new)
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))
    }

    async fn verify(
        &self,
        password: &RawPassword,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let secret = Zeroizing::new(password.expose().to_owned());
        let encoded = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(secret.as_bytes(), &encoded))
            .await
            .map_err(|err| PasswordHasherError::hashing(format!("task join error: {err}")))?
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))
    }
}
