//! Driving ports for account authentication and the admin directory.
//!
//! Inbound adapters call these use-cases without knowing which repositories,
//! hashers or token signers sit behind them.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{
    Account, AccountFilter, AccountId, AccountPatch, Error, LoginCredentials, LoginOutcome,
    Registration, Role,
};

/// Self-service registration and login.
#[async_trait]
pub trait AccountAuth: Send + Sync {
    /// Create an account holding `role`.
    async fn register(&self, registration: Registration, role: Role) -> Result<Account, Error>;

    /// Check credentials and issue a token.
    ///
    /// When `expected_role` is set, an account holding a different role is
    /// reported as not found.
    async fn login(
        &self,
        credentials: LoginCredentials,
        expected_role: Option<Role>,
    ) -> Result<LoginOutcome<Account>, Error>;
}

/// Administrative account management.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Create an account on behalf of someone else.
    async fn create(&self, registration: Registration, role: Role) -> Result<Account, Error>;

    /// Filtered, paginated listing, most recent first.
    async fn list(&self, filter: AccountFilter, page: PageRequest) -> Result<Page<Account>, Error>;

    /// Fetch one account.
    async fn get(&self, id: AccountId) -> Result<Account, Error>;

    /// Apply a partial update.
    async fn update(&self, id: AccountId, patch: AccountPatch) -> Result<Account, Error>;

    /// Hard-delete an account and its enrollments.
    async fn delete(&self, id: AccountId) -> Result<Account, Error>;
}
