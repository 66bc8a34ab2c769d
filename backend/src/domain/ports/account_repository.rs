//! Port for account persistence.
//!
//! Adapters store accounts with their password hashes. Email addresses arrive
//! already normalised; adapters must still enforce their uniqueness and report
//! a clash as [`AccountRepositoryError::DuplicateEmail`].

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Account, AccountFilter, AccountId, Email, StoredAccount};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "account repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail { email: String } =>
            "email {email} is already registered",
    }
}

/// Port for account storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist a new account.
    async fn insert(&self, account: &StoredAccount) -> Result<(), AccountRepositoryError>;

    /// Fetch an account by id.
    async fn find_by_id(
        &self,
        id: &AccountId,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError>;

    /// Fetch an account by normalised email.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError>;

    /// Fetch every account whose id is listed. Unknown ids are skipped.
    async fn find_many(&self, ids: &[AccountId]) -> Result<Vec<Account>, AccountRepositoryError>;

    /// List accounts matching `filter`, most recently created first.
    async fn list(
        &self,
        filter: &AccountFilter,
        page: PageRequest,
    ) -> Result<Page<Account>, AccountRepositoryError>;

    /// Overwrite a stored account. Returns `false` when the id is unknown.
    async fn update(&self, account: &StoredAccount) -> Result<bool, AccountRepositoryError>;

    /// Remove an account and its enrollments, returning what was removed.
    async fn delete(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError>;
}
