//! Account registration, login and directory services.
//!
//! One service backs both the self-service auth port and the admin directory
//! port; both share the same uniqueness and hashing rules.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::{debug, info};

use crate::domain::ports::{
    AccountAuth, AccountDirectory, AccountRepository, PasswordHasher, TokenService,
};
use crate::domain::service_support::{
    DUPLICATE_EMAIL_MESSAGE, map_account_error, map_hasher_error, map_token_error,
};
use crate::domain::{
    AccessRole, Account, AccountFilter, AccountId, AccountPatch, Email, Error, LoginCredentials,
    LoginOutcome, Registration, Role, StoredAccount, TokenSubject,
};

const ACCOUNT_NOT_FOUND: &str = "account not found";

/// Account service implementing [`AccountAuth`] and [`AccountDirectory`].
#[derive(Clone)]
pub struct AccountService<R, H, T> {
    accounts: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<R, H, T> AccountService<R, H, T> {
    /// Create a new service over the given ports.
    pub fn new(accounts: Arc<R>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<R, H, T> AccountService<R, H, T>
where
    R: AccountRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn ensure_email_free(&self, email: &Email, owner: Option<AccountId>) -> Result<(), Error> {
        let existing = self
            .accounts
            .find_by_email(email)
            .await
            .map_err(map_account_error)?;
        match existing {
            Some(stored) if Some(stored.account.id) != owner => {
                Err(Error::duplicate_email(DUPLICATE_EMAIL_MESSAGE))
            }
            _ => Ok(()),
        }
    }

    async fn create_account(&self, registration: Registration, role: Role) -> Result<Account, Error> {
        let Registration {
            name,
            email,
            password,
        } = registration;
        self.ensure_email_free(&email, None).await?;

        let password_hash = self
            .hasher
            .hash(&password)
            .await
            .map_err(map_hasher_error)?;
        let now = self.clock.utc();
        let stored = StoredAccount {
            account: Account {
                id: AccountId::random(),
                name,
                email,
                role,
                created_at: now,
                updated_at: now,
            },
            password_hash,
        };

        self.accounts
            .insert(&stored)
            .await
            .map_err(map_account_error)?;
        info!(account_id = %stored.account.id, %role, "account created");
        Ok(stored.account)
    }

    async fn load(&self, id: &AccountId) -> Result<StoredAccount, Error> {
        self.accounts
            .find_by_id(id)
            .await
            .map_err(map_account_error)?
            .ok_or_else(|| Error::not_found(ACCOUNT_NOT_FOUND))
    }
}

#[async_trait]
impl<R, H, T> AccountAuth for AccountService<R, H, T>
where
    R: AccountRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn register(&self, registration: Registration, role: Role) -> Result<Account, Error> {
        self.create_account(registration, role).await
    }

    async fn login(
        &self,
        credentials: LoginCredentials,
        expected_role: Option<Role>,
    ) -> Result<LoginOutcome<Account>, Error> {
        let stored = self
            .accounts
            .find_by_email(&credentials.email)
            .await
            .map_err(map_account_error)?
            .ok_or_else(|| Error::not_found(ACCOUNT_NOT_FOUND))?;

        if expected_role.is_some_and(|role| role != stored.account.role) {
            debug!(
                account_id = %stored.account.id,
                role = %stored.account.role,
                "login through another role's route"
            );
            return Err(Error::not_found(ACCOUNT_NOT_FOUND));
        }

        let matches = self
            .hasher
            .verify(&credentials.password, &stored.password_hash)
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            return Err(Error::invalid_credentials("invalid email or password"));
        }

        let account = stored.account;
        let token = self
            .tokens
            .issue(&TokenSubject {
                subject: *account.id.as_uuid(),
                role: AccessRole::from(account.role),
                email: account.email.to_string(),
            })
            .map_err(map_token_error)?;
        info!(account_id = %account.id, role = %account.role, "account logged in");
        Ok(LoginOutcome {
            token,
            subject: account,
        })
    }
}

#[async_trait]
impl<R, H, T> AccountDirectory for AccountService<R, H, T>
where
    R: AccountRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn create(&self, registration: Registration, role: Role) -> Result<Account, Error> {
        self.create_account(registration, role).await
    }

    async fn list(&self, filter: AccountFilter, page: PageRequest) -> Result<Page<Account>, Error> {
        self.accounts
            .list(&filter, page)
            .await
            .map_err(map_account_error)
    }

    async fn get(&self, id: AccountId) -> Result<Account, Error> {
        self.load(&id).await.map(|stored| stored.account)
    }

    async fn update(&self, id: AccountId, patch: AccountPatch) -> Result<Account, Error> {
        let mut stored = self.load(&id).await?;
        let AccountPatch {
            name,
            email,
            password,
            role,
        } = patch;

        if let Some(email) = email {
            if email != stored.account.email {
                self.ensure_email_free(&email, Some(id)).await?;
            }
            stored.account.email = email;
        }
        if let Some(name) = name {
            stored.account.name = name;
        }
        if let Some(role) = role {
            stored.account.role = role;
        }
        if let Some(password) = password {
            stored.password_hash = self
                .hasher
                .hash(&password)
                .await
                .map_err(map_hasher_error)?;
        }
        stored.account.updated_at = self.clock.utc();

        let updated = self
            .accounts
            .update(&stored)
            .await
            .map_err(map_account_error)?;
        if !updated {
            return Err(Error::not_found(ACCOUNT_NOT_FOUND));
        }
        info!(account_id = %id, "account updated");
        Ok(stored.account)
    }

    async fn delete(&self, id: AccountId) -> Result<Account, Error> {
        let removed = self
            .accounts
            .delete(&id)
            .await
            .map_err(map_account_error)?
            .ok_or_else(|| Error::not_found(ACCOUNT_NOT_FOUND))?;
        info!(account_id = %id, "account deleted");
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
