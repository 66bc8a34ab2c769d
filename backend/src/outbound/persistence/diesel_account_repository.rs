//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is enforced by the `accounts_email_key` index; a clash
//! surfaces as [`AccountRepositoryError::DuplicateEmail`]. Deleting an
//! account cascades its enrollments through the foreign key.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, AccountFilter, AccountId, Email, StoredAccount};

use super::diesel_helpers::{
    contains_pattern, is_unique_violation, map_diesel_error, map_pool_error, total, window,
};
use super::models::{AccountRow, AccountUpdate, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel-backed implementation of the `AccountRepository` port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> AccountRepositoryError {
    map_pool_error(error, AccountRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    map_diesel_error(
        error,
        AccountRepositoryError::query,
        AccountRepositoryError::connection,
    )
}

fn write_error(error: diesel::result::Error, email: &Email) -> AccountRepositoryError {
    if is_unique_violation(&error) {
        AccountRepositoryError::duplicate_email(email.to_string())
    } else {
        diesel_error(error)
    }
}

fn to_stored(row: AccountRow) -> Result<StoredAccount, AccountRepositoryError> {
    row.into_stored().map_err(AccountRepositoryError::query)
}

fn filtered(filter: &AccountFilter) -> accounts::BoxedQuery<'static, Pg> {
    let mut query = accounts::table.into_boxed();
    if let Some(id) = filter.id {
        query = query.filter(accounts::id.eq(*id.as_uuid()));
    }
    if let Some(role) = filter.role {
        query = query.filter(accounts::role.eq(role.as_str()));
    }
    if let Some(pattern) = contains_pattern(filter.name.as_deref()) {
        query = query.filter(accounts::name.ilike(pattern));
    }
    if let Some(pattern) = contains_pattern(filter.email.as_deref()) {
        query = query.filter(accounts::email.ilike(pattern));
    }
    query
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: &StoredAccount) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(accounts::table)
            .values(NewAccountRow::from(account))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| write_error(err, &account.account.email))
    }

    async fn find_by_id(
        &self,
        id: &AccountId,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<AccountRow> = accounts::table
            .find(id.as_uuid())
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(to_stored).transpose()
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<AccountRow> = accounts::table
            .filter(accounts::email.eq(email.to_string()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(to_stored).transpose()
    }

    async fn find_many(&self, ids: &[AccountId]) -> Result<Vec<Account>, AccountRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<AccountRow> = accounts::table
            .filter(accounts::id.eq_any(uuids))
            .select(AccountRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter()
            .map(|row| to_stored(row).map(|stored| stored.account))
            .collect()
    }

    async fn list(
        &self,
        filter: &AccountFilter,
        page: PageRequest,
    ) -> Result<Page<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let count: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        let (offset, limit) = window(page);
        let rows: Vec<AccountRow> = filtered(filter)
            .order((accounts::created_at.desc(), accounts::seq.desc()))
            .offset(offset)
            .limit(limit)
            .select(AccountRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        let items = rows
            .into_iter()
            .map(|row| to_stored(row).map(|stored| stored.account))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(total(count), items))
    }

    async fn update(&self, account: &StoredAccount) -> Result<bool, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(accounts::table.find(account.account.id.as_uuid()))
            .set(AccountUpdate::from(account))
            .execute(&mut conn)
            .await
            .map_err(|err| write_error(err, &account.account.email))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<AccountRow> = diesel::delete(accounts::table.find(id.as_uuid()))
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(|row| to_stored(row).map(|stored| stored.account))
            .transpose()
    }
}
