//! PostgreSQL-backed `EmployeeRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{EmployeeRepository, EmployeeRepositoryError};
use crate::domain::{
    Email, Employee, EmployeeFilter, EmployeeId, SalaryFilter, StoredEmployee,
};

use super::diesel_helpers::{
    contains_pattern, is_unique_violation, map_diesel_error, map_pool_error, total, window,
};
use super::models::EmployeeRow;
use super::pool::{DbPool, PoolError};
use super::schema::employees;

/// Diesel-backed implementation of the `EmployeeRepository` port.
#[derive(Clone)]
pub struct DieselEmployeeRepository {
    pool: DbPool,
}

impl DieselEmployeeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> EmployeeRepositoryError {
    map_pool_error(error, EmployeeRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> EmployeeRepositoryError {
    map_diesel_error(
        error,
        EmployeeRepositoryError::query,
        EmployeeRepositoryError::connection,
    )
}

fn write_error(error: diesel::result::Error, email: &Email) -> EmployeeRepositoryError {
    if is_unique_violation(&error) {
        EmployeeRepositoryError::duplicate_email(email.to_string())
    } else {
        diesel_error(error)
    }
}

fn filtered(filter: &EmployeeFilter) -> employees::BoxedQuery<'static, Pg> {
    let mut query = employees::table.into_boxed();
    if let Some(id) = filter.id {
        query = query.filter(employees::id.eq(*id.as_uuid()));
    }
    if let Some(pattern) = contains_pattern(filter.name.as_deref()) {
        query = query.filter(employees::name.ilike(pattern));
    }
    if let Some(pattern) = contains_pattern(filter.email.as_deref()) {
        query = query.filter(employees::email.ilike(pattern));
    }
    if let Some(pattern) = contains_pattern(filter.department.as_deref()) {
        query = query.filter(employees::department.ilike(pattern));
    }
    match filter.salary {
        SalaryFilter::Any => {}
        SalaryFilter::Exact(amount) => query = query.filter(employees::salary.eq(amount)),
        SalaryFilter::Range { min, max } => {
            if let Some(low) = min {
                query = query.filter(employees::salary.ge(low));
            }
            if let Some(high) = max {
                query = query.filter(employees::salary.le(high));
            }
        }
    }
    query
}

#[async_trait]
impl EmployeeRepository for DieselEmployeeRepository {
    async fn insert(&self, employee: &StoredEmployee) -> Result<(), EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(employees::table)
            .values(EmployeeRow::from(employee))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| write_error(err, &employee.employee.email))
    }

    async fn find_by_id(
        &self,
        id: &EmployeeId,
    ) -> Result<Option<StoredEmployee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<EmployeeRow> = employees::table
            .find(id.as_uuid())
            .select(EmployeeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(StoredEmployee::from))
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredEmployee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<EmployeeRow> = employees::table
            .filter(employees::email.eq(email.to_string()))
            .select(EmployeeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(StoredEmployee::from))
    }

    async fn list(
        &self,
        filter: &EmployeeFilter,
        page: PageRequest,
    ) -> Result<Page<Employee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let count: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        let (offset, limit) = window(page);
        let rows: Vec<EmployeeRow> = filtered(filter)
            .order((employees::created_at.desc(), employees::seq.desc()))
            .offset(offset)
            .limit(limit)
            .select(EmployeeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(Page::new(
            total(count),
            rows.into_iter()
                .map(|row| StoredEmployee::from(row).employee)
                .collect(),
        ))
    }

    async fn update(&self, employee: &StoredEmployee) -> Result<bool, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(employees::table.find(employee.employee.id.as_uuid()))
            .set(EmployeeRow::from(employee))
            .execute(&mut conn)
            .await
            .map_err(|err| write_error(err, &employee.employee.email))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &EmployeeId) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<EmployeeRow> = diesel::delete(employees::table.find(id.as_uuid()))
            .returning(EmployeeRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(|row| StoredEmployee::from(row).employee))
    }
}
