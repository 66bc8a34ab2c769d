//! Port for employee directory persistence.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Email, Employee, EmployeeFilter, EmployeeId, StoredEmployee};

use super::define_port_error;

define_port_error! {
    /// Errors raised by employee repository adapters.
    pub enum EmployeeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "employee repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "employee repository query failed: {message}",
        /// Another employee already uses the email address.
        DuplicateEmail { email: String } =>
            "email {email} is already registered",
    }
}

/// Port for employee storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Persist a new employee.
    async fn insert(&self, employee: &StoredEmployee) -> Result<(), EmployeeRepositoryError>;

    /// Fetch an employee by id.
    async fn find_by_id(
        &self,
        id: &EmployeeId,
    ) -> Result<Option<StoredEmployee>, EmployeeRepositoryError>;

    /// Fetch an employee by normalised email.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredEmployee>, EmployeeRepositoryError>;

    /// List employees matching `filter`, most recently created first.
    async fn list(
        &self,
        filter: &EmployeeFilter,
        page: PageRequest,
    ) -> Result<Page<Employee>, EmployeeRepositoryError>;

    /// Overwrite a stored employee. Returns `false` when the id is unknown.
    async fn update(&self, employee: &StoredEmployee) -> Result<bool, EmployeeRepositoryError>;

    /// Remove an employee, returning what was removed.
    async fn delete(&self, id: &EmployeeId) -> Result<Option<Employee>, EmployeeRepositoryError>;
}
