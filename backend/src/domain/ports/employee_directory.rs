//! Driving port for the employee directory.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{
    Employee, EmployeeFilter, EmployeeId, EmployeePatch, EmployeeRegistration, Error,
    LoginCredentials, LoginOutcome,
};

/// Employee directory use-cases.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Self-register a new employee.
    async fn register(&self, registration: EmployeeRegistration) -> Result<Employee, Error>;

    /// Check credentials and issue an employee token.
    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome<Employee>, Error>;

    /// Filtered, paginated listing, most recent first.
    async fn list(&self, filter: EmployeeFilter, page: PageRequest)
    -> Result<Page<Employee>, Error>;

    /// Fetch one employee.
    async fn get(&self, id: EmployeeId) -> Result<Employee, Error>;

    /// Apply a partial update; a new password is re-hashed.
    async fn update(&self, id: EmployeeId, patch: EmployeePatch) -> Result<Employee, Error>;

    /// Hard-delete an employee.
    async fn delete(&self, id: EmployeeId) -> Result<Employee, Error>;
}
