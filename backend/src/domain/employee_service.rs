//! Employee directory service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::info;

use crate::domain::ports::{EmployeeDirectory, EmployeeRepository, PasswordHasher, TokenService};
use crate::domain::service_support::{
    DUPLICATE_EMAIL_MESSAGE, map_employee_error, map_hasher_error, map_token_error,
};
use crate::domain::{
    AccessRole, Email, Employee, EmployeeFilter, EmployeeId, EmployeePatch,
    EmployeeRegistration, Error, LoginCredentials, LoginOutcome, StoredEmployee, TokenSubject,
};

const EMPLOYEE_NOT_FOUND: &str = "employee not found";

/// Employee directory service implementing [`EmployeeDirectory`].
#[derive(Clone)]
pub struct EmployeeService<R, H, T> {
    employees: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<R, H, T> EmployeeService<R, H, T> {
    /// Create a new service over the given ports.
    pub fn new(employees: Arc<R>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            employees,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<R, H, T> EmployeeService<R, H, T>
where
    R: EmployeeRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn ensure_email_free(
        &self,
        email: &Email,
        owner: Option<EmployeeId>,
    ) -> Result<(), Error> {
        let existing = self
            .employees
            .find_by_email(email)
            .await
            .map_err(map_employee_error)?;
        match existing {
            Some(stored) if Some(stored.employee.id) != owner => {
                Err(Error::duplicate_email(DUPLICATE_EMAIL_MESSAGE))
            }
            _ => Ok(()),
        }
    }

    async fn load(&self, id: &EmployeeId) -> Result<StoredEmployee, Error> {
        self.employees
            .find_by_id(id)
            .await
            .map_err(map_employee_error)?
            .ok_or_else(|| Error::not_found(EMPLOYEE_NOT_FOUND))
    }
}

#[async_trait]
impl<R, H, T> EmployeeDirectory for EmployeeService<R, H, T>
where
    R: EmployeeRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn register(&self, registration: EmployeeRegistration) -> Result<Employee, Error> {
        let EmployeeRegistration {
            name,
            email,
            password,
            department,
            salary,
        } = registration;
        self.ensure_email_free(&email, None).await?;

        let password_hash = self
            .hasher
            .hash(&password)
            .await
            .map_err(map_hasher_error)?;
        let now = self.clock.utc();
        let stored = StoredEmployee {
            employee: Employee {
                id: EmployeeId::random(),
                name,
                email,
                department,
                salary,
                created_at: now,
                updated_at: now,
            },
            password_hash,
        };
        self.employees
            .insert(&stored)
            .await
            .map_err(map_employee_error)?;
        info!(employee_id = %stored.employee.id, "employee registered");
        Ok(stored.employee)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome<Employee>, Error> {
        let stored = self
            .employees
            .find_by_email(&credentials.email)
            .await
            .map_err(map_employee_error)?
            .ok_or_else(|| Error::not_found(EMPLOYEE_NOT_FOUND))?;

        let matches = self
            .hasher
            .verify(&credentials.password, &stored.password_hash)
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            return Err(Error::invalid_credentials("invalid email or password"));
        }

        let employee = stored.employee;
        let token = self
            .tokens
            .issue(&TokenSubject {
                subject: *employee.id.as_uuid(),
                role: AccessRole::Employee,
                email: employee.email.to_string(),
            })
            .map_err(map_token_error)?;
        info!(employee_id = %employee.id, "employee logged in");
        Ok(LoginOutcome {
            token,
            subject: employee,
        })
    }

    async fn list(
        &self,
        filter: EmployeeFilter,
        page: PageRequest,
    ) -> Result<Page<Employee>, Error> {
        self.employees
            .list(&filter, page)
            .await
            .map_err(map_employee_error)
    }

    async fn get(&self, id: EmployeeId) -> Result<Employee, Error> {
        self.load(&id).await.map(|stored| stored.employee)
    }

    async fn update(&self, id: EmployeeId, patch: EmployeePatch) -> Result<Employee, Error> {
        let mut stored = self.load(&id).await?;
        let EmployeePatch {
            name,
            email,
            password,
            department,
            salary,
        } = patch;

        if let Some(email) = email {
            if email != stored.employee.email {
                self.ensure_email_free(&email, Some(id)).await?;
            }
            stored.employee.email = email;
        }
        if let Some(name) = name {
            stored.employee.name = name;
        }
        if let Some(department) = department {
            stored.employee.department = department;
        }
        if let Some(salary) = salary {
            stored.employee.salary = salary;
        }
        if let Some(password) = password {
            stored.password_hash = self
                .hasher
                .hash(&password)
                .await
                .map_err(map_hasher_error)?;
        }
        stored.employee.updated_at = self.clock.utc();

        let updated = self
            .employees
            .update(&stored)
            .await
            .map_err(map_employee_error)?;
        if !updated {
            return Err(Error::not_found(EMPLOYEE_NOT_FOUND));
        }
        info!(employee_id = %id, "employee updated");
        Ok(stored.employee)
    }

    async fn delete(&self, id: EmployeeId) -> Result<Employee, Error> {
        let removed = self
            .employees
            .delete(&id)
            .await
            .map_err(map_employee_error)?
            .ok_or_else(|| Error::not_found(EMPLOYEE_NOT_FOUND))?;
        info!(employee_id = %id, "employee deleted");
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "employee_service_tests.rs"]
mod tests;
