//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types live beside
//! each row.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    Account, AccountId, Course, CourseId, CourseTitle, Department, Email, Employee, EmployeeId,
    Enrollment, PasswordHash, PersonName, Role, Salary, StoredAccount, StoredEmployee,
};

use super::schema::{accounts, courses, employees, enrollments};

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Row struct for reading from the accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountRow {
    /// Convert into a domain account, rejecting unknown role values.
    pub(crate) fn into_stored(self) -> Result<StoredAccount, String> {
        let role: Role = self.role.parse().map_err(|_| {
            warn!(value = %self.role, account_id = %self.id, "unrecognised account role");
            format!("unrecognised role {}", self.role)
        })?;
        Ok(StoredAccount {
            account: Account {
                id: AccountId::from_uuid(self.id),
                name: PersonName::from_stored(self.name),
                email: Email::from_stored(self.email),
                role,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            password_hash: PasswordHash::new(self.password_hash),
        })
    }
}

/// Insertable struct for creating account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a StoredAccount> for NewAccountRow<'a> {
    fn from(stored: &'a StoredAccount) -> Self {
        let account = &stored.account;
        Self {
            id: *account.id.as_uuid(),
            name: account.name.as_ref(),
            email: account.email.as_ref(),
            password_hash: stored.password_hash.as_str(),
            role: account.role.as_str(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Changeset struct for replacing mutable account columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = accounts)]
pub(crate) struct AccountUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a StoredAccount> for AccountUpdate<'a> {
    fn from(stored: &'a StoredAccount) -> Self {
        let account = &stored.account;
        Self {
            name: account.name.as_ref(),
            email: account.email.as_ref(),
            password_hash: stored.password_hash.as_str(),
            role: account.role.as_str(),
            updated_at: account.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

/// Row struct for reading from the courses table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Self {
            id: CourseId::from_uuid(row.id),
            title: CourseTitle::from_stored(row.title),
            description: row.description,
            instructor_id: AccountId::from_uuid(row.instructor_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Course> for CourseRow {
    fn from(course: &Course) -> Self {
        Self {
            id: *course.id.as_uuid(),
            title: course.title.as_ref().to_owned(),
            description: course.description.clone(),
            instructor_id: *course.instructor_id.as_uuid(),
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Enrollments
// ---------------------------------------------------------------------------

/// Row struct for reading from the enrollments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EnrollmentRow {
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub completed: bool,
    pub enrolled_at: DateTime<Utc>,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Self {
            student_id: AccountId::from_uuid(row.student_id),
            course_id: CourseId::from_uuid(row.course_id),
            completed: row.completed,
            enrolled_at: row.enrolled_at,
        }
    }
}

/// Insertable struct for new enrollments; `seq` is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = enrollments)]
pub(crate) struct NewEnrollmentRow {
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub completed: bool,
    pub enrolled_at: DateTime<Utc>,
}

impl From<&Enrollment> for NewEnrollmentRow {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            student_id: *enrollment.student_id.as_uuid(),
            course_id: *enrollment.course_id.as_uuid(),
            completed: enrollment.completed,
            enrolled_at: enrollment.enrolled_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

/// Row struct for reading from and writing to the employees table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployeeRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub department: String,
    pub salary: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EmployeeRow> for StoredEmployee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            employee: Employee {
                id: EmployeeId::from_uuid(row.id),
                name: PersonName::from_stored(row.name),
                email: Email::from_stored(row.email),
                department: Department::from_stored(row.department),
                salary: Salary::from_stored(row.salary),
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            password_hash: PasswordHash::new(row.password_hash),
        }
    }
}

impl From<&StoredEmployee> for EmployeeRow {
    fn from(stored: &StoredEmployee) -> Self {
        let employee = &stored.employee;
        Self {
            id: *employee.id.as_uuid(),
            name: employee.name.as_ref().to_owned(),
            email: employee.email.as_ref().to_owned(),
            password_hash: stored.password_hash.as_str().to_owned(),
            department: employee.department.as_ref().to_owned(),
            salary: employee.salary.amount(),
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}
