//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed academy and employee entities used by the
//! HTTP and persistence layers, plus the services implementing the driving
//! ports. Validation happens when values are constructed so that adapters
//! only ever handle well-formed data.
//!
//! Public surface:
//! - Error and ErrorCode: API error payload and stable identifiers.
//! - Account, Course, Enrollment, Employee: aggregates and their filters.
//! - AccountService, CourseService, EnrollmentService, EmployeeService:
//!   use-case implementations over the driven ports in [`ports`].

pub mod account;
pub mod auth;
pub mod course;
pub mod employee;
pub mod enrollment;
pub mod error;
pub mod identifier;
pub mod ports;
pub mod profile;
pub mod trace_id;

mod account_service;
mod course_service;
mod employee_service;
mod enrollment_service;
pub(crate) mod service_support;
#[cfg(test)]
pub(crate) mod service_test_support;

pub use self::account::{
    Account, AccountFilter, AccountPatch, Registration, Role, StoredAccount, UnknownRole,
};
pub use self::account_service::AccountService;
pub use self::auth::{
    AccessRole, AuthIdentity, IssuedToken, LoginCredentials, LoginOutcome, TokenSubject,
    authorize,
};
pub use self::course::{
    Course, CourseDraft, CourseFilter, CourseListing, CoursePatch, CourseTitle,
    InstructorSummary, TITLE_MIN, normalise_description,
};
pub use self::course_service::CourseService;
pub use self::employee::{
    Department, Employee, EmployeeFilter, EmployeePatch, EmployeeRegistration, Salary,
    SalaryFilter, StoredEmployee,
};
pub use self::employee_service::EmployeeService;
pub use self::enrollment::{
    Acknowledgement, EnrolledCourse, EnrolledStudent, Enrollment, EnrollmentEntry,
    EnrollmentStatus,
};
pub use self::enrollment_service::EnrollmentService;
pub use self::error::{Error, ErrorCode};
pub use self::identifier::{AccountId, CourseId, EmployeeId, InvalidIdentifier};
pub use self::profile::{
    Email, NAME_MIN, PASSWORD_MAX_BYTES, PASSWORD_MIN, PasswordHash, PersonName,
    ProfileValidationError, RawPassword,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use academy::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
