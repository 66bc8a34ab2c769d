//! Port error to domain error mapping shared by the domain services.
//!
//! Connection failures surface as `503 service_unavailable` so clients may
//! retry; query failures are internal errors and get redacted at the edge.

use tracing::warn;

use super::Error;
use super::ports::{
    AccountRepositoryError, CourseRepositoryError, EmployeeRepositoryError,
    EnrollmentRepositoryError, PasswordHasherError, TokenError,
};

pub(crate) const DUPLICATE_EMAIL_MESSAGE: &str = "email is already registered";

pub(crate) fn map_account_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountRepositoryError::DuplicateEmail { .. } => {
            Error::duplicate_email(DUPLICATE_EMAIL_MESSAGE)
        }
    }
}

pub(crate) fn map_course_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
    }
}

pub(crate) fn map_enrollment_error(error: EnrollmentRepositoryError) -> Error {
    match error {
        EnrollmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("enrollment repository unavailable: {message}"))
        }
        EnrollmentRepositoryError::Query { message } => {
            Error::internal(format!("enrollment repository error: {message}"))
        }
    }
}

pub(crate) fn map_employee_error(error: EmployeeRepositoryError) -> Error {
    match error {
        EmployeeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("employee repository unavailable: {message}"))
        }
        EmployeeRepositoryError::Query { message } => {
            Error::internal(format!("employee repository error: {message}"))
        }
        EmployeeRepositoryError::DuplicateEmail { .. } => {
            Error::duplicate_email(DUPLICATE_EMAIL_MESSAGE)
        }
    }
}

pub(crate) fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Token failures while *issuing* are internal; verification failures are
/// handled by the HTTP extractor.
pub(crate) fn map_token_error(error: TokenError) -> Error {
    warn!(%error, "token could not be issued");
    Error::internal(error.to_string())
}
