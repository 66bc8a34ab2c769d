//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hashing, token signing) are implemented by
//! outbound adapters. Driving ports are the use-cases inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod accounts;
mod course_catalogue;
mod course_repository;
mod employee_directory;
mod employee_repository;
mod enrollment_repository;
mod enrollments;
mod password_hasher;
mod token_service;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
pub use accounts::{AccountAuth, AccountDirectory};
pub use course_catalogue::CourseCatalogue;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError};
pub use employee_directory::EmployeeDirectory;
#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
pub use employee_repository::{EmployeeRepository, EmployeeRepositoryError};
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use enrollment_repository::{EnrollmentRepository, EnrollmentRepositoryError};
pub use enrollments::Enrollments;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
