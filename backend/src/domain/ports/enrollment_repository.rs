//! Port for the student/course enrollment relation.
//!
//! Purchases must be a single conditional write: of two concurrent purchases
//! of the same pair exactly one reports success.

use async_trait::async_trait;

use crate::domain::{AccountId, CourseId, Enrollment};

use super::define_port_error;

define_port_error! {
    /// Errors raised by enrollment repository adapters.
    pub enum EnrollmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "enrollment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "enrollment repository query failed: {message}",
    }
}

/// Port for enrollment storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Record a purchase unless the pair already exists.
    ///
    /// Returns `false` when the student already owns the course.
    async fn enroll(&self, enrollment: &Enrollment) -> Result<bool, EnrollmentRepositoryError>;

    /// Mark an enrollment completed. Returns `false` when no enrollment matches.
    async fn complete(
        &self,
        student: &AccountId,
        course: &CourseId,
    ) -> Result<bool, EnrollmentRepositoryError>;

    /// A student's enrollments in purchase order.
    async fn list_for_student(
        &self,
        student: &AccountId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError>;

    /// Enrollments of every listed student, in purchase order per student.
    async fn list_for_students(
        &self,
        students: &[AccountId],
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError>;

    /// Enrollments referencing a course, in purchase order.
    async fn list_for_course(
        &self,
        course: &CourseId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError>;
}
