//! Driving port for course purchases and progress.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{
    AccountId, Acknowledgement, CourseId, EnrolledCourse, EnrolledStudent, Error,
};

/// Enrollment use-cases.
#[async_trait]
pub trait Enrollments: Send + Sync {
    /// Buy a course for a student.
    async fn purchase(&self, student: AccountId, course: CourseId)
    -> Result<Acknowledgement, Error>;

    /// A student's purchased courses, skipping courses that no longer exist.
    async fn list_for_student(&self, student: AccountId) -> Result<Vec<EnrolledCourse>, Error>;

    /// Mark a purchased course completed. Repeating the call is harmless.
    async fn complete(&self, student: AccountId, course: CourseId)
    -> Result<Acknowledgement, Error>;

    /// Students of a course owned by `instructor`.
    async fn list_students_for_course(
        &self,
        instructor: AccountId,
        course: CourseId,
    ) -> Result<Vec<EnrolledStudent>, Error>;

    /// Every student with their enrollments, most recent first.
    async fn list_students(&self, page: PageRequest) -> Result<Page<EnrolledStudent>, Error>;
}
