//! Driving port for course management.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{
    AuthIdentity, Course, CourseDraft, CourseFilter, CourseId, CourseListing, CoursePatch, Error,
};

/// Course use-cases. Ownership rules depend on the caller's role.
#[async_trait]
pub trait CourseCatalogue: Send + Sync {
    /// Create a course. Instructors always own what they create; admins must
    /// name an existing instructor.
    async fn create(&self, caller: &AuthIdentity, draft: CourseDraft)
    -> Result<CourseListing, Error>;

    /// Filtered, paginated listing with owner summaries, most recent first.
    async fn list(
        &self,
        filter: CourseFilter,
        page: PageRequest,
    ) -> Result<Page<CourseListing>, Error>;

    /// Fetch one course with its owner summary.
    async fn get(&self, id: CourseId) -> Result<CourseListing, Error>;

    /// Apply a partial update. Instructors may only touch their own courses
    /// and cannot hand them to someone else.
    async fn update(
        &self,
        caller: &AuthIdentity,
        id: CourseId,
        patch: CoursePatch,
    ) -> Result<CourseListing, Error>;

    /// Delete a course. Instructors may only delete their own.
    async fn delete(&self, caller: &AuthIdentity, id: CourseId) -> Result<Course, Error>;
}
