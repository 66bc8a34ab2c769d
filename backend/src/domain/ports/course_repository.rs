//! Port for course persistence.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Course, CourseFilter, CourseId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "course repository query failed: {message}",
    }
}

/// Port for course storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Persist a new course.
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError>;

    /// Fetch a course by id.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// Fetch every course whose id is listed. Unknown ids are skipped.
    async fn find_many(&self, ids: &[CourseId]) -> Result<Vec<Course>, CourseRepositoryError>;

    /// List courses matching `filter`, most recently created first.
    async fn list(
        &self,
        filter: &CourseFilter,
        page: PageRequest,
    ) -> Result<Page<Course>, CourseRepositoryError>;

    /// Overwrite a stored course. Returns `false` when the id is unknown.
    async fn update(&self, course: &Course) -> Result<bool, CourseRepositoryError>;

    /// Remove a course, returning what was removed.
    ///
    /// Enrollments referencing the course are left in place.
    async fn delete(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError>;
}
