//! PostgreSQL-backed `EnrollmentRepository` implementation using Diesel ORM.
//!
//! Purchases use `INSERT ... ON CONFLICT DO NOTHING` on the
//! `(student_id, course_id)` primary key, so of two concurrent purchases of
//! the same pair only one inserts a row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{AccountId, CourseId, Enrollment};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{EnrollmentRow, NewEnrollmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::enrollments;

/// Diesel-backed implementation of the `EnrollmentRepository` port.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> EnrollmentRepositoryError {
    map_pool_error(error, EnrollmentRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> EnrollmentRepositoryError {
    map_diesel_error(
        error,
        EnrollmentRepositoryError::query,
        EnrollmentRepositoryError::connection,
    )
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn enroll(&self, enrollment: &Enrollment) -> Result<bool, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let inserted = diesel::insert_into(enrollments::table)
            .values(NewEnrollmentRow::from(enrollment))
            .on_conflict((enrollments::student_id, enrollments::course_id))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(inserted == 1)
    }

    async fn complete(
        &self,
        student: &AccountId,
        course: &CourseId,
    ) -> Result<bool, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(
            enrollments::table
                .filter(enrollments::student_id.eq(student.as_uuid()))
                .filter(enrollments::course_id.eq(course.as_uuid())),
        )
        .set(enrollments::completed.eq(true))
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(updated > 0)
    }

    async fn list_for_student(
        &self,
        student: &AccountId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<EnrollmentRow> = enrollments::table
            .filter(enrollments::student_id.eq(student.as_uuid()))
            .order((enrollments::enrolled_at.asc(), enrollments::seq.asc()))
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Enrollment::from).collect())
    }

    async fn list_for_students(
        &self,
        students: &[AccountId],
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        if students.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let uuids: Vec<uuid::Uuid> = students.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<EnrollmentRow> = enrollments::table
            .filter(enrollments::student_id.eq_any(uuids))
            .order((enrollments::enrolled_at.asc(), enrollments::seq.asc()))
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Enrollment::from).collect())
    }

    async fn list_for_course(
        &self,
        course: &CourseId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<EnrollmentRow> = enrollments::table
            .filter(enrollments::course_id.eq(course.as_uuid()))
            .order((enrollments::enrolled_at.asc(), enrollments::seq.asc()))
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Enrollment::from).collect())
    }
}
