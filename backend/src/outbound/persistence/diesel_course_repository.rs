//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseFilter, CourseId};

use super::diesel_helpers::{contains_pattern, map_diesel_error, map_pool_error, total, window};
use super::models::CourseRow;
use super::pool::{DbPool, PoolError};
use super::schema::courses;

/// Diesel-backed implementation of the `CourseRepository` port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CourseRepositoryError {
    map_pool_error(error, CourseRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    map_diesel_error(
        error,
        CourseRepositoryError::query,
        CourseRepositoryError::connection,
    )
}

fn filtered(filter: &CourseFilter) -> courses::BoxedQuery<'static, Pg> {
    let mut query = courses::table.into_boxed();
    if let Some(instructor) = filter.instructor {
        query = query.filter(courses::instructor_id.eq(*instructor.as_uuid()));
    }
    if let Some(pattern) = contains_pattern(filter.title.as_deref()) {
        query = query.filter(courses::title.ilike(pattern));
    }
    if let Some(pattern) = contains_pattern(filter.description.as_deref()) {
        query = query.filter(courses::description.ilike(pattern));
    }
    query
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(courses::table)
            .values(CourseRow::from(course))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<CourseRow> = courses::table
            .find(id.as_uuid())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(Course::from))
    }

    async fn find_many(&self, ids: &[CourseId]) -> Result<Vec<Course>, CourseRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<CourseRow> = courses::table
            .filter(courses::id.eq_any(uuids))
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn list(
        &self,
        filter: &CourseFilter,
        page: PageRequest,
    ) -> Result<Page<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let count: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        let (offset, limit) = window(page);
        let rows: Vec<CourseRow> = filtered(filter)
            .order((courses::created_at.desc(), courses::seq.desc()))
            .offset(offset)
            .limit(limit)
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(Page::new(
            total(count),
            rows.into_iter().map(Course::from).collect(),
        ))
    }

    async fn update(&self, course: &Course) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(courses::table.find(course.id.as_uuid()))
            .set(CourseRow::from(course))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<CourseRow> = diesel::delete(courses::table.find(id.as_uuid()))
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(Course::from))
    }
}
