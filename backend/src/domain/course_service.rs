//! Course catalogue service.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use serde_json::json;
use tracing::info;

use crate::domain::ports::{AccountRepository, CourseCatalogue, CourseRepository};
use crate::domain::service_support::{map_account_error, map_course_error};
use crate::domain::{
    AccountId, AuthIdentity, Course, CourseDraft, CourseFilter, CourseId, CourseListing,
    CoursePatch, Error, InstructorSummary, Role, normalise_description,
};

const COURSE_NOT_FOUND: &str = "course not found";

/// What a caller may do to courses, derived from their token role.
enum Authority {
    Admin,
    Instructor(AccountId),
}

impl Authority {
    fn of(caller: &AuthIdentity) -> Result<Self, Error> {
        match caller.role().account_role() {
            Some(Role::Admin) => Ok(Self::Admin),
            Some(Role::Instructor) => Ok(Self::Instructor(caller.account_id())),
            _ => Err(Error::forbidden("only admins and instructors manage courses")),
        }
    }

    fn ensure_owns(&self, course: &Course) -> Result<(), Error> {
        match self {
            Self::Admin => Ok(()),
            Self::Instructor(id) if *id == course.instructor_id => Ok(()),
            Self::Instructor(_) => Err(Error::forbidden("course belongs to another instructor")),
        }
    }
}

/// Course catalogue service implementing [`CourseCatalogue`].
#[derive(Clone)]
pub struct CourseService<C, A> {
    courses: Arc<C>,
    accounts: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<C, A> CourseService<C, A> {
    /// Create a new service over the course and account repositories.
    pub fn new(courses: Arc<C>, accounts: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            courses,
            accounts,
            clock,
        }
    }
}

impl<C, A> CourseService<C, A>
where
    C: CourseRepository,
    A: AccountRepository,
{
    async fn require_instructor(&self, id: AccountId) -> Result<InstructorSummary, Error> {
        let found = self
            .accounts
            .find_by_id(&id)
            .await
            .map_err(map_account_error)?;
        match found {
            Some(stored) if stored.account.role == Role::Instructor => {
                Ok(InstructorSummary::from(&stored.account))
            }
            _ => Err(
                Error::invalid_request("instructor must reference an existing instructor")
                    .with_details(json!({ "field": "instructor", "code": "unknown_instructor" })),
            ),
        }
    }

    async fn summaries(
        &self,
        courses: &[Course],
    ) -> Result<HashMap<AccountId, InstructorSummary>, Error> {
        let mut ids: Vec<AccountId> = courses.iter().map(|course| course.instructor_id).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let owners = self
            .accounts
            .find_many(&ids)
            .await
            .map_err(map_account_error)?;
        Ok(owners
            .iter()
            .map(|account| (account.id, InstructorSummary::from(account)))
            .collect())
    }

    async fn listing(&self, course: Course) -> Result<CourseListing, Error> {
        let mut owners = self.summaries(std::slice::from_ref(&course)).await?;
        let instructor = owners.remove(&course.instructor_id);
        Ok(CourseListing { course, instructor })
    }

    async fn load(&self, id: &CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found(COURSE_NOT_FOUND))
    }
}

#[async_trait]
impl<C, A> CourseCatalogue for CourseService<C, A>
where
    C: CourseRepository,
    A: AccountRepository,
{
    async fn create(
        &self,
        caller: &AuthIdentity,
        draft: CourseDraft,
    ) -> Result<CourseListing, Error> {
        let (instructor_id, summary) = match Authority::of(caller)? {
            Authority::Instructor(id) => (id, None),
            Authority::Admin => {
                let id = draft.instructor.ok_or_else(|| {
                    Error::invalid_request("instructor is required")
                        .with_details(json!({ "field": "instructor", "code": "missing_field" }))
                })?;
                (id, Some(self.require_instructor(id).await?))
            }
        };

        let now = self.clock.utc();
        let course = Course {
            id: CourseId::random(),
            title: draft.title,
            description: normalise_description(draft.description),
            instructor_id,
            created_at: now,
            updated_at: now,
        };
        self.courses
            .insert(&course)
            .await
            .map_err(map_course_error)?;
        info!(course_id = %course.id, instructor_id = %instructor_id, "course created");

        match summary {
            Some(instructor) => Ok(CourseListing {
                course,
                instructor: Some(instructor),
            }),
            None => self.listing(course).await,
        }
    }

    async fn list(
        &self,
        filter: CourseFilter,
        page: PageRequest,
    ) -> Result<Page<CourseListing>, Error> {
        let courses = self
            .courses
            .list(&filter, page)
            .await
            .map_err(map_course_error)?;
        let owners = self.summaries(&courses.items).await?;
        Ok(courses.map(|course| {
            let instructor = owners.get(&course.instructor_id).cloned();
            CourseListing { course, instructor }
        }))
    }

    async fn get(&self, id: CourseId) -> Result<CourseListing, Error> {
        let course = self.load(&id).await?;
        self.listing(course).await
    }

    async fn update(
        &self,
        caller: &AuthIdentity,
        id: CourseId,
        patch: CoursePatch,
    ) -> Result<CourseListing, Error> {
        let authority = Authority::of(caller)?;
        let mut course = self.load(&id).await?;
        authority.ensure_owns(&course)?;

        let CoursePatch {
            title,
            description,
            instructor,
        } = patch;
        if let (Authority::Admin, Some(new_owner)) = (&authority, instructor) {
            self.require_instructor(new_owner).await?;
            course.instructor_id = new_owner;
        }
        if let Some(title) = title {
            course.title = title;
        }
        if description.is_some() {
            course.description = normalise_description(description);
        }
        course.updated_at = self.clock.utc();

        let updated = self
            .courses
            .update(&course)
            .await
            .map_err(map_course_error)?;
        if !updated {
            return Err(Error::not_found(COURSE_NOT_FOUND));
        }
        info!(course_id = %id, "course updated");
        self.listing(course).await
    }

    async fn delete(&self, caller: &AuthIdentity, id: CourseId) -> Result<Course, Error> {
        let authority = Authority::of(caller)?;
        let course = self.load(&id).await?;
        authority.ensure_owns(&course)?;

        let removed = self
            .courses
            .delete(&id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found(COURSE_NOT_FOUND))?;
        info!(course_id = %id, "course deleted");
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "course_service_tests.rs"]
mod tests;
