//! Enrollment service: purchases, progress and roster queries.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::{debug, info};

use crate::domain::ports::{
    AccountRepository, CourseRepository, EnrollmentRepository, Enrollments,
};
use crate::domain::service_support::{map_account_error, map_course_error, map_enrollment_error};
use crate::domain::{
    Account, AccountFilter, AccountId, Acknowledgement, Course, CourseId, EnrolledCourse,
    EnrolledStudent, Enrollment, EnrollmentEntry, EnrollmentStatus, Error, InstructorSummary,
    Role,
};

/// Enrollment service implementing [`Enrollments`].
#[derive(Clone)]
pub struct EnrollmentService<E, C, A> {
    enrollments: Arc<E>,
    courses: Arc<C>,
    accounts: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<E, C, A> EnrollmentService<E, C, A> {
    /// Create a new service over the enrollment, course and account repositories.
    pub fn new(
        enrollments: Arc<E>,
        courses: Arc<C>,
        accounts: Arc<A>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            enrollments,
            courses,
            accounts,
            clock,
        }
    }
}

/// Group enrollments by student, keeping purchase order within each group.
fn group_by_student(enrollments: &[Enrollment]) -> HashMap<AccountId, Vec<EnrollmentEntry>> {
    let mut grouped: HashMap<AccountId, Vec<EnrollmentEntry>> = HashMap::new();
    for enrollment in enrollments {
        grouped
            .entry(enrollment.student_id)
            .or_default()
            .push(EnrollmentEntry::from(enrollment));
    }
    grouped
}

fn roster(students: Vec<Account>, enrollments: &[Enrollment]) -> Vec<EnrolledStudent> {
    let mut grouped = group_by_student(enrollments);
    students
        .into_iter()
        .map(|student| EnrolledStudent {
            enrolled_courses: grouped.remove(&student.id).unwrap_or_default(),
            id: student.id,
            name: student.name,
            email: student.email,
        })
        .collect()
}

impl<E, C, A> EnrollmentService<E, C, A>
where
    E: EnrollmentRepository,
    C: CourseRepository,
    A: AccountRepository,
{
    async fn load_course(&self, id: &CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found("course not found"))
    }

    async fn enrollments_of(&self, students: &[AccountId]) -> Result<Vec<Enrollment>, Error> {
        if students.is_empty() {
            return Ok(Vec::new());
        }
        self.enrollments
            .list_for_students(students)
            .await
            .map_err(map_enrollment_error)
    }
}

#[async_trait]
impl<E, C, A> Enrollments for EnrollmentService<E, C, A>
where
    E: EnrollmentRepository,
    C: CourseRepository,
    A: AccountRepository,
{
    async fn purchase(
        &self,
        student: AccountId,
        course: CourseId,
    ) -> Result<Acknowledgement, Error> {
        self.load_course(&course).await?;
        let buyer = self
            .accounts
            .find_by_id(&student)
            .await
            .map_err(map_account_error)?;
        if buyer.is_none() {
            return Err(Error::not_found("student account not found"));
        }

        let enrollment = Enrollment::purchased(student, course, self.clock.utc());
        let inserted = self
            .enrollments
            .enroll(&enrollment)
            .await
            .map_err(map_enrollment_error)?;
        if !inserted {
            return Err(Error::already_enrolled("course already purchased"));
        }
        info!(student_id = %student, course_id = %course, "course purchased");
        Ok(Acknowledgement::new("Course purchased successfully"))
    }

    async fn list_for_student(&self, student: AccountId) -> Result<Vec<EnrolledCourse>, Error> {
        let enrollments = self
            .enrollments
            .list_for_student(&student)
            .await
            .map_err(map_enrollment_error)?;
        if enrollments.is_empty() {
            return Ok(Vec::new());
        }

        let course_ids: Vec<CourseId> = enrollments.iter().map(|entry| entry.course_id).collect();
        let courses: HashMap<CourseId, Course> = self
            .courses
            .find_many(&course_ids)
            .await
            .map_err(map_course_error)?
            .into_iter()
            .map(|course| (course.id, course))
            .collect();

        let mut owner_ids: Vec<AccountId> =
            courses.values().map(|course| course.instructor_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();
        let owners: HashMap<AccountId, InstructorSummary> = if owner_ids.is_empty() {
            HashMap::new()
        } else {
            self.accounts
                .find_many(&owner_ids)
                .await
                .map_err(map_account_error)?
                .iter()
                .map(|account| (account.id, InstructorSummary::from(account)))
                .collect()
        };

        Ok(enrollments
            .into_iter()
            .filter_map(|entry| {
                let Some(course) = courses.get(&entry.course_id) else {
                    debug!(
                        student_id = %student,
                        course_id = %entry.course_id,
                        "skipping enrollment for deleted course"
                    );
                    return None;
                };
                Some(EnrolledCourse {
                    course_id: course.id,
                    title: course.title.as_ref().to_owned(),
                    description: course.description.clone(),
                    instructor: owners.get(&course.instructor_id).cloned(),
                    completed: entry.completed,
                    status: EnrollmentStatus::from_completed(entry.completed),
                })
            })
            .collect())
    }

    async fn complete(
        &self,
        student: AccountId,
        course: CourseId,
    ) -> Result<Acknowledgement, Error> {
        let updated = self
            .enrollments
            .complete(&student, &course)
            .await
            .map_err(map_enrollment_error)?;
        if !updated {
            return Err(Error::not_enrolled("course has not been purchased"));
        }
        info!(student_id = %student, course_id = %course, "course completed");
        Ok(Acknowledgement::new("Course marked as completed"))
    }

    async fn list_students_for_course(
        &self,
        instructor: AccountId,
        course: CourseId,
    ) -> Result<Vec<EnrolledStudent>, Error> {
        let owned = self.load_course(&course).await?;
        if owned.instructor_id != instructor {
            return Err(Error::forbidden("course belongs to another instructor"));
        }

        let enrolled = self
            .enrollments
            .list_for_course(&course)
            .await
            .map_err(map_enrollment_error)?;
        let student_ids: Vec<AccountId> = enrolled.iter().map(|entry| entry.student_id).collect();
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut students: HashMap<AccountId, Account> = self
            .accounts
            .find_many(&student_ids)
            .await
            .map_err(map_account_error)?
            .into_iter()
            .map(|account| (account.id, account))
            .collect();
        let ordered: Vec<Account> = student_ids
            .iter()
            .filter_map(|id| students.remove(id))
            .collect();
        let enrollments = self.enrollments_of(&student_ids).await?;
        Ok(roster(ordered, &enrollments))
    }

    async fn list_students(&self, page: PageRequest) -> Result<Page<EnrolledStudent>, Error> {
        let students = self
            .accounts
            .list(&AccountFilter::default().with_role(Role::Student), page)
            .await
            .map_err(map_account_error)?;
        let ids: Vec<AccountId> = students.items.iter().map(|account| account.id).collect();
        let enrollments = self.enrollments_of(&ids).await?;
        Ok(Page::new(students.total, roster(students.items, &enrollments)))
    }
}

#[cfg(test)]
#[path = "enrollment_service_tests.rs"]
mod tests;
