//! Process-local repositories backed by a single mutex-guarded store.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. Holding one lock across every collection keeps cascades and
//! uniqueness checks atomic, matching what the PostgreSQL adapter gets from
//! constraints and transactions.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, CourseRepository, CourseRepositoryError,
    EmployeeRepository, EmployeeRepositoryError, EnrollmentRepository, EnrollmentRepositoryError,
};
use crate::domain::{
    Account, AccountFilter, AccountId, Course, CourseFilter, CourseId, Email, Employee,
    EmployeeFilter, EmployeeId, Enrollment, StoredAccount, StoredEmployee,
};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Debug, Default)]
struct State {
    accounts: Vec<StoredAccount>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    employees: Vec<StoredEmployee>,
}

/// In-memory implementation of every repository port.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<E>(&self, connection: impl FnOnce(&'static str) -> E) -> Result<MutexGuard<'_, State>, E> {
        self.state.lock().map_err(|_| connection(POISONED))
    }
}

/// Order records newest first; records created at the same instant keep
/// reverse insertion order.
fn newest_first<'a, T: Clone + 'a>(
    records: impl DoubleEndedIterator<Item = &'a T>,
    created_at: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    let mut ordered: Vec<T> = records.rev().cloned().collect();
    ordered.sort_by_key(|record| std::cmp::Reverse(created_at(record)));
    ordered
}

fn paginate<T>(matching: Vec<T>, page: PageRequest) -> Page<T> {
    let total = matching.len() as u64;
    Page::new(total, page.apply(matching).collect())
}

fn in_purchase_order(mut enrollments: Vec<Enrollment>) -> Vec<Enrollment> {
    enrollments.sort_by_key(|entry| entry.enrolled_at);
    enrollments
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn insert(&self, account: &StoredAccount) -> Result<(), AccountRepositoryError> {
        let mut state = self.lock(AccountRepositoryError::connection)?;
        if state
            .accounts
            .iter()
            .any(|stored| stored.account.email == account.account.email)
        {
            return Err(AccountRepositoryError::duplicate_email(
                account.account.email.to_string(),
            ));
        }
        state.accounts.push(account.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &AccountId,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError> {
        let state = self.lock(AccountRepositoryError::connection)?;
        Ok(state
            .accounts
            .iter()
            .find(|stored| stored.account.id == *id)
            .cloned())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError> {
        let state = self.lock(AccountRepositoryError::connection)?;
        Ok(state
            .accounts
            .iter()
            .find(|stored| stored.account.email == *email)
            .cloned())
    }

    async fn find_many(&self, ids: &[AccountId]) -> Result<Vec<Account>, AccountRepositoryError> {
        let state = self.lock(AccountRepositoryError::connection)?;
        Ok(state
            .accounts
            .iter()
            .filter(|stored| ids.contains(&stored.account.id))
            .map(|stored| stored.account.clone())
            .collect())
    }

    async fn list(
        &self,
        filter: &AccountFilter,
        page: PageRequest,
    ) -> Result<Page<Account>, AccountRepositoryError> {
        let state = self.lock(AccountRepositoryError::connection)?;
        let matching: Vec<&Account> = state
            .accounts
            .iter()
            .map(|stored| &stored.account)
            .filter(|account| filter.matches(account))
            .collect();
        let ordered = newest_first(matching.into_iter(), |account| account.created_at);
        Ok(paginate(ordered, page))
    }

    async fn update(&self, account: &StoredAccount) -> Result<bool, AccountRepositoryError> {
        let mut state = self.lock(AccountRepositoryError::connection)?;
        let id = account.account.id;
        if state
            .accounts
            .iter()
            .any(|stored| stored.account.id != id && stored.account.email == account.account.email)
        {
            return Err(AccountRepositoryError::duplicate_email(
                account.account.email.to_string(),
            ));
        }
        let Some(slot) = state
            .accounts
            .iter_mut()
            .find(|stored| stored.account.id == id)
        else {
            return Ok(false);
        };
        *slot = account.clone();
        Ok(true)
    }

    async fn delete(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut state = self.lock(AccountRepositoryError::connection)?;
        let Some(position) = state
            .accounts
            .iter()
            .position(|stored| stored.account.id == *id)
        else {
            return Ok(None);
        };
        let removed = state.accounts.remove(position);
        state.enrollments.retain(|entry| entry.student_id != *id);
        Ok(Some(removed.account))
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut state = self.lock(CourseRepositoryError::connection)?;
        state.courses.push(course.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let state = self.lock(CourseRepositoryError::connection)?;
        Ok(state.courses.iter().find(|course| course.id == *id).cloned())
    }

    async fn find_many(&self, ids: &[CourseId]) -> Result<Vec<Course>, CourseRepositoryError> {
        let state = self.lock(CourseRepositoryError::connection)?;
        Ok(state
            .courses
            .iter()
            .filter(|course| ids.contains(&course.id))
            .cloned()
            .collect())
    }

    async fn list(
        &self,
        filter: &CourseFilter,
        page: PageRequest,
    ) -> Result<Page<Course>, CourseRepositoryError> {
        let state = self.lock(CourseRepositoryError::connection)?;
        let ordered = newest_first(
            state.courses.iter().filter(|course| filter.matches(course)),
            |course| course.created_at,
        );
        Ok(paginate(ordered, page))
    }

    async fn update(&self, course: &Course) -> Result<bool, CourseRepositoryError> {
        let mut state = self.lock(CourseRepositoryError::connection)?;
        let Some(slot) = state.courses.iter_mut().find(|stored| stored.id == course.id) else {
            return Ok(false);
        };
        *slot = course.clone();
        Ok(true)
    }

    async fn delete(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut state = self.lock(CourseRepositoryError::connection)?;
        let position = state.courses.iter().position(|course| course.id == *id);
        Ok(position.map(|index| state.courses.remove(index)))
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryStore {
    async fn enroll(&self, enrollment: &Enrollment) -> Result<bool, EnrollmentRepositoryError> {
        let mut state = self.lock(EnrollmentRepositoryError::connection)?;
        if state.enrollments.iter().any(|entry| {
            entry.student_id == enrollment.student_id && entry.course_id == enrollment.course_id
        }) {
            return Ok(false);
        }
        state.enrollments.push(enrollment.clone());
        Ok(true)
    }

    async fn complete(
        &self,
        student: &AccountId,
        course: &CourseId,
    ) -> Result<bool, EnrollmentRepositoryError> {
        let mut state = self.lock(EnrollmentRepositoryError::connection)?;
        let Some(entry) = state
            .enrollments
            .iter_mut()
            .find(|entry| entry.student_id == *student && entry.course_id == *course)
        else {
            return Ok(false);
        };
        entry.completed = true;
        Ok(true)
    }

    async fn list_for_student(
        &self,
        student: &AccountId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let state = self.lock(EnrollmentRepositoryError::connection)?;
        Ok(in_purchase_order(
            state
                .enrollments
                .iter()
                .filter(|entry| entry.student_id == *student)
                .cloned()
                .collect(),
        ))
    }

    async fn list_for_students(
        &self,
        students: &[AccountId],
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let state = self.lock(EnrollmentRepositoryError::connection)?;
        Ok(in_purchase_order(
            state
                .enrollments
                .iter()
                .filter(|entry| students.contains(&entry.student_id))
                .cloned()
                .collect(),
        ))
    }

    async fn list_for_course(
        &self,
        course: &CourseId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let state = self.lock(EnrollmentRepositoryError::connection)?;
        Ok(in_purchase_order(
            state
                .enrollments
                .iter()
                .filter(|entry| entry.course_id == *course)
                .cloned()
                .collect(),
        ))
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryStore {
    async fn insert(&self, employee: &StoredEmployee) -> Result<(), EmployeeRepositoryError> {
        let mut state = self.lock(EmployeeRepositoryError::connection)?;
        if state
            .employees
            .iter()
            .any(|stored| stored.employee.email == employee.employee.email)
        {
            return Err(EmployeeRepositoryError::duplicate_email(
                employee.employee.email.to_string(),
            ));
        }
        state.employees.push(employee.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &EmployeeId,
    ) -> Result<Option<StoredEmployee>, EmployeeRepositoryError> {
        let state = self.lock(EmployeeRepositoryError::connection)?;
        Ok(state
            .employees
            .iter()
            .find(|stored| stored.employee.id == *id)
            .cloned())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredEmployee>, EmployeeRepositoryError> {
        let state = self.lock(EmployeeRepositoryError::connection)?;
        Ok(state
            .employees
            .iter()
            .find(|stored| stored.employee.email == *email)
            .cloned())
    }

    async fn list(
        &self,
        filter: &EmployeeFilter,
        page: PageRequest,
    ) -> Result<Page<Employee>, EmployeeRepositoryError> {
        let state = self.lock(EmployeeRepositoryError::connection)?;
        let matching: Vec<&Employee> = state
            .employees
            .iter()
            .map(|stored| &stored.employee)
            .filter(|employee| filter.matches(employee))
            .collect();
        let ordered = newest_first(matching.into_iter(), |employee| employee.created_at);
        Ok(paginate(ordered, page))
    }

    async fn update(&self, employee: &StoredEmployee) -> Result<bool, EmployeeRepositoryError> {
        let mut state = self.lock(EmployeeRepositoryError::connection)?;
        let id = employee.employee.id;
        if state.employees.iter().any(|stored| {
            stored.employee.id != id && stored.employee.email == employee.employee.email
        }) {
            return Err(EmployeeRepositoryError::duplicate_email(
                employee.employee.email.to_string(),
            ));
        }
        let Some(slot) = state
            .employees
            .iter_mut()
            .find(|stored| stored.employee.id == id)
        else {
            return Ok(false);
        };
        *slot = employee.clone();
        Ok(true)
    }

    async fn delete(&self, id: &EmployeeId) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut state = self.lock(EmployeeRepositoryError::connection)?;
        let position = state
            .employees
            .iter()
            .position(|stored| stored.employee.id == *id);
        Ok(position.map(|index| state.employees.remove(index).employee))
    }
}
