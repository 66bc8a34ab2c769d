//! Tests for the enrollment service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockAccountRepository, MockCourseRepository, MockEnrollmentRepository};
use crate::domain::service_test_support::{
    account, course, fixture_clock, fixture_timestamp, stored_account,
};
use crate::domain::ErrorCode;

type Service =
    EnrollmentService<MockEnrollmentRepository, MockCourseRepository, MockAccountRepository>;

fn make_service(
    enrollments: MockEnrollmentRepository,
    courses: MockCourseRepository,
    accounts: MockAccountRepository,
) -> Service {
    EnrollmentService::new(
        Arc::new(enrollments),
        Arc::new(courses),
        Arc::new(accounts),
        fixture_clock(),
    )
}

fn courses_containing(existing: Course) -> MockCourseRepository {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));
    courses
}

fn known_student() -> MockAccountRepository {
    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_find_by_id()
        .returning(|_| Ok(Some(stored_account("Sam Student", "sam@example.com", Role::Student))));
    accounts
}

#[tokio::test]
async fn purchase_records_uncompleted_enrollment() {
    let existing = course("Compilers", AccountId::random());
    let course_id = existing.id;
    let student = AccountId::random();
    let mut enrollments = MockEnrollmentRepository::new();
    enrollments
        .expect_enroll()
        .withf(move |entry| {
            entry.student_id == student
                && entry.course_id == course_id
                && !entry.completed
                && entry.enrolled_at == fixture_timestamp()
        })
        .times(1)
        .return_once(|_| Ok(true));

    let service = make_service(enrollments, courses_containing(existing), known_student());
    let ack = service
        .purchase(student, course_id)
        .await
        .expect("purchase succeeds");

    assert_eq!(ack.message, "Course purchased successfully");
}

#[tokio::test]
async fn second_purchase_of_same_course_is_rejected() {
    let existing = course("Compilers", AccountId::random());
    let course_id = existing.id;
    let mut enrollments = MockEnrollmentRepository::new();
    enrollments.expect_enroll().return_once(|_| Ok(false));

    let service = make_service(enrollments, courses_containing(existing), known_student());
    let error = service
        .purchase(AccountId::random(), course_id)
        .await
        .expect_err("already enrolled");

    assert_eq!(error.code(), ErrorCode::AlreadyEnrolled);
}

#[tokio::test]
async fn purchase_of_missing_course_is_not_found() {
    let mut courses = MockCourseRepository::new();
    courses.expect_find_by_id().return_once(|_| Ok(None));

    let service = make_service(
        MockEnrollmentRepository::new(),
        courses,
        MockAccountRepository::new(),
    );
    let error = service
        .purchase(AccountId::random(), CourseId::random())
        .await
        .expect_err("missing course");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn completing_unpurchased_course_is_not_enrolled() {
    let mut enrollments = MockEnrollmentRepository::new();
    enrollments.expect_complete().return_once(|_, _| Ok(false));

    let service = make_service(
        enrollments,
        MockCourseRepository::new(),
        MockAccountRepository::new(),
    );
    let error = service
        .complete(AccountId::random(), CourseId::random())
        .await
        .expect_err("not enrolled");

    assert_eq!(error.code(), ErrorCode::NotEnrolled);
}

#[tokio::test]
async fn list_for_student_skips_deleted_courses_and_labels_status() {
    let student = AccountId::random();
    let owner = account("Grace Hopper", "grace@navy.mil", Role::Instructor);
    let kept = course("Compilers", owner.id);
    let kept_id = kept.id;
    let deleted_id = CourseId::random();
    let stored = vec![
        Enrollment {
            completed: true,
            ..Enrollment::purchased(student, kept_id, fixture_timestamp())
        },
        Enrollment::purchased(student, deleted_id, fixture_timestamp()),
    ];

    let mut enrollments = MockEnrollmentRepository::new();
    enrollments
        .expect_list_for_student()
        .return_once(move |_| Ok(stored));
    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_many()
        .return_once(move |_| Ok(vec![kept]));
    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_find_many()
        .return_once(move |_| Ok(vec![owner]));

    let service = make_service(enrollments, courses, accounts);
    let listed = service
        .list_for_student(student)
        .await
        .expect("list succeeds");

    assert_eq!(listed.len(), 1);
    let entry = listed.first().expect("one entry");
    assert_eq!(entry.course_id, kept_id);
    assert_eq!(entry.status, EnrollmentStatus::Completed);
    assert_eq!(
        entry.instructor.as_ref().map(|summary| summary.name.as_ref()),
        Some("Grace Hopper")
    );
}

#[tokio::test]
async fn roster_of_foreign_course_is_forbidden() {
    let existing = course("Compilers", AccountId::random());
    let course_id = existing.id;

    let service = make_service(
        MockEnrollmentRepository::new(),
        courses_containing(existing),
        MockAccountRepository::new(),
    );
    let error = service
        .list_students_for_course(AccountId::random(), course_id)
        .await
        .expect_err("foreign course");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn roster_lists_students_with_their_enrollments() {
    let instructor = AccountId::random();
    let existing = course("Compilers", instructor);
    let course_id = existing.id;
    let other_course = CourseId::random();
    let student = account("Sam Student", "sam@example.com", Role::Student);
    let student_id = student.id;

    let mut enrollments = MockEnrollmentRepository::new();
    enrollments.expect_list_for_course().return_once(move |_| {
        Ok(vec![Enrollment::purchased(
            student_id,
            course_id,
            fixture_timestamp(),
        )])
    });
    enrollments.expect_list_for_students().return_once(move |_| {
        Ok(vec![
            Enrollment::purchased(student_id, other_course, fixture_timestamp()),
            Enrollment::purchased(student_id, course_id, fixture_timestamp()),
        ])
    });
    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_find_many()
        .return_once(move |_| Ok(vec![student]));

    let service = make_service(enrollments, courses_containing(existing), accounts);
    let students = service
        .list_students_for_course(instructor, course_id)
        .await
        .expect("roster");

    assert_eq!(students.len(), 1);
    let entry = students.first().expect("one student");
    let courses: Vec<CourseId> = entry
        .enrolled_courses
        .iter()
        .map(|enrolled| enrolled.course_id)
        .collect();
    assert_eq!(courses, vec![other_course, course_id]);
}

#[tokio::test]
async fn admin_student_listing_keeps_total() {
    let student = account("Sam Student", "sam@example.com", Role::Student);
    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_list()
        .withf(|filter, _| filter.role == Some(Role::Student))
        .return_once(move |_, _| Ok(Page::new(7, vec![student])));
    let mut enrollments = MockEnrollmentRepository::new();
    enrollments
        .expect_list_for_students()
        .return_once(|_| Ok(Vec::new()));

    let service = make_service(enrollments, MockCourseRepository::new(), accounts);
    let page = service
        .list_students(PageRequest::default())
        .await
        .expect("student list");

    assert_eq!(page.total, 7);
    assert!(page.items.iter().all(|entry| entry.enrolled_courses.is_empty()));
}
