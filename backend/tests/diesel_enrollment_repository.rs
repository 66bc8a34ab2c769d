//! Integration tests for `DieselEnrollmentRepository` against embedded
//! PostgreSQL.

use academy::domain::ports::{AccountRepository, EnrollmentRepository};
use academy::domain::{
    Account, AccountId, CourseId, Email, Enrollment, PasswordHash, PersonName, Role,
    StoredAccount,
};
use academy::outbound::persistence::{DieselAccountRepository, DieselEnrollmentRepository};
use rstest::{fixture, rstest};

#[path = "support/pg_embed.rs"]
#[allow(dead_code, reason = "each test crate uses a different subset of helpers")]
mod pg_embed;

use pg_embed::{MigratedDatabase, handle_cluster_setup_failure, instant};

const TEST_DB: &str = "diesel_enrollment_repo_test";

struct Context {
    db: MigratedDatabase,
    enrollments: DieselEnrollmentRepository,
    students: Vec<AccountId>,
}

fn student(index: usize) -> StoredAccount {
    StoredAccount {
        account: Account {
            id: AccountId::random(),
            name: PersonName::new(format!("Student {index:03}")).expect("valid name"),
            email: Email::new(format!("student{index}@example.com")).expect("valid email"),
            role: Role::Student,
            created_at: instant(0),
            updated_at: instant(0),
        },
        password_hash: PasswordHash::new("$2b$04$fixture"),
    }
}

fn setup() -> Result<Context, String> {
    let db = MigratedDatabase::provision(TEST_DB)?;
    let accounts = DieselAccountRepository::new(db.pool.clone());
    let mut students = Vec::new();
    for index in 0..2 {
        let stored = student(index);
        db.runtime
            .block_on(accounts.insert(&stored))
            .map_err(|err| err.to_string())?;
        students.push(stored.account.id);
    }
    let enrollments = DieselEnrollmentRepository::new(db.pool.clone());
    Ok(Context {
        db,
        enrollments,
        students,
    })
}

#[fixture]
fn context() -> Option<Context> {
    match setup() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn course_ids(enrollments: &[Enrollment]) -> Vec<CourseId> {
    enrollments.iter().map(|entry| entry.course_id).collect()
}

#[rstest]
fn buying_twice_stores_one_row(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: buying_twice_stores_one_row skipped");
        return;
    };
    let course = CourseId::random();
    let purchase = Enrollment::purchased(ctx.students[0], course, instant(1));

    let first = ctx
        .db
        .runtime
        .block_on(ctx.enrollments.enroll(&purchase))
        .expect("first purchase");
    let second = ctx
        .db
        .runtime
        .block_on(ctx.enrollments.enroll(&Enrollment::purchased(
            ctx.students[0],
            course,
            instant(2),
        )))
        .expect("second purchase");

    assert!(first);
    assert!(!second);
    assert_eq!(ctx.db.count_rows("enrollments"), 1);
    let stored = ctx
        .db
        .runtime
        .block_on(ctx.enrollments.list_for_student(&ctx.students[0]))
        .expect("list");
    assert_eq!(stored, vec![purchase]);
}

#[rstest]
fn completion_is_idempotent_and_needs_an_enrollment(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: completion_is_idempotent_and_needs_an_enrollment skipped");
        return;
    };
    let course = CourseId::random();
    let student = ctx.students[0];
    let missing = ctx
        .db
        .runtime
        .block_on(ctx.enrollments.complete(&student, &course))
        .expect("complete runs");
    assert!(!missing);

    ctx.db
        .runtime
        .block_on(ctx.enrollments.enroll(&Enrollment::purchased(student, course, instant(1))))
        .expect("enroll");
    for _ in 0..2 {
        let done = ctx
            .db
            .runtime
            .block_on(ctx.enrollments.complete(&student, &course))
            .expect("complete");
        assert!(done);
    }

    let stored = ctx
        .db
        .runtime
        .block_on(ctx.enrollments.list_for_course(&course))
        .expect("list");
    assert_eq!(stored.len(), 1);
    assert!(stored[0].completed);
}

#[rstest]
fn purchases_list_in_order_with_simultaneous_buys_kept_in_sequence(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!(
            "SKIP-TEST-CLUSTER: purchases_list_in_order_with_simultaneous_buys_kept_in_sequence skipped"
        );
        return;
    };
    let student = ctx.students[0];
    let courses: Vec<CourseId> = (0..4).map(|_| CourseId::random()).collect();
    let offsets = [5, 1, 1, 1];
    for (course, offset) in courses.iter().zip(offsets) {
        ctx.db
            .runtime
            .block_on(
                ctx.enrollments
                    .enroll(&Enrollment::purchased(student, *course, instant(offset))),
            )
            .expect("enroll");
    }

    let listed = ctx
        .db
        .runtime
        .block_on(ctx.enrollments.list_for_student(&student))
        .expect("list");
    assert_eq!(
        course_ids(&listed),
        vec![courses[1], courses[2], courses[3], courses[0]]
    );
}

#[rstest]
fn batch_lookup_covers_only_the_named_students(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: batch_lookup_covers_only_the_named_students skipped");
        return;
    };
    let shared = CourseId::random();
    for student in &ctx.students {
        ctx.db
            .runtime
            .block_on(ctx.enrollments.enroll(&Enrollment::purchased(*student, shared, instant(1))))
            .expect("enroll");
    }

    let none = ctx
        .db
        .runtime
        .block_on(ctx.enrollments.list_for_students(&[]))
        .expect("empty lookup");
    assert!(none.is_empty());

    let first_only = ctx
        .db
        .runtime
        .block_on(ctx.enrollments.list_for_students(&ctx.students[..1]))
        .expect("lookup");
    assert_eq!(first_only.len(), 1);
    assert_eq!(first_only[0].student_id, ctx.students[0]);

    let by_course = ctx
        .db
        .runtime
        .block_on(ctx.enrollments.list_for_course(&shared))
        .expect("by course");
    let students: Vec<AccountId> = by_course.iter().map(|entry| entry.student_id).collect();
    assert_eq!(students, ctx.students);
}
