//! Integration tests for `DieselAccountRepository` against embedded PostgreSQL.
//!
//! Covers the behaviour the in-memory store guarantees and the schema must
//! reproduce: case-insensitive email uniqueness, `ILIKE` filtering, newest
//! first listing with insertion order breaking ties, and enrollment cleanup
//! on delete.

use academy::domain::ports::{AccountRepository, AccountRepositoryError, EnrollmentRepository};
use academy::domain::{
    Account, AccountFilter, AccountId, CourseId, Email, Enrollment, PasswordHash, PersonName,
    Role, StoredAccount,
};
use academy::outbound::persistence::{DieselAccountRepository, DieselEnrollmentRepository};
use pagination::PageRequest;
use rstest::{fixture, rstest};

#[path = "support/pg_embed.rs"]
#[allow(dead_code, reason = "each test crate uses a different subset of helpers")]
mod pg_embed;

use pg_embed::{MigratedDatabase, handle_cluster_setup_failure, instant};

const TEST_DB: &str = "diesel_account_repo_test";

fn stored(name: &str, email: &str, role: Role, offset_minutes: i64) -> StoredAccount {
    let at = instant(offset_minutes);
    StoredAccount {
        account: Account {
            id: AccountId::random(),
            name: PersonName::new(name).expect("valid name"),
            email: Email::new(email).expect("valid email"),
            role,
            created_at: at,
            updated_at: at,
        },
        password_hash: PasswordHash::new("$2b$04$fixturefixturefixturefixturefixturefixturefixturefi"),
    }
}

#[fixture]
fn database() -> Option<MigratedDatabase> {
    match MigratedDatabase::provision(TEST_DB) {
        Ok(db) => Some(db),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn emails(accounts: &[Account]) -> Vec<&str> {
    accounts.iter().map(|account| account.email.as_ref()).collect()
}

#[rstest]
fn duplicate_email_maps_to_a_typed_error(database: Option<MigratedDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_email_maps_to_a_typed_error skipped");
        return;
    };
    let repo = DieselAccountRepository::new(db.pool.clone());

    db.runtime
        .block_on(repo.insert(&stored("Ada Lovelace", "ada@example.com", Role::Student, 0)))
        .expect("first insert");
    let error = db
        .runtime
        .block_on(repo.insert(&stored("Ada Again", "ada@example.com", Role::Admin, 1)))
        .expect_err("second insert clashes");

    assert_eq!(
        error,
        AccountRepositoryError::duplicate_email("ada@example.com")
    );
    assert_eq!(db.count_rows("accounts"), 1);
}

#[rstest]
fn update_cannot_take_another_accounts_email(database: Option<MigratedDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: update_cannot_take_another_accounts_email skipped");
        return;
    };
    let repo = DieselAccountRepository::new(db.pool.clone());
    let ada = stored("Ada Lovelace", "ada@example.com", Role::Student, 0);
    let mut bob = stored("Bob Builder", "bob@example.com", Role::Student, 1);
    db.runtime.block_on(repo.insert(&ada)).expect("insert ada");
    db.runtime.block_on(repo.insert(&bob)).expect("insert bob");

    bob.account.email = Email::new("ada@example.com").expect("valid email");
    let error = db
        .runtime
        .block_on(repo.update(&bob))
        .expect_err("email is taken");
    assert_eq!(
        error,
        AccountRepositoryError::duplicate_email("ada@example.com")
    );

    let unknown = stored("Nobody Here", "nobody@example.com", Role::Admin, 2);
    let updated = db.runtime.block_on(repo.update(&unknown)).expect("update runs");
    assert!(!updated);
}

#[rstest]
fn filters_match_substrings_without_regard_to_case(database: Option<MigratedDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: filters_match_substrings_without_regard_to_case skipped");
        return;
    };
    let repo = DieselAccountRepository::new(db.pool.clone());
    for account in [
        stored("Ada Lovelace", "ada@example.com", Role::Student, 0),
        stored("Grace Hopper", "grace@navy.example", Role::Instructor, 1),
        stored("Adam Smith", "adam@example.com", Role::Instructor, 2),
    ] {
        db.runtime.block_on(repo.insert(&account)).expect("insert");
    }

    let by_name = AccountFilter {
        name: Some("ADA".to_owned()),
        ..AccountFilter::default()
    };
    let page = db
        .runtime
        .block_on(repo.list(&by_name, PageRequest::default()))
        .expect("list by name");
    assert_eq!(page.total, 2);
    assert_eq!(emails(&page.items), vec!["adam@example.com", "ada@example.com"]);

    let instructors = AccountFilter::default().with_role(Role::Instructor);
    let by_email = AccountFilter {
        email: Some("NAVY".to_owned()),
        ..instructors.clone()
    };
    let page = db
        .runtime
        .block_on(repo.list(&by_email, PageRequest::default()))
        .expect("list by email");
    assert_eq!(emails(&page.items), vec!["grace@navy.example"]);

    let page = db
        .runtime
        .block_on(repo.list(&instructors, PageRequest::default()))
        .expect("list by role");
    assert_eq!(page.total, 2);
}

#[rstest]
fn listing_is_newest_first_with_insertion_order_breaking_ties(
    database: Option<MigratedDatabase>,
) {
    let Some(db) = database else {
        eprintln!(
            "SKIP-TEST-CLUSTER: listing_is_newest_first_with_insertion_order_breaking_ties skipped"
        );
        return;
    };
    let repo = DieselAccountRepository::new(db.pool.clone());
    for account in [
        stored("Early Bird", "early@example.com", Role::Student, -5),
        stored("First Tie", "a@example.com", Role::Student, 0),
        stored("Second Tie", "b@example.com", Role::Student, 0),
        stored("Third Tie", "c@example.com", Role::Student, 0),
    ] {
        db.runtime.block_on(repo.insert(&account)).expect("insert");
    }

    let page = db
        .runtime
        .block_on(repo.list(&AccountFilter::default(), PageRequest::default()))
        .expect("list");
    assert_eq!(
        emails(&page.items),
        vec![
            "c@example.com",
            "b@example.com",
            "a@example.com",
            "early@example.com"
        ]
    );

    let window = PageRequest::new(Some(1), Some(2)).expect("window");
    let page = db
        .runtime
        .block_on(repo.list(&AccountFilter::default(), window))
        .expect("windowed list");
    assert_eq!(page.total, 4);
    assert_eq!(emails(&page.items), vec!["b@example.com", "a@example.com"]);
}

#[rstest]
fn deleting_a_student_drops_their_enrollments(database: Option<MigratedDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_student_drops_their_enrollments skipped");
        return;
    };
    let accounts = DieselAccountRepository::new(db.pool.clone());
    let enrollments = DieselEnrollmentRepository::new(db.pool.clone());
    let student = stored("Sam Student", "sam@example.com", Role::Student, 0);
    let id = student.account.id;
    db.runtime.block_on(accounts.insert(&student)).expect("insert");
    db.runtime
        .block_on(enrollments.enroll(&Enrollment::purchased(id, CourseId::random(), instant(1))))
        .expect("enroll");
    assert_eq!(db.count_rows("enrollments"), 1);

    let removed = db
        .runtime
        .block_on(accounts.delete(&id))
        .expect("delete")
        .expect("account existed");
    assert_eq!(removed.id, id);
    assert_eq!(db.count_rows("enrollments"), 0);

    let again = db.runtime.block_on(accounts.delete(&id)).expect("second delete");
    assert!(again.is_none());
}
