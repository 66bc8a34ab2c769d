//! Integration tests for `DieselEmployeeRepository` against embedded PostgreSQL.

use academy::domain::ports::{EmployeeRepository, EmployeeRepositoryError};
use academy::domain::{
    Department, Email, Employee, EmployeeFilter, EmployeeId, PasswordHash, PersonName, Salary,
    SalaryFilter, StoredEmployee,
};
use academy::outbound::persistence::DieselEmployeeRepository;
use pagination::PageRequest;
use rstest::{fixture, rstest};

#[path = "support/pg_embed.rs"]
#[allow(dead_code, reason = "each test crate uses a different subset of helpers")]
mod pg_embed;

use pg_embed::{MigratedDatabase, handle_cluster_setup_failure, instant};

const TEST_DB: &str = "diesel_employee_repo_test";

fn employee(name: &str, email: &str, department: &str, salary: i64, offset: i64) -> StoredEmployee {
    StoredEmployee {
        employee: Employee {
            id: EmployeeId::random(),
            name: PersonName::new(name).expect("valid name"),
            email: Email::new(email).expect("valid email"),
            department: Department::new(department).expect("valid department"),
            salary: Salary::new(salary).expect("valid salary"),
            created_at: instant(offset),
            updated_at: instant(offset),
        },
        password_hash: PasswordHash::new("$2b$04$fixture"),
    }
}

fn names(employees: &[Employee]) -> Vec<&str> {
    employees
        .iter()
        .map(|employee| employee.name.as_ref())
        .collect()
}

#[fixture]
fn database() -> Option<MigratedDatabase> {
    match MigratedDatabase::provision(TEST_DB) {
        Ok(db) => Some(db),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn duplicate_email_is_refused_on_insert_and_update(database: Option<MigratedDatabase>) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_email_is_refused_on_insert_and_update skipped");
        return;
    };
    let repo = DieselEmployeeRepository::new(db.pool.clone());
    let eve = employee("Eve Engineer", "eve@example.com", "Engineering", 5_000, 0);
    let mut max = employee("Max Manager", "max@example.com", "Sales", 4_000, 1);
    db.runtime.block_on(repo.insert(&eve)).expect("insert eve");
    db.runtime.block_on(repo.insert(&max)).expect("insert max");

    let clash = employee("Eve Clone", "eve@example.com", "Sales", 1_000, 2);
    let error = db
        .runtime
        .block_on(repo.insert(&clash))
        .expect_err("insert clashes");
    assert_eq!(error, EmployeeRepositoryError::duplicate_email("eve@example.com"));

    max.employee.email = Email::new("eve@example.com").expect("valid email");
    let error = db
        .runtime
        .block_on(repo.update(&max))
        .expect_err("update clashes");
    assert_eq!(error, EmployeeRepositoryError::duplicate_email("eve@example.com"));
    assert_eq!(db.count_rows("employees"), 2);

    let found = db
        .runtime
        .block_on(repo.find_by_email(&Email::new("EVE@example.com").expect("valid email")))
        .expect("lookup")
        .expect("eve exists");
    assert_eq!(found.employee.id, eve.employee.id);
}

#[rstest]
#[case(SalaryFilter::Exact(4_000), vec!["Max Manager"])]
#[case(SalaryFilter::Range { min: Some(4_500), max: None }, vec!["Ian Intern", "Eve Engineer"])]
#[case(SalaryFilter::Range { min: None, max: Some(4_000) }, vec!["Max Manager"])]
#[case(SalaryFilter::Range { min: Some(4_000), max: Some(5_000) }, vec!["Max Manager", "Eve Engineer"])]
fn salary_filters_bound_inclusively(
    database: Option<MigratedDatabase>,
    #[case] salary: SalaryFilter,
    #[case] expected: Vec<&str>,
) {
    let Some(db) = database else {
        eprintln!("SKIP-TEST-CLUSTER: salary_filters_bound_inclusively skipped");
        return;
    };
    let repo = DieselEmployeeRepository::new(db.pool.clone());
    for record in [
        employee("Eve Engineer", "eve@example.com", "Engineering", 5_000, 0),
        employee("Max Manager", "max@example.com", "Sales", 4_000, 1),
        employee("Ian Intern", "ian@example.com", "Engineering", 9_000, 2),
    ] {
        db.runtime.block_on(repo.insert(&record)).expect("insert");
    }

    let filter = EmployeeFilter {
        salary,
        ..EmployeeFilter::default()
    };
    let page = db
        .runtime
        .block_on(repo.list(&filter, PageRequest::default()))
        .expect("list");
    assert_eq!(names(&page.items), expected);
}

#[rstest]
fn directory_pages_newest_first_with_ties_in_insertion_order(
    database: Option<MigratedDatabase>,
) {
    let Some(db) = database else {
        eprintln!(
            "SKIP-TEST-CLUSTER: directory_pages_newest_first_with_ties_in_insertion_order skipped"
        );
        return;
    };
    let repo = DieselEmployeeRepository::new(db.pool.clone());
    for index in 0..5 {
        let record = employee(
            &format!("Worker {index}"),
            &format!("worker{index}@example.com"),
            "Operations",
            3_000,
            0,
        );
        db.runtime.block_on(repo.insert(&record)).expect("insert");
    }

    let filter = EmployeeFilter {
        department: Some("opera".to_owned()),
        ..EmployeeFilter::default()
    };
    let second_page = PageRequest::new(Some(2), Some(2)).expect("window");
    let page = db
        .runtime
        .block_on(repo.list(&filter, second_page))
        .expect("list");
    assert_eq!(page.total, 5);
    assert_eq!(names(&page.items), vec!["Worker 2", "Worker 1"]);

    let removed = db
        .runtime
        .block_on(repo.delete(&page.items[0].id))
        .expect("delete")
        .expect("worker existed");
    assert_eq!(removed.name.as_ref(), "Worker 2");
    assert_eq!(db.count_rows("employees"), 4);
}
