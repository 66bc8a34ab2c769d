//! Shared fixtures for domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Account, AccountId, Course, CourseId, CourseTitle, Department, Email, Employee, EmployeeId,
    PasswordHash, PersonName, Role, Salary, StoredAccount, StoredEmployee,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn account(name: &str, email: &str, role: Role) -> Account {
    Account {
        id: AccountId::random(),
        name: PersonName::new(name).expect("valid name"),
        email: Email::new(email).expect("valid email"),
        role,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub(crate) fn stored_account(name: &str, email: &str, role: Role) -> StoredAccount {
    StoredAccount {
        account: account(name, email, role),
        password_hash: PasswordHash::new("hashed:secret1"),
    }
}

pub(crate) fn course(title: &str, instructor_id: AccountId) -> Course {
    Course {
        id: CourseId::random(),
        title: CourseTitle::new(title).expect("valid title"),
        description: None,
        instructor_id,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub(crate) fn stored_employee(name: &str, email: &str) -> StoredEmployee {
    StoredEmployee {
        employee: Employee {
            id: EmployeeId::random(),
            name: PersonName::new(name).expect("valid name"),
            email: Email::new(email).expect("valid email"),
            department: Department::new("Engineering").expect("valid department"),
            salary: Salary::new(4_200).expect("valid salary"),
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        },
        password_hash: PasswordHash::new("hashed:secret1"),
    }
}
