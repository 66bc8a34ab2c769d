//! Employee directory data model.

use chrono::{DateTime, Utc};
use serde_json::json;

use super::account::contains_folded;
use super::{Email, EmployeeId, Error, PasswordHash, PersonName, RawPassword};

/// Trimmed, non-empty department name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department(String);

impl Department {
    /// Trim and validate a department name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, Error> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_request("department must not be empty")
                .with_details(json!({ "field": "department", "code": "empty_department" })));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Department {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Positive salary in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Salary(i64);

impl Salary {
    /// Validate a salary amount.
    pub fn new(amount: i64) -> Result<Self, Error> {
        if amount <= 0 {
            return Err(Error::invalid_request("salary must be a positive amount")
                .with_details(json!({ "field": "salary", "code": "non_positive_salary" })));
        }
        Ok(Self(amount))
    }

    pub(crate) const fn from_stored(value: i64) -> Self {
        Self(value)
    }

    /// Amount in whole currency units.
    #[must_use]
    pub const fn amount(self) -> i64 {
        self.0
    }
}

/// Employee record as exposed outside the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: PersonName,
    pub email: Email,
    pub department: Department,
    pub salary: Salary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Employee together with its password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEmployee {
    pub employee: Employee,
    pub password_hash: PasswordHash,
}

/// Validated self-registration input.
#[derive(Debug, Clone)]
pub struct EmployeeRegistration {
    pub name: PersonName,
    pub email: Email,
    pub password: RawPassword,
    pub department: Department,
    pub salary: Salary,
}

/// Salary constraint for directory listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SalaryFilter {
    /// No constraint.
    #[default]
    Any,
    /// Salary equals the amount.
    Exact(i64),
    /// Salary lies within the inclusive bounds; either side may be open.
    Range { min: Option<i64>, max: Option<i64> },
}

impl SalaryFilter {
    /// Build a constraint from raw query parameters.
    ///
    /// An exact amount takes precedence over bounds.
    ///
    /// # Examples
    /// ```
    /// use academy::domain::SalaryFilter;
    ///
    /// let filter = SalaryFilter::from_parts(None, Some(100), Some(200)).expect("valid range");
    /// assert!(filter.admits(150));
    /// assert!(!filter.admits(250));
    /// ```
    pub fn from_parts(
        exact: Option<i64>,
        min: Option<i64>,
        max: Option<i64>,
    ) -> Result<Self, Error> {
        if let Some(amount) = exact {
            return Ok(Self::Exact(amount));
        }
        match (min, max) {
            (None, None) => Ok(Self::Any),
            (Some(low), Some(high)) if low > high => {
                Err(Error::invalid_request("minSalary must not exceed maxSalary")
                    .with_details(json!({ "field": "minSalary", "code": "inverted_range" })))
            }
            (low, high) => Ok(Self::Range { min: low, max: high }),
        }
    }

    /// Whether `amount` satisfies the constraint.
    #[must_use]
    pub fn admits(self, amount: i64) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => amount == expected,
            Self::Range { min, max } => {
                min.is_none_or(|low| amount >= low) && max.is_none_or(|high| amount <= high)
            }
        }
    }
}

/// Directory list filter. Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub id: Option<EmployeeId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub salary: SalaryFilter,
}

impl EmployeeFilter {
    /// Evaluate the filter against an employee in memory.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        self.id.is_none_or(|id| id == employee.id)
            && contains_folded(employee.name.as_ref(), self.name.as_deref())
            && contains_folded(employee.email.as_ref(), self.email.as_deref())
            && contains_folded(employee.department.as_ref(), self.department.as_deref())
            && self.salary.admits(employee.salary.amount())
    }
}

/// Partial employee update. Only supplied fields change.
#[derive(Debug, Clone, Default)]
pub struct EmployeePatch {
    pub name: Option<PersonName>,
    pub email: Option<Email>,
    pub password: Option<RawPassword>,
    pub department: Option<Department>,
    pub salary: Option<Salary>,
}
