//! Course-management accounts: admins, instructors and students.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AccountId, Email, PasswordHash, PersonName, RawPassword};

/// Role an account holds inside the course platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Course owner.
    Instructor,
    /// Course buyer.
    Student,
}

impl Role {
    /// Stable storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Instructor => "instructor",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a role string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("role must be one of admin, instructor, student")]
pub struct UnknownRole;

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "instructor" => Ok(Self::Instructor),
            "student" => Ok(Self::Student),
            _ => Err(UnknownRole),
        }
    }
}

/// Account as exposed outside the credential store. Never carries a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub name: PersonName,
    pub email: Email,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account together with its password hash, as held by repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAccount {
    pub account: Account,
    pub password_hash: PasswordHash,
}

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: PersonName,
    pub email: Email,
    pub password: RawPassword,
}

/// Directory list filter. Absent fields match everything.
///
/// `name` and `email` are case-insensitive substring matches; `id` and `role`
/// are exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub id: Option<AccountId>,
    pub role: Option<Role>,
}

impl AccountFilter {
    /// Restrict the filter to a single role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Evaluate the filter against an account in memory.
    #[must_use]
    pub fn matches(&self, account: &Account) -> bool {
        self.id.is_none_or(|id| id == account.id)
            && self.role.is_none_or(|role| role == account.role)
            && contains_folded(account.name.as_ref(), self.name.as_deref())
            && contains_folded(account.email.as_ref(), self.email.as_deref())
    }
}

/// Case-insensitive substring match; `None` and blank needles match anything.
pub(crate) fn contains_folded(haystack: &str, needle: Option<&str>) -> bool {
    match needle.map(str::trim) {
        None | Some("") => true,
        Some(value) => haystack.to_lowercase().contains(&value.to_lowercase()),
    }
}

/// Partial account update. Only supplied fields change.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub name: Option<PersonName>,
    pub email: Option<Email>,
    pub password: Option<RawPassword>,
    pub role: Option<Role>,
}
