//! Authentication primitives shared by both directories.
//!
//! Bearer tokens carry an [`AccessRole`]. Course-management roles map one to
//! one onto [`Role`]; employee tokens use a dedicated marker so they can never
//! satisfy a course-management route.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountId, Email, EmployeeId, Error, ProfileValidationError, RawPassword, Role};

/// Role recorded in an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessRole {
    Admin,
    Instructor,
    Student,
    Employee,
}

impl AccessRole {
    /// Claim representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Instructor => "instructor",
            Self::Student => "student",
            Self::Employee => "employee",
        }
    }

    /// Course-management role behind this access role, if any.
    #[must_use]
    pub const fn account_role(self) -> Option<Role> {
        match self {
            Self::Admin => Some(Role::Admin),
            Self::Instructor => Some(Role::Instructor),
            Self::Student => Some(Role::Student),
            Self::Employee => None,
        }
    }
}

impl From<Role> for AccessRole {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => Self::Admin,
            Role::Instructor => Self::Instructor,
            Role::Student => Self::Student,
        }
    }
}

impl fmt::Display for AccessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "instructor" => Ok(Self::Instructor),
            "student" => Ok(Self::Student),
            "employee" => Ok(Self::Employee),
            _ => Err(Error::unauthorized("token role is not recognised")),
        }
    }
}

/// Identity proven by a verified bearer token.
///
/// Built per request by the HTTP extractor and passed to handlers explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    subject: Uuid,
    role: AccessRole,
    email: String,
}

impl AuthIdentity {
    /// Assemble an identity from verified token claims.
    pub fn new(subject: Uuid, role: AccessRole, email: impl Into<String>) -> Self {
        Self {
            subject,
            role,
            email: email.into(),
        }
    }

    /// Role recorded in the token.
    #[must_use]
    pub fn role(&self) -> AccessRole {
        self.role
    }

    /// Email recorded in the token.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Subject as a course-management account id.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        AccountId::from_uuid(self.subject)
    }

    /// Subject as an employee id.
    #[must_use]
    pub fn employee_id(&self) -> EmployeeId {
        EmployeeId::from_uuid(self.subject)
    }

    /// Raw subject claim.
    #[must_use]
    pub fn subject(&self) -> &Uuid {
        &self.subject
    }
}

/// Require `identity` to hold one of `allowed`.
///
/// An empty `allowed` list admits any authenticated caller.
///
/// # Examples
/// ```
/// use academy::domain::{AccessRole, AuthIdentity, ErrorCode, authorize};
/// use uuid::Uuid;
///
/// let identity = AuthIdentity::new(Uuid::nil(), AccessRole::Student, "s@example.com");
/// assert!(authorize(&identity, &[AccessRole::Student]).is_ok());
/// let err = authorize(&identity, &[AccessRole::Admin]).expect_err("forbidden");
/// assert_eq!(err.code(), ErrorCode::Forbidden);
/// ```
pub fn authorize(identity: &AuthIdentity, allowed: &[AccessRole]) -> Result<(), Error> {
    if allowed.is_empty() || allowed.contains(&identity.role) {
        Ok(())
    } else {
        Err(Error::forbidden(format!(
            "role {} may not perform this action",
            identity.role
        )))
    }
}

/// Claims a token service signs for a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub subject: Uuid,
    pub role: AccessRole,
    pub email: String,
}

/// Signed access token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Email and password submitted to a login endpoint.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: Email,
    pub password: RawPassword,
}

impl LoginCredentials {
    /// Normalise the email and require a non-empty password.
    pub fn try_from_parts(
        email: impl AsRef<str>,
        password: impl Into<String>,
    ) -> Result<Self, ProfileValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            password: RawPassword::for_login(password)?,
        })
    }
}

/// Successful login: a token plus the authenticated record.
#[derive(Debug, Clone)]
pub struct LoginOutcome<T> {
    pub token: IssuedToken,
    pub subject: T,
}
