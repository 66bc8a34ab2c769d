//! Profile fields shared by course accounts and employee records.
//!
//! Names, emails and passwords are validated once at the edge and carried as
//! newtypes afterwards, so services never see unnormalised input.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::json;
use zeroize::Zeroizing;

use super::Error;

/// Minimum number of characters in a person's name.
pub const NAME_MIN: usize = 3;
/// Minimum number of characters in a raw password.
pub const PASSWORD_MIN: usize = 6;
/// bcrypt ignores input beyond this many bytes.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Validation failures for profile fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileValidationError {
    /// The name is shorter than [`NAME_MIN`] once trimmed.
    #[error("name must be at least {min} characters")]
    NameTooShort { min: usize },
    /// The email is blank.
    #[error("email must not be empty")]
    EmptyEmail,
    /// The email does not look like `local@domain.tld`.
    #[error("email must be a valid email address")]
    InvalidEmail,
    /// The password is blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// The password is shorter than [`PASSWORD_MIN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    /// The password exceeds bcrypt's input limit.
    #[error("password must be at most {max} bytes")]
    PasswordTooLong { max: usize },
}

impl ProfileValidationError {
    /// JSON field the failure refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameTooShort { .. } => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPassword | Self::PasswordTooShort { .. } | Self::PasswordTooLong { .. } => {
                "password"
            }
        }
    }

    /// Machine-readable failure code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NameTooShort { .. } => "name_too_short",
            Self::EmptyEmail => "empty_email",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyPassword => "empty_password",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::PasswordTooLong { .. } => "password_too_long",
        }
    }
}

impl From<ProfileValidationError> for Error {
    fn from(value: ProfileValidationError) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}

/// Display name of an account or employee.
///
/// # Examples
/// ```
/// use academy::domain::PersonName;
///
/// let name = PersonName::new("  Ada Lovelace ").expect("valid name");
/// assert_eq!(name.as_ref(), "Ada Lovelace");
/// assert!(PersonName::new("Al").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Trim and validate a name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ProfileValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.chars().count() < NAME_MIN {
            return Err(ProfileValidationError::NameTooShort { min: NAME_MIN });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wrap a name loaded from storage without re-validating it.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Normalised email address: trimmed and lower-cased.
///
/// # Examples
/// ```
/// use academy::domain::Email;
///
/// let email = Email::new(" Ada@Example.COM ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Normalise and validate an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ProfileValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(ProfileValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&normalised) {
            return Err(ProfileValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }

    /// Wrap an email loaded from storage without re-validating it.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plain-text password held only long enough to hash or verify it.
///
/// The buffer is zeroed on drop and never printed.
#[derive(Clone)]
pub struct RawPassword(Zeroizing<String>);

impl RawPassword {
    /// Validate a new password against the length policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, ProfileValidationError> {
        let value = Zeroizing::new(raw.into());
        if value.is_empty() {
            return Err(ProfileValidationError::EmptyPassword);
        }
        if value.chars().count() < PASSWORD_MIN {
            return Err(ProfileValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if value.len() > PASSWORD_MAX_BYTES {
            return Err(ProfileValidationError::PasswordTooLong {
                max: PASSWORD_MAX_BYTES,
            });
        }
        Ok(Self(value))
    }

    /// Accept any non-empty password for a login attempt.
    ///
    /// Length rules are not applied so that accounts created under an older
    /// policy can still sign in.
    pub fn for_login(raw: impl Into<String>) -> Result<Self, ProfileValidationError> {
        let value = Zeroizing::new(raw.into());
        if value.is_empty() {
            return Err(ProfileValidationError::EmptyPassword);
        }
        Ok(Self(value))
    }

    /// Expose the plain text to a hasher.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword(<redacted>)")
    }
}

/// Stored bcrypt hash of a password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
