//! Course catalogue data model.

use chrono::{DateTime, Utc};
use serde_json::json;

use super::account::contains_folded;
use super::{Account, AccountId, CourseId, Email, Error, PersonName};

/// Minimum number of characters in a course title.
pub const TITLE_MIN: usize = 3;

/// Trimmed course title of at least [`TITLE_MIN`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseTitle(String);

impl CourseTitle {
    /// Trim and validate a title.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, Error> {
        let trimmed = raw.as_ref().trim();
        if trimmed.chars().count() < TITLE_MIN {
            return Err(
                Error::invalid_request(format!("title must be at least {TITLE_MIN} characters"))
                    .with_details(json!({ "field": "title", "code": "title_too_short" })),
            );
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for CourseTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Trim a description, dropping it entirely when blank.
///
/// # Examples
/// ```
/// use academy::domain::normalise_description;
///
/// assert_eq!(normalise_description(Some("  ".into())), None);
/// assert_eq!(normalise_description(Some(" Intro ".into())), Some("Intro".into()));
/// ```
#[must_use]
pub fn normalise_description(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// A course owned by exactly one instructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: CourseId,
    pub title: CourseTitle,
    pub description: Option<String>,
    pub instructor_id: AccountId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection of a course owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorSummary {
    pub id: AccountId,
    pub name: PersonName,
    pub email: Email,
}

impl From<&Account> for InstructorSummary {
    fn from(value: &Account) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            email: value.email.clone(),
        }
    }
}

/// Course together with its resolved owner.
///
/// `instructor` is `None` when the owning account no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseListing {
    pub course: Course,
    pub instructor: Option<InstructorSummary>,
}

/// Catalogue list filter. Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor: Option<AccountId>,
}

impl CourseFilter {
    /// Evaluate the filter against a course in memory.
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        let description_matches = match self.description.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => course
                .description
                .as_deref()
                .is_some_and(|value| contains_folded(value, Some(needle))),
        };
        self.instructor
            .is_none_or(|instructor| instructor == course.instructor_id)
            && contains_folded(course.title.as_ref(), self.title.as_deref())
            && description_matches
    }
}

/// Input for creating a course.
///
/// `instructor` is only honoured for admin callers; instructors always own
/// what they create.
#[derive(Debug, Clone)]
pub struct CourseDraft {
    pub title: CourseTitle,
    pub description: Option<String>,
    pub instructor: Option<AccountId>,
}

/// Partial course update. Only supplied fields change.
///
/// A supplied blank `description` clears it.
#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub title: Option<CourseTitle>,
    pub description: Option<String>,
    pub instructor: Option<AccountId>,
}
