//! Enrollment relation between students and courses.
//!
//! Each student owns a flat, purchase-ordered list of `(course, completed)`
//! entries. At most one entry exists per student and course.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AccountId, CourseId, Email, InstructorSummary, PersonName};

/// One purchased course in a student's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub student_id: AccountId,
    pub course_id: CourseId,
    pub completed: bool,
    pub enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    /// A fresh, uncompleted enrollment.
    #[must_use]
    pub fn purchased(student_id: AccountId, course_id: CourseId, at: DateTime<Utc>) -> Self {
        Self {
            student_id,
            course_id,
            completed: false,
            enrolled_at: at,
        }
    }
}

/// Progress label shown to students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnrollmentStatus {
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Inprogress")]
    InProgress,
}

impl EnrollmentStatus {
    /// Derive the label from the completion flag.
    #[must_use]
    pub const fn from_completed(completed: bool) -> Self {
        if completed {
            Self::Completed
        } else {
            Self::InProgress
        }
    }

    /// Label text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::InProgress => "Inprogress",
        }
    }
}

/// A purchased course as shown in the student's own list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolledCourse {
    pub course_id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub instructor: Option<InstructorSummary>,
    pub completed: bool,
    pub status: EnrollmentStatus,
}

/// Compact `{courseId, completed}` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentEntry {
    pub course_id: CourseId,
    pub completed: bool,
}

impl From<&Enrollment> for EnrollmentEntry {
    fn from(value: &Enrollment) -> Self {
        Self {
            course_id: value.course_id,
            completed: value.completed,
        }
    }
}

/// A student with their enrollment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolledStudent {
    pub id: AccountId,
    pub name: PersonName,
    pub email: Email,
    pub enrolled_courses: Vec<EnrollmentEntry>,
}

/// Plain confirmation returned by enrollment commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub message: String,
}

impl Acknowledgement {
    /// Wrap a confirmation message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(true, "Completed")]
    #[case(false, "Inprogress")]
    fn status_labels_follow_completion(#[case] completed: bool, #[case] label: &str) {
        let status = EnrollmentStatus::from_completed(completed);
        assert_eq!(status.as_str(), label);
        assert_eq!(
            serde_json::to_value(status).expect("serialise status"),
            serde_json::json!(label)
        );
    }

    #[rstest]
    fn purchases_start_incomplete() {
        let enrollment = Enrollment::purchased(AccountId::random(), CourseId::random(), Utc::now());
        assert!(!enrollment.completed);
        assert!(!EnrollmentEntry::from(&enrollment).completed);
    }
}
