//! Request and response bodies for the REST surface.
//!
//! Bodies are camelCase JSON. Response types never carry password material;
//! request types convert into validated domain inputs via `TryFrom`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    Account, AccountFilter, AccountId, AccountPatch, Acknowledgement, Course, CourseDraft,
    CourseFilter, CourseId, CourseListing, CoursePatch, CourseTitle, Department, Email,
    EnrolledCourse, EnrolledStudent, EnrollmentEntry, Employee, EmployeeFilter, EmployeeId,
    EmployeePatch, EmployeeRegistration, Error, InstructorSummary, IssuedToken, LoginCredentials,
    PersonName, RawPassword, Registration, Role, Salary, SalaryFilter, normalise_description,
};

use super::validation::{FieldName, parse_optional_id, parse_role};

const ID: FieldName = FieldName::new("id");
const INSTRUCTOR: FieldName = FieldName::new("instructor");
const ROLE: FieldName = FieldName::new("role");

/// Registration body shared by the admin, instructor and student routes.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "secret123")]
    pub password: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: PersonName::new(&value.name)?,
            email: Email::new(&value.email)?,
            password: RawPassword::new(value.password)?,
        })
    }
}

/// Login body shared by every login route.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "secret123")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Ok(Self::try_from_parts(&value.email, value.password)?)
    }
}

/// Account as returned to clients.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountBody {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountBody {
    fn from(value: Account) -> Self {
        Self {
            id: *value.id.as_uuid(),
            name: value.name.as_ref().to_owned(),
            email: value.email.as_ref().to_owned(),
            role: value.role,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Successful course-management login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountLoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub account: AccountBody,
}

impl AccountLoginResponse {
    pub(crate) fn new(token: IssuedToken, account: Account) -> Self {
        Self {
            token: token.token,
            expires_at: token.expires_at,
            account: account.into(),
        }
    }
}

/// Directory listing query: filters plus a skip/limit window.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AccountQuery {
    /// Items to skip (default 0).
    pub skip: Option<u64>,
    /// Page size (default 10, maximum 100).
    pub limit: Option<u32>,
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Case-insensitive substring of the email.
    pub email: Option<String>,
    /// Exact account id.
    pub id: Option<String>,
    /// Exact role.
    pub role: Option<String>,
}

impl AccountQuery {
    pub(crate) fn filter(&self) -> Result<AccountFilter, Error> {
        let role = self
            .role
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| parse_role(raw, ROLE))
            .transpose()?;
        Ok(AccountFilter {
            name: self.name.clone(),
            email: self.email.clone(),
            id: parse_optional_id::<AccountId>(self.id.as_deref(), ID)?,
            role,
        })
    }
}

/// Partial account update. Omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl TryFrom<AccountUpdateRequest> for AccountPatch {
    type Error = Error;

    fn try_from(value: AccountUpdateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name.map(PersonName::new).transpose()?,
            email: value.email.map(Email::new).transpose()?,
            password: value.password.map(RawPassword::new).transpose()?,
            role: value
                .role
                .as_deref()
                .map(|raw| parse_role(raw, ROLE))
                .transpose()?,
        })
    }
}

/// Owning instructor as embedded in course bodies.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorBody {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<InstructorSummary> for InstructorBody {
    fn from(value: InstructorSummary) -> Self {
        Self {
            id: *value.id.as_uuid(),
            name: value.name.as_ref().to_owned(),
            email: value.email.as_ref().to_owned(),
        }
    }
}

/// Course with its resolved instructor (`null` once the owner is deleted).
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseBody {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub instructor: Option<InstructorBody>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CourseListing> for CourseBody {
    fn from(value: CourseListing) -> Self {
        let CourseListing { course, instructor } = value;
        Self {
            id: *course.id.as_uuid(),
            title: course.title.as_ref().to_owned(),
            description: course.description,
            instructor: instructor.map(InstructorBody::from),
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

/// Course as stored, returned once it has been deleted.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecordBody {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseRecordBody {
    fn from(value: Course) -> Self {
        Self {
            id: *value.id.as_uuid(),
            title: value.title.as_ref().to_owned(),
            description: value.description,
            instructor_id: *value.instructor_id.as_uuid(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Course creation body. `instructor` is required for admins and ignored
/// for instructors.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[schema(example = "Rust for Beginners")]
    pub title: String,
    pub description: Option<String>,
    pub instructor: Option<String>,
}

impl TryFrom<CreateCourseRequest> for CourseDraft {
    type Error = Error;

    fn try_from(value: CreateCourseRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: CourseTitle::new(&value.title)?,
            description: normalise_description(value.description),
            instructor: parse_optional_id(value.instructor.as_deref(), INSTRUCTOR)?,
        })
    }
}

/// Partial course update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor: Option<String>,
}

impl TryFrom<UpdateCourseRequest> for CoursePatch {
    type Error = Error;

    fn try_from(value: UpdateCourseRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: value.title.map(CourseTitle::new).transpose()?,
            description: value.description,
            instructor: parse_optional_id(value.instructor.as_deref(), INSTRUCTOR)?,
        })
    }
}

/// Course listing query.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CourseQuery {
    /// Items to skip (default 0).
    pub skip: Option<u64>,
    /// Page size (default 10, maximum 100).
    pub limit: Option<u32>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Case-insensitive substring of the description.
    pub description: Option<String>,
    /// Exact instructor id.
    pub instructor: Option<String>,
}

impl CourseQuery {
    pub(crate) fn filter(&self) -> Result<CourseFilter, Error> {
        Ok(CourseFilter {
            title: self.title.clone(),
            description: self.description.clone(),
            instructor: parse_optional_id(self.instructor.as_deref(), INSTRUCTOR)?,
        })
    }
}

/// Skip/limit window without filters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WindowQuery {
    /// Items to skip (default 0).
    pub skip: Option<u64>,
    /// Page size (default 10, maximum 100).
    pub limit: Option<u32>,
}

/// Purchase body for `POST /student/buy`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub course_id: String,
}

/// Confirmation message for enrollment commands.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AcknowledgementBody {
    #[schema(example = "Course purchased successfully")]
    pub message: String,
}

impl From<Acknowledgement> for AcknowledgementBody {
    fn from(value: Acknowledgement) -> Self {
        Self {
            message: value.message,
        }
    }
}

/// Course in a student's enrollment list.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourseBody {
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub instructor: Option<InstructorBody>,
    pub completed: bool,
    /// `Completed` or `Inprogress`.
    #[schema(example = "Inprogress")]
    pub status: String,
}

impl From<EnrolledCourse> for EnrolledCourseBody {
    fn from(value: EnrolledCourse) -> Self {
        Self {
            course_id: *value.course_id.as_uuid(),
            title: value.title,
            description: value.description,
            instructor: value.instructor.map(InstructorBody::from),
            completed: value.completed,
            status: value.status.as_str().to_owned(),
        }
    }
}

/// Single `{courseId, completed}` entry.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentEntryBody {
    pub course_id: Uuid,
    pub completed: bool,
}

impl From<EnrollmentEntry> for EnrollmentEntryBody {
    fn from(value: EnrollmentEntry) -> Self {
        Self {
            course_id: *value.course_id.as_uuid(),
            completed: value.completed,
        }
    }
}

/// Student with their enrollments.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledStudentBody {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub enrolled_courses: Vec<EnrollmentEntryBody>,
}

impl From<EnrolledStudent> for EnrolledStudentBody {
    fn from(value: EnrolledStudent) -> Self {
        Self {
            id: *value.id.as_uuid(),
            name: value.name.as_ref().to_owned(),
            email: value.email.as_ref().to_owned(),
            enrolled_courses: value
                .enrolled_courses
                .into_iter()
                .map(EnrollmentEntryBody::from)
                .collect(),
        }
    }
}

macro_rules! page_body {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Deserialize, Serialize, ToSchema)]
        pub struct $name {
            pub total: u64,
            pub items: Vec<$item>,
        }

        impl<T> From<pagination::Page<T>> for $name
        where
            $item: From<T>,
        {
            fn from(page: pagination::Page<T>) -> Self {
                Self {
                    total: page.total,
                    items: page.items.into_iter().map(<$item>::from).collect(),
                }
            }
        }
    };
}

page_body!(
    /// Window of directory accounts.
    AccountPage,
    AccountBody
);
page_body!(
    /// Window of courses.
    CoursePage,
    CourseBody
);
page_body!(
    /// Window of students with their enrollments.
    StudentPage,
    EnrolledStudentBody
);

/// Employee registration body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRegisterRequest {
    #[schema(example = "Grace Hopper")]
    pub name: String,
    #[schema(example = "grace@example.com")]
    pub email: String,
    pub password: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = 85000)]
    pub salary: i64,
}

impl TryFrom<EmployeeRegisterRequest> for EmployeeRegistration {
    type Error = Error;

    fn try_from(value: EmployeeRegisterRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: PersonName::new(&value.name)?,
            email: Email::new(&value.email)?,
            password: RawPassword::new(value.password)?,
            department: Department::new(&value.department)?,
            salary: Salary::new(value.salary)?,
        })
    }
}

/// Employee as returned to clients.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeBody {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: String,
    pub salary: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeBody {
    fn from(value: Employee) -> Self {
        Self {
            id: *value.id.as_uuid(),
            name: value.name.as_ref().to_owned(),
            email: value.email.as_ref().to_owned(),
            department: value.department.as_ref().to_owned(),
            salary: value.salary.amount(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Successful employee login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub employee: EmployeeBody,
}

impl EmployeeLoginResponse {
    pub(crate) fn new(token: IssuedToken, employee: Employee) -> Self {
        Self {
            token: token.token,
            expires_at: token.expires_at,
            employee: employee.into(),
        }
    }
}

/// Employee listing query: page-numbered window plus filters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// One-based page number (default 1).
    pub page: Option<u64>,
    /// Page size (default 10, maximum 100).
    pub limit: Option<u32>,
    /// Exact employee id.
    pub id: Option<String>,
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Case-insensitive substring of the email.
    pub email: Option<String>,
    /// Case-insensitive substring of the department.
    pub department: Option<String>,
    /// Exact salary; takes precedence over the range bounds.
    pub salary: Option<i64>,
    /// Inclusive lower salary bound.
    pub min_salary: Option<i64>,
    /// Inclusive upper salary bound.
    pub max_salary: Option<i64>,
}

impl EmployeeQuery {
    pub(crate) fn filter(&self) -> Result<EmployeeFilter, Error> {
        Ok(EmployeeFilter {
            id: parse_optional_id::<EmployeeId>(self.id.as_deref(), ID)?,
            name: self.name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
            salary: SalaryFilter::from_parts(self.salary, self.min_salary, self.max_salary)?,
        })
    }
}

/// Page-numbered employee window.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct EmployeePage {
    pub page: u64,
    pub limit: u32,
    pub total: u64,
    pub items: Vec<EmployeeBody>,
}

/// Partial employee update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub department: Option<String>,
    pub salary: Option<i64>,
}

impl TryFrom<EmployeeUpdateRequest> for EmployeePatch {
    type Error = Error;

    fn try_from(value: EmployeeUpdateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name.map(PersonName::new).transpose()?,
            email: value.email.map(Email::new).transpose()?,
            password: value.password.map(RawPassword::new).transpose()?,
            department: value.department.map(Department::new).transpose()?,
            salary: value.salary.map(Salary::new).transpose()?,
        })
    }
}

/// Parse a course id carried in a request body.
pub(crate) fn purchase_course_id(body: &PurchaseRequest) -> Result<CourseId, Error> {
    super::validation::parse_id(&body.course_id, FieldName::new("courseId"))
}
