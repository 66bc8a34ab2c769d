//! Instructor API handlers.
//!
//! Instructors own the courses they create; updates and deletes of other
//! instructors' courses are refused with `403`.

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{AccessRole, CourseId, Error, Role};

use super::ApiResult;
use super::auth::Authenticated;
use super::common::{
    create_course, delete_course, get_course, list_courses, login_as, register_as, update_course,
};
use super::dto::{
    AccountBody, AccountLoginResponse, CourseBody, CoursePage, CourseQuery, CourseRecordBody,
    CreateCourseRequest, EnrolledStudentBody, LoginRequest, RegisterRequest, UpdateCourseRequest,
};
use super::state::HttpState;
use super::validation::{FieldName, parse_id};

const INSTRUCTOR_ONLY: &[AccessRole] = &[AccessRole::Instructor];

/// Register an instructor account.
#[utoipa::path(
    post,
    path = "/api/v1/instructor/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Instructor registered", body = AccountBody),
        (status = 400, description = "Invalid request or duplicate email", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "registerInstructor",
    security([])
)]
#[post("/instructor/register")]
pub async fn register_instructor(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    register_as(&state, payload.into_inner(), Role::Instructor).await
}

/// Log in as an instructor and receive a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/instructor/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AccountLoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 404, description = "No instructor with this email", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "loginInstructor",
    security([])
)]
#[post("/instructor/login")]
pub async fn login_instructor(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AccountLoginResponse>> {
    login_as(&state, payload.into_inner(), Role::Instructor).await
}

/// Create a course owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/instructor/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "createCourseInstructor"
)]
#[post("/instructor/courses")]
pub async fn create_course_instructor(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<CreateCourseRequest>,
) -> ApiResult<HttpResponse> {
    let caller = caller.require(INSTRUCTOR_ONLY)?;
    create_course(&state, &caller, payload.into_inner()).await
}

/// List courses.
#[utoipa::path(
    get,
    path = "/api/v1/instructor/courses",
    params(CourseQuery),
    responses(
        (status = 200, description = "Courses", body = CoursePage),
        (status = 400, description = "Invalid filter or paging", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "listCoursesInstructor"
)]
#[get("/instructor/courses")]
pub async fn list_courses_instructor(
    state: web::Data<HttpState>,
    caller: Authenticated,
    query: web::Query<CourseQuery>,
) -> ApiResult<web::Json<CoursePage>> {
    caller.require(INSTRUCTOR_ONLY)?;
    list_courses(&state, &query).await
}

/// Fetch one course.
#[utoipa::path(
    get,
    path = "/api/v1/instructor/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course", body = CourseBody),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "getCourseInstructor"
)]
#[get("/instructor/courses/{id}")]
pub async fn get_course_instructor(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseBody>> {
    caller.require(INSTRUCTOR_ONLY)?;
    get_course(&state, &path).await
}

/// Update one of the caller's courses. Ownership cannot be reassigned here.
#[utoipa::path(
    put,
    path = "/api/v1/instructor/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Updated course", body = CourseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the course owner", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "updateCourseInstructor"
)]
#[put("/instructor/courses/{id}")]
pub async fn update_course_instructor(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<UpdateCourseRequest>,
) -> ApiResult<web::Json<CourseBody>> {
    let caller = caller.require(INSTRUCTOR_ONLY)?;
    update_course(&state, &caller, &path, payload.into_inner()).await
}

/// Delete one of the caller's courses.
#[utoipa::path(
    delete,
    path = "/api/v1/instructor/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Deleted course", body = CourseRecordBody),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the course owner", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "deleteCourseInstructor"
)]
#[delete("/instructor/courses/{id}")]
pub async fn delete_course_instructor(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseRecordBody>> {
    let caller = caller.require(INSTRUCTOR_ONLY)?;
    delete_course(&state, &caller, &path).await
}

/// List the students enrolled in one of the caller's courses.
#[utoipa::path(
    get,
    path = "/api/v1/instructor/courses/{courseId}/students",
    params(("courseId" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Enrolled students", body = [EnrolledStudentBody]),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the course owner", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "listCourseStudents"
)]
#[get("/instructor/courses/{course_id}/students")]
pub async fn list_course_students(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<EnrolledStudentBody>>> {
    let caller = caller.require(INSTRUCTOR_ONLY)?;
    let course: CourseId = parse_id(&path, FieldName::new("courseId"))?;
    let students = state
        .enrollments
        .list_students_for_course(caller.account_id(), course)
        .await?;
    Ok(web::Json(
        students.into_iter().map(EnrolledStudentBody::from).collect(),
    ))
}

#[cfg(test)]
#[path = "instructor_tests.rs"]
mod tests;
