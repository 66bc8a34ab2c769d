//! Student API handlers: browsing, purchasing and completing courses.

use actix_web::{HttpResponse, get, post, put, web};

use crate::domain::{AccessRole, CourseId, Error, Role};

use super::ApiResult;
use super::auth::Authenticated;
use super::common::{list_courses, login_as, register_as};
use super::dto::{
    AccountBody, AccountLoginResponse, AcknowledgementBody, CoursePage, CourseQuery,
    EnrolledCourseBody, LoginRequest, PurchaseRequest, RegisterRequest, purchase_course_id,
};
use super::state::HttpState;
use super::validation::{FieldName, parse_id};

const STUDENT_ONLY: &[AccessRole] = &[AccessRole::Student];

/// Register a student account.
#[utoipa::path(
    post,
    path = "/api/v1/student/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Student registered", body = AccountBody),
        (status = 400, description = "Invalid request or duplicate email", body = Error)
    ),
    tags = ["student"],
    operation_id = "registerStudent",
    security([])
)]
#[post("/student/register")]
pub async fn register_student(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    register_as(&state, payload.into_inner(), Role::Student).await
}

/// Log in as a student and receive a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/student/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AccountLoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 404, description = "No student with this email", body = Error)
    ),
    tags = ["student"],
    operation_id = "loginStudent",
    security([])
)]
#[post("/student/login")]
pub async fn login_student(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AccountLoginResponse>> {
    login_as(&state, payload.into_inner(), Role::Student).await
}

/// Browse the course catalogue.
#[utoipa::path(
    get,
    path = "/api/v1/student/courses",
    params(CourseQuery),
    responses(
        (status = 200, description = "Courses", body = CoursePage),
        (status = 400, description = "Invalid filter or paging", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["student"],
    operation_id = "listCoursesStudent"
)]
#[get("/student/courses")]
pub async fn list_courses_student(
    state: web::Data<HttpState>,
    caller: Authenticated,
    query: web::Query<CourseQuery>,
) -> ApiResult<web::Json<CoursePage>> {
    caller.require(STUDENT_ONLY)?;
    list_courses(&state, &query).await
}

/// Purchase a course.
#[utoipa::path(
    post,
    path = "/api/v1/student/buy",
    request_body = PurchaseRequest,
    responses(
        (status = 200, description = "Course purchased", body = AcknowledgementBody),
        (status = 400, description = "Malformed id or already enrolled", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["student"],
    operation_id = "buyCourse"
)]
#[post("/student/buy")]
pub async fn buy_course(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<PurchaseRequest>,
) -> ApiResult<web::Json<AcknowledgementBody>> {
    let caller = caller.require(STUDENT_ONLY)?;
    let course = purchase_course_id(&payload)?;
    let ack = state
        .enrollments
        .purchase(caller.account_id(), course)
        .await?;
    Ok(web::Json(ack.into()))
}

/// List the caller's enrolled courses in purchase order.
#[utoipa::path(
    get,
    path = "/api/v1/student/my-courses",
    responses(
        (status = 200, description = "Enrolled courses", body = [EnrolledCourseBody]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["student"],
    operation_id = "listMyCourses"
)]
#[get("/student/my-courses")]
pub async fn my_courses(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<web::Json<Vec<EnrolledCourseBody>>> {
    let caller = caller.require(STUDENT_ONLY)?;
    let courses = state.enrollments.list_for_student(caller.account_id()).await?;
    Ok(web::Json(
        courses.into_iter().map(EnrolledCourseBody::from).collect(),
    ))
}

/// Mark an enrolled course as completed. Repeating the call is harmless.
#[utoipa::path(
    put,
    path = "/api/v1/student/my-courses/{courseId}/complete",
    params(("courseId" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course completed", body = AcknowledgementBody),
        (status = 400, description = "Malformed id or not enrolled", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["student"],
    operation_id = "completeCourse"
)]
#[put("/student/my-courses/{course_id}/complete")]
pub async fn complete_course(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<AcknowledgementBody>> {
    let caller = caller.require(STUDENT_ONLY)?;
    let course: CourseId = parse_id(&path, FieldName::new("courseId"))?;
    let ack = state
        .enrollments
        .complete(caller.account_id(), course)
        .await?;
    Ok(web::Json(ack.into()))
}

#[cfg(test)]
#[path = "student_tests.rs"]
mod tests;
