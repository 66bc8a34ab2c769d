//! Admin API handlers.
//!
//! ```text
//! POST /api/v1/admin/register {"name":"Root","email":"root@example.com","password":"secret123"}
//! POST /api/v1/admin/login {"email":"root@example.com","password":"secret123"}
//! GET /api/v1/admin/accounts?role=student&skip=0&limit=10
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{AccessRole, AccountId, AccountPatch, Error, Registration, Role};

use super::ApiResult;
use super::auth::Authenticated;
use super::common::{
    create_course, delete_course, get_course, list_courses, login_as, register_as, update_course,
};
use super::dto::{
    AccountBody, AccountLoginResponse, AccountPage, AccountQuery, AccountUpdateRequest,
    CourseBody, CoursePage, CourseQuery, CourseRecordBody, CreateCourseRequest, LoginRequest,
    RegisterRequest, StudentPage, UpdateCourseRequest, WindowQuery,
};
use super::state::HttpState;
use super::validation::{FieldName, parse_id, skip_limit};

const ADMIN_ONLY: &[AccessRole] = &[AccessRole::Admin];
const ACCOUNT_ID: FieldName = FieldName::new("id");

/// Register an admin account.
#[utoipa::path(
    post,
    path = "/api/v1/admin/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Admin registered", body = AccountBody),
        (status = 400, description = "Invalid request or duplicate email", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "registerAdmin",
    security([])
)]
#[post("/admin/register")]
pub async fn register_admin(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    register_as(&state, payload.into_inner(), Role::Admin).await
}

/// Log in as an admin and receive a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AccountLoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 404, description = "No admin with this email", body = Error)
    ),
    tags = ["admin"],
    operation_id = "loginAdmin",
    security([])
)]
#[post("/admin/login")]
pub async fn login_admin(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AccountLoginResponse>> {
    login_as(&state, payload.into_inner(), Role::Admin).await
}

/// Create a student account on someone's behalf.
#[utoipa::path(
    post,
    path = "/api/v1/admin/students",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Student created", body = AccountBody),
        (status = 400, description = "Invalid request or duplicate email", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createStudent"
)]
#[post("/admin/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    caller.require(ADMIN_ONLY)?;
    let registration = Registration::try_from(payload.into_inner())?;
    let account = state.accounts.create(registration, Role::Student).await?;
    Ok(HttpResponse::Created().json(AccountBody::from(account)))
}

/// List students with their enrollments, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/admin/students",
    params(WindowQuery),
    responses(
        (status = 200, description = "Students", body = StudentPage),
        (status = 400, description = "Invalid paging", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listStudents"
)]
#[get("/admin/students")]
pub async fn list_students(
    state: web::Data<HttpState>,
    caller: Authenticated,
    query: web::Query<WindowQuery>,
) -> ApiResult<web::Json<StudentPage>> {
    caller.require(ADMIN_ONLY)?;
    let page = skip_limit(query.skip, query.limit)?;
    let students = state.enrollments.list_students(page).await?;
    Ok(web::Json(StudentPage::from(students)))
}

/// Delete a student account and its enrollments.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/students/{id}",
    params(("id" = String, Path, description = "Student account id")),
    responses(
        (status = 200, description = "Deleted student", body = AccountBody),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Student not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "deleteStudent"
)]
#[delete("/admin/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<AccountBody>> {
    caller.require(ADMIN_ONLY)?;
    let id: AccountId = parse_id(&path, ACCOUNT_ID)?;
    let account = state.accounts.get(id).await?;
    if account.role != Role::Student {
        return Err(Error::not_found("student not found"));
    }
    let deleted = state.accounts.delete(id).await?;
    Ok(web::Json(deleted.into()))
}

/// Search the account directory.
#[utoipa::path(
    get,
    path = "/api/v1/admin/accounts",
    params(AccountQuery),
    responses(
        (status = 200, description = "Accounts", body = AccountPage),
        (status = 400, description = "Invalid filter or paging", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listAccounts"
)]
#[get("/admin/accounts")]
pub async fn list_accounts(
    state: web::Data<HttpState>,
    caller: Authenticated,
    query: web::Query<AccountQuery>,
) -> ApiResult<web::Json<AccountPage>> {
    caller.require(ADMIN_ONLY)?;
    let filter = query.filter()?;
    let page = skip_limit(query.skip, query.limit)?;
    let accounts = state.accounts.list(filter, page).await?;
    Ok(web::Json(AccountPage::from(accounts)))
}

/// Fetch one account.
#[utoipa::path(
    get,
    path = "/api/v1/admin/accounts/{id}",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account", body = AccountBody),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Account not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "getAccount"
)]
#[get("/admin/accounts/{id}")]
pub async fn get_account(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<AccountBody>> {
    caller.require(ADMIN_ONLY)?;
    let id: AccountId = parse_id(&path, ACCOUNT_ID)?;
    let account = state.accounts.get(id).await?;
    Ok(web::Json(account.into()))
}

/// Update name, email, password or role of an account.
#[utoipa::path(
    put,
    path = "/api/v1/admin/accounts/{id}",
    params(("id" = String, Path, description = "Account id")),
    request_body = AccountUpdateRequest,
    responses(
        (status = 200, description = "Updated account", body = AccountBody),
        (status = 400, description = "Invalid request or duplicate email", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Account not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "updateAccount"
)]
#[put("/admin/accounts/{id}")]
pub async fn update_account(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<AccountUpdateRequest>,
) -> ApiResult<web::Json<AccountBody>> {
    caller.require(ADMIN_ONLY)?;
    let id: AccountId = parse_id(&path, ACCOUNT_ID)?;
    let patch = AccountPatch::try_from(payload.into_inner())?;
    let account = state.accounts.update(id, patch).await?;
    Ok(web::Json(account.into()))
}

/// Delete an account of any role. Enrollments of a deleted student go with it.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/accounts/{id}",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = 200, description = "Deleted account", body = AccountBody),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Account not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "deleteAccount"
)]
#[delete("/admin/accounts/{id}")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<AccountBody>> {
    caller.require(ADMIN_ONLY)?;
    let id: AccountId = parse_id(&path, ACCOUNT_ID)?;
    let deleted = state.accounts.delete(id).await?;
    Ok(web::Json(deleted.into()))
}

/// Create a course owned by the named instructor.
#[utoipa::path(
    post,
    path = "/api/v1/admin/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseBody),
        (status = 400, description = "Invalid request or unknown instructor", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createCourseAdmin"
)]
#[post("/admin/courses")]
pub async fn create_course_admin(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<CreateCourseRequest>,
) -> ApiResult<HttpResponse> {
    let caller = caller.require(ADMIN_ONLY)?;
    create_course(&state, &caller, payload.into_inner()).await
}

/// List courses.
#[utoipa::path(
    get,
    path = "/api/v1/admin/courses",
    params(CourseQuery),
    responses(
        (status = 200, description = "Courses", body = CoursePage),
        (status = 400, description = "Invalid filter or paging", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listCoursesAdmin"
)]
#[get("/admin/courses")]
pub async fn list_courses_admin(
    state: web::Data<HttpState>,
    caller: Authenticated,
    query: web::Query<CourseQuery>,
) -> ApiResult<web::Json<CoursePage>> {
    caller.require(ADMIN_ONLY)?;
    list_courses(&state, &query).await
}

/// Fetch one course.
#[utoipa::path(
    get,
    path = "/api/v1/admin/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course", body = CourseBody),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "getCourseAdmin"
)]
#[get("/admin/courses/{id}")]
pub async fn get_course_admin(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseBody>> {
    caller.require(ADMIN_ONLY)?;
    get_course(&state, &path).await
}

/// Update any course, including reassigning its instructor.
#[utoipa::path(
    put,
    path = "/api/v1/admin/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Updated course", body = CourseBody),
        (status = 400, description = "Invalid request or unknown instructor", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "updateCourseAdmin"
)]
#[put("/admin/courses/{id}")]
pub async fn update_course_admin(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<UpdateCourseRequest>,
) -> ApiResult<web::Json<CourseBody>> {
    let caller = caller.require(ADMIN_ONLY)?;
    update_course(&state, &caller, &path, payload.into_inner()).await
}

/// Delete any course. Enrollments referencing it are left dangling.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Deleted course", body = CourseRecordBody),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "deleteCourseAdmin"
)]
#[delete("/admin/courses/{id}")]
pub async fn delete_course_admin(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseRecordBody>> {
    let caller = caller.require(ADMIN_ONLY)?;
    delete_course(&state, &caller, &path).await
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
