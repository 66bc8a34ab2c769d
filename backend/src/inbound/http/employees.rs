//! Employee directory handlers.
//!
//! ```text
//! POST /api/v1/employees/register {"name":"Grace","email":"g@example.com","password":"secret123","department":"Eng","salary":85000}
//! GET /api/v1/employees?department=eng&minSalary=50000&page=1&limit=10
//! ```
//!
//! Every route except register and login requires an employee token.

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{
    AccessRole, EmployeeId, EmployeePatch, EmployeeRegistration, Error, LoginCredentials,
};

use super::ApiResult;
use super::auth::Authenticated;
use super::dto::{
    EmployeeBody, EmployeeLoginResponse, EmployeePage, EmployeeQuery, EmployeeRegisterRequest,
    EmployeeUpdateRequest, LoginRequest,
};
use super::state::HttpState;
use super::validation::{FieldName, page_number, parse_id};

const EMPLOYEE_ONLY: &[AccessRole] = &[AccessRole::Employee];
const EMPLOYEE_ID: FieldName = FieldName::new("id");

/// Register an employee.
#[utoipa::path(
    post,
    path = "/api/v1/employees/register",
    request_body = EmployeeRegisterRequest,
    responses(
        (status = 201, description = "Employee registered", body = EmployeeBody),
        (status = 400, description = "Invalid request or duplicate email", body = Error)
    ),
    tags = ["employees"],
    operation_id = "registerEmployee",
    security([])
)]
#[post("/employees/register")]
pub async fn register_employee(
    state: web::Data<HttpState>,
    payload: web::Json<EmployeeRegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = EmployeeRegistration::try_from(payload.into_inner())?;
    let employee = state.employees.register(registration).await?;
    Ok(HttpResponse::Created().json(EmployeeBody::from(employee)))
}

/// Log in as an employee and receive a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/employees/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = EmployeeLoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 404, description = "Employee not found", body = Error)
    ),
    tags = ["employees"],
    operation_id = "loginEmployee",
    security([])
)]
#[post("/employees/login")]
pub async fn login_employee(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<EmployeeLoginResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let outcome = state.employees.login(credentials).await?;
    Ok(web::Json(EmployeeLoginResponse::new(
        outcome.token,
        outcome.subject,
    )))
}

/// Search the employee directory.
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Employees", body = EmployeePage),
        (status = 400, description = "Invalid filter or paging", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(
    state: web::Data<HttpState>,
    caller: Authenticated,
    query: web::Query<EmployeeQuery>,
) -> ApiResult<web::Json<EmployeePage>> {
    caller.require(EMPLOYEE_ONLY)?;
    let filter = query.filter()?;
    let window = page_number(query.page, query.limit)?;
    let page = state.employees.list(filter, window).await?;
    Ok(web::Json(EmployeePage {
        page: window.page_number(),
        limit: window.limit(),
        total: page.total,
        items: page.items.into_iter().map(EmployeeBody::from).collect(),
    }))
}

/// Fetch one employee.
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee", body = EmployeeBody),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Employee not found", body = Error)
    ),
    tags = ["employees"],
    operation_id = "getEmployee"
)]
#[get("/employees/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<EmployeeBody>> {
    caller.require(EMPLOYEE_ONLY)?;
    let id: EmployeeId = parse_id(&path, EMPLOYEE_ID)?;
    let employee = state.employees.get(id).await?;
    Ok(web::Json(employee.into()))
}

/// Update an employee. A supplied password is re-hashed.
#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Employee id")),
    request_body = EmployeeUpdateRequest,
    responses(
        (status = 200, description = "Updated employee", body = EmployeeBody),
        (status = 400, description = "Invalid request or duplicate email", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Employee not found", body = Error)
    ),
    tags = ["employees"],
    operation_id = "updateEmployee"
)]
#[put("/employees/{id}")]
pub async fn update_employee(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<EmployeeUpdateRequest>,
) -> ApiResult<web::Json<EmployeeBody>> {
    caller.require(EMPLOYEE_ONLY)?;
    let id: EmployeeId = parse_id(&path, EMPLOYEE_ID)?;
    let patch = EmployeePatch::try_from(payload.into_inner())?;
    let employee = state.employees.update(id, patch).await?;
    Ok(web::Json(employee.into()))
}

/// Delete an employee.
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Deleted employee", body = EmployeeBody),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Employee not found", body = Error)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/employees/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<EmployeeBody>> {
    caller.require(EMPLOYEE_ONLY)?;
    let id: EmployeeId = parse_id(&path, EMPLOYEE_ID)?;
    let employee = state.employees.delete(id).await?;
    Ok(web::Json(employee.into()))
}

#[cfg(test)]
#[path = "employees_tests.rs"]
mod tests;
