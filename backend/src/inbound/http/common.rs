//! Handler bodies shared by the role-prefixed route modules.
//!
//! Admin, instructor and student routes differ only in the role they bind and
//! the role they require; the request handling itself lives here.

use actix_web::{HttpResponse, web};

use crate::domain::{
    AuthIdentity, CourseDraft, CourseId, CoursePatch, LoginCredentials, Registration, Role,
};

use super::ApiResult;
use super::dto::{
    AccountBody, AccountLoginResponse, CourseBody, CoursePage, CourseQuery, CourseRecordBody,
    CreateCourseRequest, LoginRequest, RegisterRequest, UpdateCourseRequest,
};
use super::state::HttpState;
use super::validation::{FieldName, parse_id, skip_limit};

pub(super) const COURSE_ID: FieldName = FieldName::new("id");

pub(super) async fn register_as(
    state: &HttpState,
    body: RegisterRequest,
    role: Role,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(body)?;
    let account = state.auth.register(registration, role).await?;
    Ok(HttpResponse::Created().json(AccountBody::from(account)))
}

pub(super) async fn login_as(
    state: &HttpState,
    body: LoginRequest,
    role: Role,
) -> ApiResult<web::Json<AccountLoginResponse>> {
    let credentials = LoginCredentials::try_from(body)?;
    let outcome = state.auth.login(credentials, Some(role)).await?;
    Ok(web::Json(AccountLoginResponse::new(
        outcome.token,
        outcome.subject,
    )))
}

pub(super) async fn create_course(
    state: &HttpState,
    caller: &AuthIdentity,
    body: CreateCourseRequest,
) -> ApiResult<HttpResponse> {
    let draft = CourseDraft::try_from(body)?;
    let listing = state.courses.create(caller, draft).await?;
    Ok(HttpResponse::Created().json(CourseBody::from(listing)))
}

pub(super) async fn list_courses(
    state: &HttpState,
    query: &CourseQuery,
) -> ApiResult<web::Json<CoursePage>> {
    let filter = query.filter()?;
    let page = skip_limit(query.skip, query.limit)?;
    let courses = state.courses.list(filter, page).await?;
    Ok(web::Json(CoursePage::from(courses)))
}

pub(super) async fn get_course(state: &HttpState, id: &str) -> ApiResult<web::Json<CourseBody>> {
    let id: CourseId = parse_id(id, COURSE_ID)?;
    let listing = state.courses.get(id).await?;
    Ok(web::Json(listing.into()))
}

pub(super) async fn update_course(
    state: &HttpState,
    caller: &AuthIdentity,
    id: &str,
    body: UpdateCourseRequest,
) -> ApiResult<web::Json<CourseBody>> {
    let id: CourseId = parse_id(id, COURSE_ID)?;
    let patch = CoursePatch::try_from(body)?;
    let listing = state.courses.update(caller, id, patch).await?;
    Ok(web::Json(listing.into()))
}

pub(super) async fn delete_course(
    state: &HttpState,
    caller: &AuthIdentity,
    id: &str,
) -> ApiResult<web::Json<CourseRecordBody>> {
    let id: CourseId = parse_id(id, COURSE_ID)?;
    let course = state.courses.delete(caller, id).await?;
    Ok(web::Json(course.into()))
}
