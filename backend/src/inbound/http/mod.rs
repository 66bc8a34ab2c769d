//! HTTP inbound adapter exposing REST endpoints.
//!
//! Every route registered by [`configure`] is relative to the `/api/v1`
//! scope the server mounts it under. Health probes are registered separately
//! at the root.

pub mod admin;
pub mod auth;
mod common;
pub mod dto;
pub mod employees;
pub mod error;
pub mod health;
pub mod instructor;
pub mod state;
pub mod student;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

use self::validation::malformed_input;

/// Register the API handlers and body/query decoding error mappers.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use academy::inbound::http::configure;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure));
/// # let _ = app;
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| malformed_input("JSON body", err).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| malformed_input("query string", err).into()),
    )
    .service(admin::register_admin)
    .service(admin::login_admin)
    .service(admin::create_student)
    .service(admin::list_students)
    .service(admin::delete_student)
    .service(admin::list_accounts)
    .service(admin::get_account)
    .service(admin::update_account)
    .service(admin::delete_account)
    .service(admin::create_course_admin)
    .service(admin::list_courses_admin)
    .service(admin::get_course_admin)
    .service(admin::update_course_admin)
    .service(admin::delete_course_admin)
    .service(instructor::register_instructor)
    .service(instructor::login_instructor)
    .service(instructor::create_course_instructor)
    .service(instructor::list_courses_instructor)
    .service(instructor::list_course_students)
    .service(instructor::get_course_instructor)
    .service(instructor::update_course_instructor)
    .service(instructor::delete_course_instructor)
    .service(student::register_student)
    .service(student::login_student)
    .service(student::list_courses_student)
    .service(student::buy_course)
    .service(student::my_courses)
    .service(student::complete_course)
    .service(employees::register_employee)
    .service(employees::login_employee)
    .service(employees::list_employees)
    .service(employees::get_employee)
    .service(employees::update_employee)
    .service(employees::delete_employee);
}
