//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every handler in the inbound HTTP layer plus the health probes
//! - **Schemas**: request and response bodies, the shared [`Error`] payload
//!   and its [`ErrorCode`]
//! - **Security**: bearer token authentication (HS256 JWT)
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Role};
use crate::inbound::http::dto::{
    AccountBody, AccountLoginResponse, AccountPage, AccountUpdateRequest, AcknowledgementBody,
    CourseBody, CoursePage, CourseRecordBody, CreateCourseRequest, EmployeeBody,
    EmployeeLoginResponse, EmployeePage, EmployeeRegisterRequest, EmployeeUpdateRequest,
    EnrolledCourseBody, EnrolledStudentBody, EnrollmentEntryBody, InstructorBody, LoginRequest,
    PurchaseRequest, RegisterRequest, StudentPage, UpdateCourseRequest,
};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by any of the login endpoints."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Academy backend API",
        description = "Course management for admins, instructors and students, plus an employee directory."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::admin::register_admin,
        crate::inbound::http::admin::login_admin,
        crate::inbound::http::admin::create_student,
        crate::inbound::http::admin::list_students,
        crate::inbound::http::admin::delete_student,
        crate::inbound::http::admin::list_accounts,
        crate::inbound::http::admin::get_account,
        crate::inbound::http::admin::update_account,
        crate::inbound::http::admin::delete_account,
        crate::inbound::http::admin::create_course_admin,
        crate::inbound::http::admin::list_courses_admin,
        crate::inbound::http::admin::get_course_admin,
        crate::inbound::http::admin::update_course_admin,
        crate::inbound::http::admin::delete_course_admin,
        crate::inbound::http::instructor::register_instructor,
        crate::inbound::http::instructor::login_instructor,
        crate::inbound::http::instructor::create_course_instructor,
        crate::inbound::http::instructor::list_courses_instructor,
        crate::inbound::http::instructor::get_course_instructor,
        crate::inbound::http::instructor::update_course_instructor,
        crate::inbound::http::instructor::delete_course_instructor,
        crate::inbound::http::instructor::list_course_students,
        crate::inbound::http::student::register_student,
        crate::inbound::http::student::login_student,
        crate::inbound::http::student::list_courses_student,
        crate::inbound::http::student::buy_course,
        crate::inbound::http::student::my_courses,
        crate::inbound::http::student::complete_course,
        crate::inbound::http::employees::register_employee,
        crate::inbound::http::employees::login_employee,
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::update_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        RegisterRequest,
        LoginRequest,
        AccountBody,
        AccountLoginResponse,
        AccountPage,
        AccountUpdateRequest,
        InstructorBody,
        CourseBody,
        CourseRecordBody,
        CoursePage,
        CreateCourseRequest,
        UpdateCourseRequest,
        PurchaseRequest,
        AcknowledgementBody,
        EnrolledCourseBody,
        EnrollmentEntryBody,
        EnrolledStudentBody,
        StudentPage,
        EmployeeRegisterRequest,
        EmployeeUpdateRequest,
        EmployeeBody,
        EmployeeLoginResponse,
        EmployeePage,
    )),
    tags(
        (name = "admin", description = "Account directory and course administration"),
        (name = "instructor", description = "Course authoring by instructors"),
        (name = "student", description = "Course purchase and progress"),
        (name = "employees", description = "Employee directory"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
