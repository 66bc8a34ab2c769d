//! Test helpers for inbound HTTP handlers.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self as actix_test, TestRequest};
use serde_json::{Value, json};

use crate::inbound::http::state::HttpState;
use crate::test_support::{bearer, in_memory_state};

pub(crate) const PASSWORD: &str = "secret123";

/// Service produced by `actix_web::test::init_service` for the API app.
pub(crate) trait TestApp:
    Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
}

impl<S> TestApp for S where S: Service<Request, Response = ServiceResponse, Error = actix_web::Error> {}

pub(crate) fn fresh_state() -> HttpState {
    in_memory_state(Arc::new(mockable::DefaultClock))
}

/// Send `req` and decode the body as JSON (`Null` when empty).
pub(crate) async fn send(app: &impl TestApp, req: TestRequest) -> (StatusCode, Value) {
    let res = actix_test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body = actix_test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

/// Send `req` with a bearer token.
pub(crate) async fn send_as(
    app: &impl TestApp,
    token: &str,
    req: TestRequest,
) -> (StatusCode, Value) {
    send(app, req.insert_header(bearer(token))).await
}

/// Register through `/{prefix}/register` and return the created account.
pub(crate) async fn register(app: &impl TestApp, prefix: &str, name: &str, email: &str) -> Value {
    let (status, body) = send(
        app,
        TestRequest::post()
            .uri(&format!("/api/v1/{prefix}/register"))
            .set_json(json!({ "name": name, "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body
}

/// Log in through `/{prefix}/login` and return the token.
pub(crate) async fn login(app: &impl TestApp, prefix: &str, email: &str) -> String {
    let (status, body) = send(
        app,
        TestRequest::post()
            .uri(&format!("/api/v1/{prefix}/login"))
            .set_json(json!({ "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("token").to_owned()
}

/// Register and log in, returning the account id and token.
pub(crate) async fn signed_in(
    app: &impl TestApp,
    prefix: &str,
    name: &str,
    email: &str,
) -> (String, String) {
    let account = register(app, prefix, name, email).await;
    let token = login(app, prefix, email).await;
    (account["id"].as_str().expect("id").to_owned(), token)
}

/// Create a course as `token` and return its id.
pub(crate) async fn create_course(
    app: &impl TestApp,
    prefix: &str,
    token: &str,
    body: Value,
) -> String {
    let (status, course) = send_as(
        app,
        token,
        TestRequest::post()
            .uri(&format!("/api/v1/{prefix}/courses"))
            .set_json(body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create course failed: {course}");
    course["id"].as_str().expect("course id").to_owned()
}

pub(crate) fn error_code(body: &Value) -> &str {
    body["code"].as_str().expect("error code")
}
