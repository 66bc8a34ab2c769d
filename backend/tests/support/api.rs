//! Shared helpers for the in-process API integration tests.
//!
//! Each test builds a fresh in-memory [`HttpState`] and drives the real
//! Actix routing table through `actix_web::test`, so nothing here touches a
//! socket or a database.

use std::sync::Arc;

use academy::inbound::http::state::HttpState;
use academy::test_support::{MutableClock, bearer, in_memory_state};
use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self as actix_test, TestRequest};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

pub const PASSWORD: &str = "secret123";

/// Service returned by `actix_web::test::init_service`.
pub trait ApiService:
    Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
}

impl<S> ApiService for S where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
}

/// Clock pinned to a fixed instant so expiry can be stepped deterministically.
pub fn pinned_clock() -> Arc<MutableClock> {
    let start = Utc
        .with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
        .single()
        .expect("valid start instant");
    Arc::new(MutableClock::new(start))
}

pub fn state_with(clock: Arc<MutableClock>) -> HttpState {
    in_memory_state(clock)
}

pub async fn call(app: &impl ApiService, req: TestRequest) -> (StatusCode, Value) {
    let res = actix_test::call_service(app, req.to_request()).await;
    let status = res.status();
    let bytes = actix_test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

pub async fn call_as(app: &impl ApiService, token: &str, req: TestRequest) -> (StatusCode, Value) {
    call(app, req.insert_header(bearer(token))).await
}

/// Register a role account and return `(id, token)`.
pub async fn enrol_account(
    app: &impl ApiService,
    role: &str,
    name: &str,
    email: &str,
) -> (String, String) {
    let (status, account) = call(
        app,
        TestRequest::post()
            .uri(&format!("/api/v1/{role}/register"))
            .set_json(json!({ "name": name, "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {account}");
    assert_eq!(account["role"], role);

    let (status, login) = call(
        app,
        TestRequest::post()
            .uri(&format!("/api/v1/{role}/login"))
            .set_json(json!({ "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {login}");
    let id = account["id"].as_str().expect("account id").to_owned();
    let token = login["token"].as_str().expect("token").to_owned();
    (id, token)
}

pub fn code_of(body: &Value) -> &str {
    body["code"].as_str().unwrap_or_default()
}
