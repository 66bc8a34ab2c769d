//! Employee directory behaviour through the full routing table.

use std::sync::Arc;

use academy::test_support::{MutableClock, api_app};
use actix_web::http::StatusCode;
use actix_web::test::{self as actix_test, TestRequest};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[path = "support/api.rs"]
#[allow(dead_code, reason = "each test crate uses a different subset of helpers")]
mod api;

use api::{ApiService, PASSWORD, call, call_as, code_of, pinned_clock, state_with};

#[fixture]
fn clock() -> Arc<MutableClock> {
    pinned_clock()
}

async fn hire(app: &impl ApiService, name: &str, email: &str, department: &str, salary: i64) -> Value {
    let (status, body) = call(
        app,
        TestRequest::post().uri("/api/v1/employees/register").set_json(json!({
            "name": name,
            "email": email,
            "password": PASSWORD,
            "department": department,
            "salary": salary
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body
}

async fn sign_in(app: &impl ApiService, email: &str) -> String {
    let (status, body) = call(
        app,
        TestRequest::post()
            .uri("/api/v1/employees/login")
            .set_json(json!({ "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("token").to_owned()
}

#[rstest]
#[actix_web::test]
async fn directory_walks_every_page(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(api_app(state_with(clock))).await;
    for n in 0..12 {
        hire(
            &app,
            &format!("Staff Member {n:02}"),
            &format!("staff{n}@example.com"),
            "Operations",
            30_000 + n,
        )
        .await;
    }
    let token = sign_in(&app, "staff0@example.com").await;

    let mut seen = Vec::new();
    for page in 1..=3 {
        let (status, body) = call_as(
            &app,
            &token,
            TestRequest::get().uri(&format!("/api/v1/employees?page={page}&limit=5")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], page);
        assert_eq!(body["total"], 12);
        let items = body["items"].as_array().expect("items");
        seen.extend(items.iter().filter_map(|item| item["id"].as_str().map(str::to_owned)));
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 12);
}

#[rstest]
#[actix_web::test]
async fn defaults_apply_without_paging_parameters(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(api_app(state_with(clock))).await;
    hire(&app, "Grace Hopper", "grace@example.com", "Engineering", 90_000).await;
    let token = sign_in(&app, "grace@example.com").await;

    let (status, body) = call_as(&app, &token, TestRequest::get().uri("/api/v1/employees")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["items"][0]["department"], "Engineering");
}

#[rstest]
#[actix_web::test]
async fn account_tokens_do_not_open_the_directory(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(api_app(state_with(clock))).await;
    let (_, admin) =
        api::enrol_account(&app, "admin", "Ada Admin", "ada@example.com").await;
    let (status, body) = call_as(&app, &admin, TestRequest::get().uri("/api/v1/employees")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code_of(&body), "forbidden");
}

#[rstest]
#[actix_web::test]
async fn employee_tokens_do_not_open_account_routes(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(api_app(state_with(clock))).await;
    hire(&app, "Grace Hopper", "grace@example.com", "Engineering", 90_000).await;
    let token = sign_in(&app, "grace@example.com").await;
    let (status, _) = call_as(&app, &token, TestRequest::get().uri("/api/v1/admin/accounts")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn employee_tokens_expire_with_the_clock(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(api_app(state_with(clock.clone()))).await;
    let grace = hire(&app, "Grace Hopper", "grace@example.com", "Engineering", 90_000).await;
    let token = sign_in(&app, "grace@example.com").await;
    let uri = format!("/api/v1/employees/{}", grace["id"].as_str().expect("id"));

    let (status, _) = call_as(&app, &token, TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::OK);

    clock.advance_seconds(3_600);
    let (status, body) = call_as(&app, &token, TestRequest::get().uri(&uri)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "token has expired");
}
