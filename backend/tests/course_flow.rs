//! End-to-end course lifecycle across the admin, instructor and student
//! surfaces, driven through the full `/api/v1` routing table.

use std::sync::Arc;

use academy::test_support::{MutableClock, api_app};
use actix_web::http::StatusCode;
use actix_web::test::{self as actix_test, TestRequest};
use rstest::{fixture, rstest};
use serde_json::json;

#[path = "support/api.rs"]
#[allow(dead_code, reason = "each test crate uses a different subset of helpers")]
mod api;

use api::{call, call_as, code_of, enrol_account, pinned_clock, state_with};

#[fixture]
fn clock() -> Arc<MutableClock> {
    pinned_clock()
}

#[rstest]
#[actix_web::test]
async fn course_lifecycle_spans_every_role(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(api_app(state_with(clock))).await;
    let (_, admin) = enrol_account(&app, "admin", "Ada Admin", "ada@example.com").await;
    let (ivy_id, ivy) = enrol_account(&app, "instructor", "Ivy Instructor", "ivy@example.com").await;
    let (sam_id, sam) = enrol_account(&app, "student", "Sam Student", "sam@example.com").await;

    let (status, course) = call_as(
        &app,
        &admin,
        TestRequest::post().uri("/api/v1/admin/courses").set_json(json!({
            "title": "Systems Rust",
            "description": "Unsafe, FFI and friends",
            "instructor": ivy_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{course}");
    let course_id = course["id"].as_str().expect("course id").to_owned();
    assert_eq!(course["instructor"]["email"], "ivy@example.com");

    let (status, _) = call_as(
        &app,
        &sam,
        TestRequest::post()
            .uri("/api/v1/student/buy")
            .set_json(json!({ "courseId": course_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, roster) = call_as(
        &app,
        &ivy,
        TestRequest::get().uri(&format!("/api/v1/instructor/courses/{course_id}/students")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(roster[0]["id"], sam_id.as_str());

    let (status, _) = call_as(
        &app,
        &sam,
        TestRequest::put().uri(&format!("/api/v1/student/my-courses/{course_id}/complete")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, students) =
        call_as(&app, &admin, TestRequest::get().uri("/api/v1/admin/students")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(students["total"], 1);
    assert_eq!(
        students["items"][0]["enrolledCourses"],
        json!([{ "courseId": course_id, "completed": true }])
    );

    let (status, mine) =
        call_as(&app, &sam, TestRequest::get().uri("/api/v1/student/my-courses")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine[0]["status"], "Completed");
}

#[rstest]
#[actix_web::test]
async fn catalogue_windows_report_the_full_total(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(api_app(state_with(clock))).await;
    let (_, ivy) = enrol_account(&app, "instructor", "Ivy Instructor", "ivy@example.com").await;
    for n in 0..15 {
        let (status, _) = call_as(
            &app,
            &ivy,
            TestRequest::post()
                .uri("/api/v1/instructor/courses")
                .set_json(json!({ "title": format!("Course {n:02}") })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, first) =
        call_as(&app, &ivy, TestRequest::get().uri("/api/v1/instructor/courses")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["total"], 15);
    assert_eq!(first["items"].as_array().map(Vec::len), Some(10));

    let (status, second) = call_as(
        &app,
        &ivy,
        TestRequest::get().uri("/api/v1/instructor/courses?skip=10&limit=10"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["total"], 15);
    assert_eq!(second["items"].as_array().map(Vec::len), Some(5));
}

#[rstest]
#[actix_web::test]
async fn tokens_stop_working_after_an_hour(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(api_app(state_with(clock.clone()))).await;
    let (_, sam) = enrol_account(&app, "student", "Sam Student", "sam@example.com").await;

    clock.advance_seconds(3_599);
    let (status, _) = call_as(&app, &sam, TestRequest::get().uri("/api/v1/student/courses")).await;
    assert_eq!(status, StatusCode::OK);

    clock.advance_seconds(2);
    let (status, body) =
        call_as(&app, &sam, TestRequest::get().uri("/api/v1/student/courses")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(code_of(&body), "unauthorized");
    assert_eq!(body["message"], "token has expired");
}

#[rstest]
#[case("admin", "/api/v1/instructor/courses")]
#[case("instructor", "/api/v1/admin/accounts")]
#[case("student", "/api/v1/admin/courses")]
#[case("instructor", "/api/v1/student/my-courses")]
#[actix_web::test]
async fn roles_are_confined_to_their_surface(
    clock: Arc<MutableClock>,
    #[case] role: &str,
    #[case] uri: &str,
) {
    let app = actix_test::init_service(api_app(state_with(clock))).await;
    let (_, token) = enrol_account(&app, role, "Rita Role", "rita@example.com").await;
    let (status, body) = call_as(&app, &token, TestRequest::get().uri(uri)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code_of(&body), "forbidden");
}

#[rstest]
#[actix_web::test]
async fn removed_instructors_leave_orphaned_courses_visible(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(api_app(state_with(clock))).await;
    let (_, admin) = enrol_account(&app, "admin", "Ada Admin", "ada@example.com").await;
    let (ivy_id, ivy) = enrol_account(&app, "instructor", "Ivy Instructor", "ivy@example.com").await;
    let (status, course) = call_as(
        &app,
        &ivy,
        TestRequest::post()
            .uri("/api/v1/instructor/courses")
            .set_json(json!({ "title": "Rust 101" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let course_id = course["id"].as_str().expect("course id").to_owned();

    let (status, _) = call_as(
        &app,
        &admin,
        TestRequest::put()
            .uri(&format!("/api/v1/admin/accounts/{ivy_id}"))
            .set_json(json!({ "role": "student" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call_as(
        &app,
        &admin,
        TestRequest::delete().uri(&format!("/api/v1/admin/students/{ivy_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, orphan) = call_as(
        &app,
        &admin,
        TestRequest::get().uri(&format!("/api/v1/admin/courses/{course_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(orphan["instructor"].is_null());
}

#[rstest]
#[actix_web::test]
async fn unauthenticated_requests_carry_a_trace_id(clock: Arc<MutableClock>) {
    let app = actix_test::init_service(api_app(state_with(clock))).await;
    let res = actix_test::call_service(
        &app,
        TestRequest::get().uri("/api/v1/admin/accounts").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let header = res
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace-id header");
    let body: serde_json::Value = actix_test::read_body_json(res).await;
    assert_eq!(body["traceId"], header.as_str());

    let (status, _) = call(&app, TestRequest::get().uri("/api/v1/nowhere")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
