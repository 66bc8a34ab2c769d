//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use academy::Trace;
#[cfg(debug_assertions)]
use academy::doc::ApiDoc;
use academy::inbound::http::configure;
use academy::inbound::http::health::{HealthState, live, ready};
use academy::inbound::http::state::HttpState;
use academy::middleware::Timeout;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    timeout: Timeout,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        timeout,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(timeout)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let timeout = Timeout::new(config.request_timeout);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            timeout,
        })
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Smoke coverage for the assembled application.

    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::test::{self as actix_test, TestRequest};
    use academy::TraceId;
    use academy::domain::TRACE_ID_HEADER;
    use academy::outbound::security::JwtSecret;
    use rstest::rstest;

    use super::*;

    fn deps() -> AppDependencies {
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("socket address"),
            JwtSecret::generate(),
        )
        .with_bcrypt_cost(4);
        let health = HealthState::new();
        health.mark_ready();
        AppDependencies {
            health_state: web::Data::new(health),
            http_state: web::Data::new(build_http_state(&config)),
            timeout: Timeout::new(Duration::from_secs(5)),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn probes_and_api_share_one_app() {
        let app = actix_test::init_service(build_app(deps())).await;

        let res = actix_test::call_service(
            &app,
            TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = actix_test::call_service(
            &app,
            TestRequest::get().uri("/api/v1/admin/accounts").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .expect("trace id header");
        assert!(header.parse::<TraceId>().is_ok());
    }

    #[rstest]
    #[actix_web::test]
    async fn path_routes_resolve_behind_the_full_middleware_stack() {
        let app = actix_test::init_service(build_app(deps())).await;
        let credentials = serde_json::json!({
            "name": "Root User",
            "email": "root@example.com",
            "password": "secret123",
        });

        let res = actix_test::call_service(
            &app,
            TestRequest::post()
                .uri("/api/v1/admin/register")
                .set_json(&credentials)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let account: serde_json::Value = actix_test::read_body_json(res).await;

        let res = actix_test::call_service(
            &app,
            TestRequest::post()
                .uri("/api/v1/admin/login")
                .set_json(serde_json::json!({
                    "email": "root@example.com",
                    "password": "secret123",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let login: serde_json::Value = actix_test::read_body_json(res).await;
        let token = login["token"].as_str().expect("token");

        let id = account["id"].as_str().expect("account id");
        let res = actix_test::call_service(
            &app,
            TestRequest::get()
                .uri(&format!("/api/v1/admin/accounts/{id}"))
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
        let fetched: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(fetched["email"], "root@example.com");
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_routes_are_not_found() {
        let app = actix_test::init_service(build_app(deps())).await;
        let res = actix_test::call_service(
            &app,
            TestRequest::get().uri("/api/v1/nowhere").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
