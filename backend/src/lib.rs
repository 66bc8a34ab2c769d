//! Academy backend library: course management and an employee directory.
//!
//! The crate follows a hexagonal layout. [`domain`] holds the entities,
//! ports and services; [`inbound`] adapts HTTP requests onto the driving
//! ports; [`outbound`] implements the driven ports against PostgreSQL or
//! process memory.
//!
//! ```no_run
//! use actix_web::{App, web};
//! use academy::Trace;
//! use academy::middleware::Timeout;
//!
//! let app = App::new()
//!     .wrap(Timeout::new(std::time::Duration::from_secs(30)))
//!     .wrap(Trace)
//!     .service(web::scope("/api/v1").configure(academy::inbound::http::configure));
//! # let _ = app;
//! ```

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
