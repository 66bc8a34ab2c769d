//! Request deadline middleware.
//!
//! Requests that do not complete within the configured duration are answered
//! with `503 service_unavailable` instead of hanging on a stalled store.

use std::task::{Context, Poll};
use std::time::Duration;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::warn;

use crate::domain::Error as DomainError;

/// Deadline used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Middleware bounding the time spent handling a single request.
///
/// An expired deadline surfaces as a `service_unavailable` error, which Actix
/// renders through the domain error's `ResponseError` implementation.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use actix_web::App;
/// use academy::middleware::Timeout;
///
/// let app = App::new().wrap(Timeout::new(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Timeout {
    duration: Duration,
}

impl Timeout {
    /// Build a timeout middleware with the given deadline.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Deadline applied to each request.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TIMEOUT)
    }
}

impl<S, B> Transform<S, ServiceRequest> for Timeout
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TimeoutMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimeoutMiddleware {
            service,
            duration: self.duration,
        }))
    }
}

/// Service wrapper produced by [`Timeout`].
pub struct TimeoutMiddleware<S> {
    service: S,
    duration: Duration,
}

impl<S, B> Service<ServiceRequest> for TimeoutMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // The request must stay uniquely owned: routing mutates its match info.
        let path = req.path().to_owned();
        let duration = self.duration;
        let fut = self.service.call(req);
        Box::pin(async move {
            tokio::time::timeout(duration, fut).await.unwrap_or_else(|_| {
                warn!(
                    path = %path,
                    timeout_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                    "request timed out"
                );
                Err(DomainError::service_unavailable("request timed out").into())
            })
        })
    }
}
