//! Per-request correlation and access logging.
//!
//! [`Trace`] opens a `request` span carrying a fresh [`TraceId`], installs the
//! identifier in task-local storage for the duration of the handler, logs the
//! outcome with its latency and stamps the identifier on the response.

use std::rc::Rc;
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, info, info_span, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware assigning every request a [`TraceId`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use academy::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: Rc<S>,
}

fn stamp<B>(res: &mut ServiceResponse<B>, trace_id: TraceId) {
    match HeaderValue::try_from(trace_id.to_string()) {
        Ok(value) => {
            res.headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(error) => warn!(%error, "trace identifier is not a valid header value"),
    }
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let span = info_span!(
            "request",
            %trace_id,
            method = %req.method(),
            path = req.path(),
        );
        let service = Rc::clone(&self.service);
        let started = Instant::now();

        Box::pin(
            TraceId::scope(trace_id, async move {
                let mut res = service.call(req).await?;
                let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                info!(status = res.status().as_u16(), elapsed_ms, "request completed");
                stamp(&mut res, trace_id);
                Ok(res)
            })
            .instrument(span),
        )
    }
}
