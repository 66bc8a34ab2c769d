//! Maps domain [`Error`] values onto Actix responses.
//!
//! The status code depends on the [`ErrorCode`] alone. Internal failures are
//! logged with their original message and replaced by a generic payload before
//! they reach the client. A trace identifier carried by the error is echoed in
//! the `trace-id` response header.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

pub use crate::domain::ApiResult;

const INTERNAL_MESSAGE: &str = "Internal server error";

const fn http_status(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest
        | ErrorCode::DuplicateEmail
        | ErrorCode::AlreadyEnrolled
        | ErrorCode::NotEnrolled => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized | ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The payload clients are allowed to see.
fn client_view(error: &Error) -> Cow<'_, Error> {
    if error.code() != ErrorCode::InternalError {
        return Cow::Borrowed(error);
    }
    let generic = Error::internal(INTERNAL_MESSAGE);
    Cow::Owned(match error.trace_id() {
        Some(id) => generic.with_trace_id(id),
        None => generic,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        http_status(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self.code() {
            ErrorCode::InternalError => {
                error!(message = self.message(), trace_id = ?self.trace_id(), "request failed");
            }
            ErrorCode::ServiceUnavailable => {
                warn!(message = self.message(), trace_id = ?self.trace_id(), "dependency unavailable");
            }
            _ => {}
        }

        let mut response = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(client_view(self).as_ref())
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced in a handler");
        Self::internal(INTERNAL_MESSAGE)
    }
}
