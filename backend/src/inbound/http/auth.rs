//! Bearer token extraction for protected routes.
//!
//! [`Authenticated`] verifies the `Authorization: Bearer <token>` header
//! against the configured [`TokenService`](crate::domain::ports::TokenService)
//! and hands the proven identity to the handler. Role checks stay in handlers
//! via [`authorize`](crate::domain::authorize).

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::ports::TokenError;
use crate::domain::{AccessRole, AuthIdentity, Error, authorize};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller, proven by a valid bearer token.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthIdentity);

impl Authenticated {
    /// Require the caller to hold one of `allowed`.
    pub fn require(self, allowed: &[AccessRole]) -> Result<AuthIdentity, Error> {
        authorize(&self.0, allowed)?;
        Ok(self.0)
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("authorization header is not valid text"))?;
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("authorization header must be 'Bearer <token>'"))
}

fn map_token_error(err: TokenError) -> Error {
    debug!(error = %err, "bearer token rejected");
    match err {
        TokenError::Expired => Error::unauthorized("token has expired"),
        TokenError::Invalid { .. } | TokenError::Signing { .. } => {
            Error::unauthorized("invalid token")
        }
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthIdentity, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let token = bearer_token(req)?;
    state.tokens.verify(token).map_err(map_token_error)
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(Self))
    }
}
