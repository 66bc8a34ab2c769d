//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with the
//! `test-support` feature.

use std::sync::Arc;

use mockable::Clock;

use crate::inbound::http::state::{Credentials, HttpState, Repositories};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::security::{BcryptPasswordHasher, JwtSecret, JwtTokenService, MIN_COST};

pub use self::clock::MutableClock;
pub use self::http::{api_app, bearer};

pub mod clock {
    //! Manually advanced clock for expiry and ordering tests.

    use std::sync::{Mutex, MutexGuard};

    use chrono::{DateTime, Local, TimeDelta, Utc};
    use mockable::Clock;

    /// Clock that only moves when told to.
    pub struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        pub fn advance_seconds(&self, seconds: i64) {
            *self.lock_clock() += TimeDelta::seconds(seconds);
        }

        fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
            match self.0.lock() {
                Ok(guard) => guard,
                Err(_) => panic!("clock mutex"),
            }
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.lock_clock()
        }
    }
}

pub mod http {
    //! Builders for exercising the HTTP adapter in-process.

    use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{App, web};

    use crate::Trace;
    use crate::inbound::http::configure;
    use crate::inbound::http::state::HttpState;
    use crate::middleware::Timeout;

    /// App mounting the API under `/api/v1` behind the same middleware stack
    /// as the server: the default request deadline inside request tracing.
    pub fn api_app(
        state: HttpState,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Timeout::default())
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(configure))
    }

    /// `Authorization` header carrying `token`.
    pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
        (AUTHORIZATION, format!("Bearer {token}"))
    }
}

/// Handler state backed by a fresh in-memory store.
///
/// Uses the cheapest bcrypt cost and a random signing secret; tokens expire
/// after one hour of `clock` time.
pub fn in_memory_state(clock: Arc<dyn Clock>) -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    let tokens = Arc::new(JwtTokenService::new(
        &JwtSecret::generate(),
        chrono::Duration::hours(1),
        clock.clone(),
    ));
    HttpState::from_adapters(
        Repositories {
            accounts: store.clone(),
            courses: store.clone(),
            enrollments: store.clone(),
            employees: store,
        },
        Credentials {
            hasher: Arc::new(BcryptPasswordHasher::new(MIN_COST)),
            tokens,
        },
        clock,
    )
}

/// In-memory state whose token verification is delegated to `tokens`.
#[cfg(test)]
pub fn http_state_with_tokens(tokens: crate::domain::ports::MockTokenService) -> HttpState {
    let mut state = in_memory_state(Arc::new(mockable::DefaultClock));
    state.tokens = Arc::new(tokens);
    state
}
