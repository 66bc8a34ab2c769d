//! Builders wiring domain services onto the configured adapters.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use academy::inbound::http::state::{Credentials, HttpState, Repositories};
use academy::outbound::memory::InMemoryStore;
use academy::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselCourseRepository, DieselEmployeeRepository,
    DieselEnrollmentRepository,
};
use academy::outbound::security::{BcryptPasswordHasher, JwtTokenService};

use super::ServerConfig;

/// Token lifetime as a chrono duration, saturating at the largest
/// representable value.
fn token_ttl(config: &ServerConfig) -> chrono::Duration {
    chrono::Duration::from_std(config.token_ttl).unwrap_or_else(|err| {
        warn!(error = %err, "token lifetime out of range; using the maximum");
        chrono::Duration::MAX
    })
}

fn diesel_repositories(
    pool: &DbPool,
) -> Repositories<
    DieselAccountRepository,
    DieselCourseRepository,
    DieselEnrollmentRepository,
    DieselEmployeeRepository,
> {
    Repositories {
        accounts: Arc::new(DieselAccountRepository::new(pool.clone())),
        courses: Arc::new(DieselCourseRepository::new(pool.clone())),
        enrollments: Arc::new(DieselEnrollmentRepository::new(pool.clone())),
        employees: Arc::new(DieselEmployeeRepository::new(pool.clone())),
    }
}

fn memory_repositories()
-> Repositories<InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    Repositories {
        accounts: store.clone(),
        courses: store.clone(),
        enrollments: store.clone(),
        employees: store,
    }
}

/// Build the HTTP state, choosing PostgreSQL when a pool is configured and
/// the in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let credentials = Credentials {
        hasher: Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost)),
        tokens: Arc::new(JwtTokenService::new(
            &config.jwt_secret,
            token_ttl(config),
            clock.clone(),
        )),
    };

    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            HttpState::from_adapters(diesel_repositories(pool), credentials, clock)
        }
        None => {
            warn!("no database configured; data lives in process memory only");
            HttpState::from_adapters(memory_repositories(), credentials, clock)
        }
    }
}
