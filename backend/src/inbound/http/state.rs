//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountAuth, AccountDirectory, AccountRepository, CourseCatalogue, CourseRepository,
    EmployeeDirectory, EmployeeRepository, EnrollmentRepository, Enrollments, PasswordHasher,
    TokenService,
};
use crate::domain::{AccountService, CourseService, EmployeeService, EnrollmentService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AccountAuth>,
    pub accounts: Arc<dyn AccountDirectory>,
    pub courses: Arc<dyn CourseCatalogue>,
    pub enrollments: Arc<dyn Enrollments>,
    pub employees: Arc<dyn EmployeeDirectory>,
    pub tokens: Arc<dyn TokenService>,
}

/// Driven repositories backing the services in [`HttpState`].
///
/// The in-memory store implements every repository and can be passed for all
/// four slots; the PostgreSQL adapters are one type per table.
pub struct Repositories<A, C, E, M> {
    pub accounts: Arc<A>,
    pub courses: Arc<C>,
    pub enrollments: Arc<E>,
    pub employees: Arc<M>,
}

/// Credential adapters shared by the account and employee services.
pub struct Credentials<H, T> {
    pub hasher: Arc<H>,
    pub tokens: Arc<T>,
}

impl HttpState {
    /// Wire the domain services over the given adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use academy::inbound::http::state::{Credentials, HttpState, Repositories};
    /// use academy::outbound::memory::InMemoryStore;
    /// use academy::outbound::security::{BcryptPasswordHasher, JwtSecret, JwtTokenService, MIN_COST};
    /// use mockable::{Clock, DefaultClock};
    ///
    /// let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::from_adapters(
    ///     Repositories {
    ///         accounts: store.clone(),
    ///         courses: store.clone(),
    ///         enrollments: store.clone(),
    ///         employees: store,
    ///     },
    ///     Credentials {
    ///         hasher: Arc::new(BcryptPasswordHasher::new(MIN_COST)),
    ///         tokens: Arc::new(JwtTokenService::new(
    ///             &JwtSecret::generate(),
    ///             chrono::Duration::hours(1),
    ///             clock.clone(),
    ///         )),
    ///     },
    ///     clock,
    /// );
    /// # let _ = state;
    /// ```
    pub fn from_adapters<A, C, E, M, H, T>(
        repositories: Repositories<A, C, E, M>,
        credentials: Credentials<H, T>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        A: AccountRepository + 'static,
        C: CourseRepository + 'static,
        E: EnrollmentRepository + 'static,
        M: EmployeeRepository + 'static,
        H: PasswordHasher + 'static,
        T: TokenService + 'static,
    {
        let Repositories {
            accounts,
            courses,
            enrollments,
            employees,
        } = repositories;
        let Credentials { hasher, tokens } = credentials;

        let account_service = Arc::new(AccountService::new(
            accounts.clone(),
            hasher.clone(),
            tokens.clone(),
            clock.clone(),
        ));
        let course_service = Arc::new(CourseService::new(
            courses.clone(),
            accounts.clone(),
            clock.clone(),
        ));
        let enrollment_service = Arc::new(EnrollmentService::new(
            enrollments,
            courses,
            accounts,
            clock.clone(),
        ));
        let employee_service = Arc::new(EmployeeService::new(
            employees,
            hasher,
            tokens.clone(),
            clock,
        ));

        Self {
            auth: account_service.clone(),
            accounts: account_service,
            courses: course_service,
            enrollments: enrollment_service,
            employees: employee_service,
            tokens,
        }
    }
}
