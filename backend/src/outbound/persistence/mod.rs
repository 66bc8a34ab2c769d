//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: All database errors are mapped to the port
//!   error enums.
//!
//! # Example
//!
//! ```ignore
//! use academy::outbound::persistence::{DbPool, DieselAccountRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/academy")).await?;
//! let accounts = DieselAccountRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_course_repository;
mod diesel_employee_repository;
mod diesel_enrollment_repository;
mod diesel_helpers;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_employee_repository::DieselEmployeeRepository;
pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
