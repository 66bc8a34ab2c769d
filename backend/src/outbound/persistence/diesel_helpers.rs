//! Shared helpers for Diesel repository implementations.
//!
//! - Error mapping from pool and Diesel failures into port error constructors
//! - `ILIKE` pattern construction for substring filters
//! - Conversion of page windows into SQL `OFFSET`/`LIMIT` values

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use pagination::PageRequest;
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(super) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel errors into query/connection constructors.
///
/// `NotFound` and query-builder failures become query errors; a closed
/// connection becomes a connection error.
pub(super) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Whether the error is a unique constraint violation.
pub(super) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Build an `ILIKE` pattern matching `needle` anywhere, escaping wildcards.
///
/// Returns `None` for absent or blank needles so callers skip the clause.
pub(super) fn contains_pattern(needle: Option<&str>) -> Option<String> {
    let trimmed = needle.map(str::trim).filter(|value| !value.is_empty())?;
    let mut pattern = String::with_capacity(trimmed.len() + 2);
    pattern.push('%');
    for ch in trimmed.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    Some(pattern)
}

/// SQL `OFFSET` and `LIMIT` for a page window.
pub(super) fn window(page: PageRequest) -> (i64, i64) {
    let offset = i64::try_from(page.skip()).unwrap_or(i64::MAX);
    (offset, i64::from(page.limit()))
}

/// Convert a SQL `COUNT(*)` into the page total.
pub(super) fn total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}
