//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use pagination::{PageRequest, PaginationError};
use serde_json::json;

use crate::domain::{Error, InvalidIdentifier, Role};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidRole,
    InvalidPaging,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidRole => "invalid_role",
            ErrorCode::InvalidPaging => "invalid_paging",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String, value: Option<&str>) -> Error {
    let details = match value {
        Some(value) => json!({ "field": field.as_str(), "value": value, "code": code.as_str() }),
        None => json!({ "field": field.as_str(), "code": code.as_str() }),
    };
    Error::invalid_request(message).with_details(details)
}

/// Parse a path or body identifier such as `AccountId` or `CourseId`.
pub(crate) fn parse_id<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = InvalidIdentifier>,
{
    value.parse().map_err(|_| {
        field_error(
            field,
            ErrorCode::InvalidUuid,
            format!("{} must be a valid UUID", field.as_str()),
            Some(value),
        )
    })
}

/// Parse an optional identifier, treating blank input as absent.
pub(crate) fn parse_optional_id<T>(value: Option<&str>, field: FieldName) -> Result<Option<T>, Error>
where
    T: FromStr<Err = InvalidIdentifier>,
{
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => parse_id(raw, field).map(Some),
        None => Ok(None),
    }
}

/// Parse a course-management role name.
pub(crate) fn parse_role(value: &str, field: FieldName) -> Result<Role, Error> {
    value.trim().parse().map_err(|_| {
        field_error(
            field,
            ErrorCode::InvalidRole,
            format!("{} must be one of admin, instructor, student", field.as_str()),
            Some(value),
        )
    })
}

fn paging_error(err: PaginationError) -> Error {
    let field = match err {
        PaginationError::ZeroLimit | PaginationError::LimitTooLarge { .. } => "limit",
        PaginationError::ZeroPage | PaginationError::PageOutOfRange => "page",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": field, "code": ErrorCode::InvalidPaging.as_str() }))
}

/// Validate a skip/limit window.
pub(crate) fn skip_limit(skip: Option<u64>, limit: Option<u32>) -> Result<PageRequest, Error> {
    PageRequest::new(skip, limit).map_err(paging_error)
}

/// Validate a one-based page number and page size.
pub(crate) fn page_number(page: Option<u64>, limit: Option<u32>) -> Result<PageRequest, Error> {
    PageRequest::from_page_number(page, limit).map_err(paging_error)
}

/// Error returned when a JSON body or query string cannot be decoded.
pub(crate) fn malformed_input(source: &'static str, message: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("invalid {source}: {message}"))
        .with_details(json!({ "code": ErrorCode::MalformedBody.as_str() }))
}
