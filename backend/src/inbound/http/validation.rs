//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure here is an `invalid_request` carrying `details.field` and
//! `details.code` so clients can point at the offending parameter.

use serde_json::json;

use crate::domain::{Error, PageRequest, PageRequestError, RecipesPreview, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidInteger,
    InvalidFlag,
    InvalidPage,
    InvalidLimit,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidInteger => "invalid_integer",
            Self::InvalidFlag => "invalid_flag",
            Self::InvalidPage => "invalid_page",
            Self::InvalidLimit => "invalid_limit",
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

    const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

/// Parse a user id taken from a path or query parameter.
pub(crate) fn parse_user_id(raw: &str, field: FieldName) -> Result<UserId, Error> {
    raw.parse().map_err(|_| {
        field_error(
            field,
            ErrorCode::InvalidUuid,
            format!("{} must be a valid UUID", field.as_str()),
        )
    })
}

/// Parse an unsigned integer query parameter.
pub(crate) fn parse_u32(raw: &str, field: FieldName) -> Result<u32, Error> {
    raw.trim().parse().map_err(|_| {
        field_error(
            field,
            ErrorCode::InvalidInteger,
            format!("{} must be a non-negative integer", field.as_str()),
        )
    })
}

/// Parse a boolean filter flag; `1`/`true` enable it, `0`/`false` disable it.
pub(crate) fn parse_flag(raw: &str, field: FieldName) -> Result<bool, Error> {
    match raw.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(field_error(
            field,
            ErrorCode::InvalidFlag,
            format!("{} must be 0 or 1", field.as_str()),
        )),
    }
}

/// Build a page request from optional `page` and `limit` parameters.
pub(crate) fn page_request(page: Option<u32>, limit: Option<u32>) -> Result<PageRequest, Error> {
    PageRequest::try_new(page, limit).map_err(|err| match err {
        PageRequestError::ZeroPage => field_error(
            FieldName::new("page"),
            ErrorCode::InvalidPage,
            err.to_string(),
        ),
        PageRequestError::LimitOutOfRange { .. } => field_error(
            FieldName::new("limit"),
            ErrorCode::InvalidLimit,
            err.to_string(),
        ),
    })
}

/// Map the optional `recipes_limit` parameter onto a preview size.
pub(crate) fn recipes_preview(recipes_limit: Option<u32>) -> RecipesPreview {
    recipes_limit.map_or_else(RecipesPreview::unlimited, RecipesPreview::limited)
}
