//! Shared validation helpers for inbound HTTP adapters.

use chrono::NaiveDateTime;
use serde_json::json;

use crate::domain::{Error, TIMESTAMP_FORMAT};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidTimestamp,
    InvalidBoolean,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidBoolean => "invalid_boolean",
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

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(
        field,
        format!("{field} must be formatted as yyyy-MM-dd HH:mm:ss"),
    )
    .with_value(ErrorCode::InvalidTimestamp, value)
}

pub(crate) fn invalid_boolean_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be true or false"))
        .with_value(ErrorCode::InvalidBoolean, value)
}

/// Parse a wire timestamp in `yyyy-MM-dd HH:mm:ss` form.
pub(crate) fn parse_hit_timestamp(value: &str, field: FieldName) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|_| invalid_timestamp_error(field, value))
}

pub(crate) fn parse_required_timestamp(
    value: Option<&str>,
    field: FieldName,
) -> Result<NaiveDateTime, Error> {
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    parse_hit_timestamp(raw, field)
}

pub(crate) fn parse_optional_timestamp(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<NaiveDateTime>, Error> {
    value.map(|raw| parse_hit_timestamp(raw, field)).transpose()
}

/// Parse `true`/`false` in any letter case.
pub(crate) fn parse_flag(value: &str, field: FieldName) -> Result<bool, Error> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(invalid_boolean_error(field, value))
    }
}
