//! Assertion helpers for API responses.
//!
//! Each helper returns the first mismatch as an [`AssertionError`] so a
//! scenario can stop at it with `?`.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::http::ApiResponse;
use crate::model::Violation;

/// JSON value kind, for shape and type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Bool,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "a boolean",
            JsonKind::Number => "a number",
            JsonKind::String => "a string",
            JsonKind::Array => "an array",
            JsonKind::Object => "an object",
        };
        f.write_str(name)
    }
}

/// Expected vs. actual mismatch on a response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssertionError {
    #[error("expected status {expected}, got {actual} (body: {body})")]
    Status {
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("expected body to be {expected}, got {actual}")]
    Shape { expected: JsonKind, actual: JsonKind },

    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("expected `{field}` to be {expected}, got {actual}")]
    FieldKind {
        field: String,
        expected: JsonKind,
        actual: JsonKind,
    },

    #[error("expected `{field}` to equal {expected}, got {actual}")]
    FieldValue {
        field: String,
        expected: Value,
        actual: Value,
    },

    #[error("element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<AssertionError>,
    },

    #[error("expected a non-empty list")]
    EmptyList,

    #[error("expected an empty list, got {0} elements")]
    NonEmptyList(usize),

    #[error("missing violation `{field}: {message}`")]
    MissingViolation { field: String, message: String },

    #[error("expected an empty body, got {0:?}")]
    NonEmptyBody(String),

    #[error("expected content-type {expected}, got {actual:?}")]
    ContentType {
        expected: String,
        actual: Option<String>,
    },
}

/// Result of a single expectation.
pub type Expectation<T = ()> = std::result::Result<T, AssertionError>;

/// Checks the status code.
pub fn status(response: &ApiResponse, expected: u16) -> Expectation {
    if response.status == expected {
        Ok(())
    } else {
        Err(AssertionError::Status {
            expected,
            actual: response.status,
            body: response.text.clone(),
        })
    }
}

/// Returns the body as an object.
pub fn object(body: &Value) -> Expectation<&Map<String, Value>> {
    body.as_object().ok_or(AssertionError::Shape {
        expected: JsonKind::Object,
        actual: JsonKind::of(body),
    })
}

/// Returns the body as a list.
pub fn array(body: &Value) -> Expectation<&Vec<Value>> {
    body.as_array().ok_or(AssertionError::Shape {
        expected: JsonKind::Array,
        actual: JsonKind::of(body),
    })
}

/// Checks that every named field is present.
pub fn has_fields(body: &Value, fields: &[&str]) -> Expectation {
    let object = object(body)?;
    match fields.iter().find(|field| !object.contains_key(**field)) {
        Some(missing) => Err(AssertionError::MissingField(missing.to_string())),
        None => Ok(()),
    }
}

/// Checks that `field` is present and of the given kind.
pub fn field_kind(body: &Value, field: &str, expected: JsonKind) -> Expectation {
    let actual = object(body)?
        .get(field)
        .ok_or_else(|| AssertionError::MissingField(field.to_string()))?;

    let kind = JsonKind::of(actual);
    if kind == expected {
        Ok(())
    } else {
        Err(AssertionError::FieldKind {
            field: field.to_string(),
            expected,
            actual: kind,
        })
    }
}

/// Checks that `field` equals `expected`.
pub fn field_eq(body: &Value, field: &str, expected: impl Into<Value>) -> Expectation {
    let expected = expected.into();
    let actual = object(body)?
        .get(field)
        .ok_or_else(|| AssertionError::MissingField(field.to_string()))?;

    if *actual == expected {
        Ok(())
    } else {
        Err(AssertionError::FieldValue {
            field: field.to_string(),
            expected,
            actual: actual.clone(),
        })
    }
}

/// Checks that every field of `expected` appears in `body` with the same value.
///
/// Extra fields in `body` (such as a server-assigned `id`) are ignored.
pub fn includes(body: &Value, expected: &Value) -> Expectation {
    let expected = object(expected)?;
    for (field, value) in expected {
        field_eq(body, field, value.clone())?;
    }
    Ok(())
}

/// Checks the `{ "message": ... }` body of 401/404 responses.
pub fn message(body: &Value, expected: &str) -> Expectation {
    field_eq(body, "message", expected)
}

/// Checks that the list is not empty.
pub fn non_empty(items: &[Value]) -> Expectation {
    if items.is_empty() {
        Err(AssertionError::EmptyList)
    } else {
        Ok(())
    }
}

/// Checks that the list is empty.
pub fn empty(items: &[Value]) -> Expectation {
    if items.is_empty() {
        Ok(())
    } else {
        Err(AssertionError::NonEmptyList(items.len()))
    }
}

/// Runs `check` on every element, reporting the index of the first failure.
pub fn each<F>(items: &[Value], mut check: F) -> Expectation
where
    F: FnMut(&Value) -> Expectation,
{
    for (index, item) in items.iter().enumerate() {
        check(item).map_err(|source| AssertionError::Element {
            index,
            source: Box::new(source),
        })?;
    }
    Ok(())
}

/// Checks that a 422 body lists every expected violation.
pub fn violations_include(body: &Value, expected: &[Violation]) -> Expectation {
    let items = array(body)?;
    let actual: Vec<Violation> = items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect();

    match expected.iter().find(|v| !actual.contains(v)) {
        Some(missing) => Err(AssertionError::MissingViolation {
            field: missing.field.clone(),
            message: missing.message.clone(),
        }),
        None => Ok(()),
    }
}

/// Checks that the first violation carries `expected` as its message.
pub fn first_violation_message(body: &Value, expected: &str) -> Expectation {
    let items = array(body)?;
    let first = items.first().ok_or(AssertionError::EmptyList)?;
    field_eq(first, "message", expected)
}

/// Checks that a response has no body (204).
pub fn empty_body(response: &ApiResponse) -> Expectation {
    if response.text.trim().is_empty() {
        Ok(())
    } else {
        Err(AssertionError::NonEmptyBody(response.text.clone()))
    }
}

/// Checks the media type of the `content-type` header, ignoring parameters
/// such as `charset`.
pub fn content_type(response: &ApiResponse, expected: &str) -> Expectation {
    let actual = response.header("content-type");
    let media_type = actual.and_then(|v| v.split(';').next()).map(str::trim);

    match media_type {
        Some(media_type) if media_type.eq_ignore_ascii_case(expected) => Ok(()),
        _ => Err(AssertionError::ContentType {
            expected: expected.to_string(),
            actual: actual.map(str::to_string),
        }),
    }
}
