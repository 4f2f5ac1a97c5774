//! Assertion helpers shared by every case

use reqres_client::{ApiResponse, ClientError};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CheckFailure {
    Request(ClientError),
    UnexpectedStatus {
        context: String,
        expected: Vec<u16>,
        actual: u16,
    },
    MissingField {
        context: String,
        field: String,
    },
    FieldMismatch {
        context: String,
        field: String,
        expected: Value,
        actual: Value,
    },
    UnexpectedField {
        context: String,
        field: String,
    },
    Setup {
        reason: String,
    },
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckFailure::Request(err) => write!(f, "{err}"),
            CheckFailure::UnexpectedStatus {
                context,
                expected,
                actual,
            } => {
                let expected = expected
                    .iter()
                    .map(u16::to_string)
                    .collect::<Vec<_>>()
                    .join(" or ");
                write!(f, "{context}: expected status {expected}, got {actual}")
            }
            CheckFailure::MissingField { context, field } => {
                write!(f, "{context}: response body has no '{field}'")
            }
            CheckFailure::FieldMismatch {
                context,
                field,
                expected,
                actual,
            } => {
                write!(f, "{context}: expected '{field}' to be {expected}, got {actual}")
            }
            CheckFailure::UnexpectedField { context, field } => {
                write!(f, "{context}: response body should not contain '{field}'")
            }
            CheckFailure::Setup { reason } => write!(f, "Fixture setup failed: {reason}"),
        }
    }
}

impl std::error::Error for CheckFailure {}

impl From<ClientError> for CheckFailure {
    fn from(err: ClientError) -> Self {
        CheckFailure::Request(err)
    }
}

impl CheckFailure {
    pub fn is_setup(&self) -> bool {
        matches!(self, CheckFailure::Setup { .. })
    }
}

pub fn expect_status(response: &ApiResponse, expected: &[u16]) -> Result<(), CheckFailure> {
    if expected.contains(&response.status()) {
        Ok(())
    } else {
        Err(CheckFailure::UnexpectedStatus {
            context: response.context().to_string(),
            expected: expected.to_vec(),
            actual: response.status(),
        })
    }
}

pub fn expect_field<'a>(response: &'a ApiResponse, path: &str) -> Result<&'a Value, CheckFailure> {
    // A body that is not JSON at all is a decode failure, not a missing field.
    response.json()?;
    response
        .field(path)
        .ok_or_else(|| CheckFailure::MissingField {
            context: response.context().to_string(),
            field: path.to_string(),
        })
}

pub fn expect_field_eq(
    response: &ApiResponse,
    path: &str,
    expected: impl Into<Value>,
) -> Result<(), CheckFailure> {
    let expected = expected.into();
    let actual = expect_field(response, path)?;
    if *actual == expected {
        Ok(())
    } else {
        Err(CheckFailure::FieldMismatch {
            context: response.context().to_string(),
            field: path.to_string(),
            expected,
            actual: actual.clone(),
        })
    }
}

pub fn expect_no_field(response: &ApiResponse, path: &str) -> Result<(), CheckFailure> {
    response.json()?;
    if response.has_field(path) {
        Err(CheckFailure::UnexpectedField {
            context: response.context().to_string(),
            field: path.to_string(),
        })
    } else {
        Ok(())
    }
}
