//! Request payloads and the response wrapper for the reqres API

use crate::error::ClientError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

// =============================================================================
// REQUEST TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: Some(job.into()),
        }
    }

    pub fn without_job(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Some(password.into()),
        }
    }

    pub fn email_only(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListUsersQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Seconds the server should wait before answering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
}

impl ListUsersQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            delay: None,
        }
    }

    pub fn delay(seconds: u32) -> Self {
        Self {
            page: None,
            delay: Some(seconds),
        }
    }
}

/// Server-assigned user identifier.
///
/// reqres hands out ids as JSON strings on create (`"id": "734"`) but as
/// numbers everywhere else, so both forms are accepted and kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) if n.is_u64() || n.is_i64() => Some(Self(n.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub struct ApiResponse {
    context: String,
    status: u16,
    text: String,
    json: Result<Value, ClientError>,
}

impl ApiResponse {
    /// Builds a response from its status and raw body.
    ///
    /// An empty body is treated as JSON `null`; a body that is not JSON is
    /// kept as text and only reported when [`ApiResponse::json`] is called.
    pub fn new(context: impl Into<String>, status: u16, text: String) -> Self {
        let context = context.into();
        let json = if text.trim().is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_str(&text).map_err(|e| ClientError::from_json_error(e, &context))
        };
        Self {
            context,
            status,
            text,
            json,
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_status(&self, code: u16) -> bool {
        self.status == code
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn json(&self) -> Result<&Value, ClientError> {
        self.json.as_ref().map_err(Clone::clone)
    }

    /// Looks up a dotted path such as `data.id` in the JSON body.
    pub fn field(&self, path: &str) -> Option<&Value> {
        lookup(self.json.as_ref().ok()?, path)
    }

    pub fn has_field(&self, path: &str) -> bool {
        self.field(path).is_some()
    }
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}
