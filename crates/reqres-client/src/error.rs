use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    InvalidBaseUrl { url: String, reason: String },
    Transport { context: String, message: String },
    Decode { context: String, message: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidBaseUrl { url, reason } => {
                write!(f, "Invalid base URL '{url}': {reason}")
            }
            ClientError::Transport { context, message } => {
                write!(f, "Request failed in {context}: {message}")
            }
            ClientError::Decode { context, message } => {
                write!(f, "Failed to decode response in {context}: {message}")
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl ClientError {
    pub fn from_reqwest(e: reqwest::Error, context: &str) -> Self {
        if e.is_decode() || e.is_body() {
            ClientError::Decode {
                context: context.to_string(),
                message: e.to_string(),
            }
        } else {
            ClientError::Transport {
                context: context.to_string(),
                message: e.to_string(),
            }
        }
    }

    pub fn from_json_error(e: serde_json::Error, context: &str) -> Self {
        ClientError::Decode {
            context: context.to_string(),
            message: e.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport { .. })
    }
}
