//! Async client for the reqres.in demo REST API.
//!
//! Every endpoint helper returns an [`ApiResponse`] holding the raw status
//! code and the body parsed as JSON, without interpreting either. Error
//! statuses are ordinary responses; only transport and decode failures
//! surface as [`ClientError`].

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::ReqresClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use types::{ApiResponse, Credentials, ListUsersQuery, NewUser, UserId};
