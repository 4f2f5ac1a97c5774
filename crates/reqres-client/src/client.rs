//! Async HTTP client for the reqres endpoints

use crate::config::{API_KEY_HEADER, ClientConfig};
use crate::error::ClientError;
use crate::types::{ApiResponse, ListUsersQuery, UserId};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use std::convert::identity;
use tracing::debug;

/// One method per endpoint; every call returns the status and body as-is so
/// callers can assert on failures as well as successes.
#[derive(Debug, Clone)]
pub struct ReqresClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ReqresClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::InvalidBaseUrl {
                url: config.base_url,
                reason: "URL cannot be empty".to_string(),
            });
        }

        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url,
                reason: "URL must start with http:// or https://".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("reqres-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::from_reqwest(e, "client setup"))?;

        Ok(Self {
            http,
            config: ClientConfig {
                base_url,
                api_key: config.api_key,
            },
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Normalized configuration, enough to build an independent client.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // USERS
    // =========================================================================

    pub async fn list_users(&self, query: ListUsersQuery) -> Result<ApiResponse, ClientError> {
        self.send(Method::GET, "/users", |r| r.query(&query)).await
    }

    pub async fn get_user(&self, id: &UserId) -> Result<ApiResponse, ClientError> {
        self.send(Method::GET, &format!("/users/{id}"), identity)
            .await
    }

    pub async fn create_user<B>(&self, payload: &B) -> Result<ApiResponse, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, "/users", |r| r.json(payload)).await
    }

    pub async fn update_user<B>(&self, id: &UserId, payload: &B) -> Result<ApiResponse, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, &format!("/users/{id}"), |r| r.json(payload))
            .await
    }

    pub async fn patch_user<B>(&self, id: &UserId, payload: &B) -> Result<ApiResponse, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::PATCH, &format!("/users/{id}"), |r| r.json(payload))
            .await
    }

    pub async fn delete_user(&self, id: &UserId) -> Result<ApiResponse, ClientError> {
        self.send(Method::DELETE, &format!("/users/{id}"), identity)
            .await
    }

    // =========================================================================
    // AUTHENTICATION
    // =========================================================================

    pub async fn register<B>(&self, payload: &B) -> Result<ApiResponse, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, "/register", |r| r.json(payload)).await
    }

    pub async fn login<B>(&self, payload: &B) -> Result<ApiResponse, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, "/login", |r| r.json(payload)).await
    }

    // =========================================================================
    // RESOURCES
    // =========================================================================

    pub async fn list_resources(&self) -> Result<ApiResponse, ClientError> {
        self.send(Method::GET, "/unknown", identity).await
    }

    pub async fn get_resource(&self, id: u64) -> Result<ApiResponse, ClientError> {
        self.send(Method::GET, &format!("/unknown/{id}"), identity)
            .await
    }

    /// Builds the request for `path`, lets `prepare` add a query or body,
    /// sends it and reads the whole body.
    async fn send<F>(&self, method: Method, path: &str, prepare: F) -> Result<ApiResponse, ClientError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let context = format!("{method} {path}");
        let url = format!("{}{path}", self.config.base_url);

        let mut request = self.http.request(method.clone(), url);
        if let Some(key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        debug!(method = %method, path = %path, "Sending request");
        let response = prepare(request)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, &context))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::from_reqwest(e, &context))?;

        debug!(method = %method, path = %path, status, "Received response");
        Ok(ApiResponse::new(context, status, text))
    }
}
