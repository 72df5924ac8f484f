//
//  bitbucket-legacy
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Dispatch
//!
//! The [`Transport`] trait is the seam between the pipeline and the network.
//! [`ReqwestTransport`] is the production implementation; tests substitute
//! their own transport when constructing the client.
//!
//! ## Shared Connection Pool
//!
//! [`ReqwestTransport::shared`] hands out clones of a single lazily built
//! `reqwest::Client`. Clones share one connection pool and one set of
//! defaults, so every client in the process behaves the same.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_legacy::api::request::{build, RequestSpec};
//! use bitbucket_legacy::api::transport::{ReqwestTransport, Transport};
//!
//! # async fn example() -> Result<(), bitbucket_legacy::api::ApiError> {
//! let request = build("https://api.bitbucket.org/1.0", RequestSpec::get("/users/alice"))?;
//! let response = ReqwestTransport::shared()?.send(request).await?;
//! println!("{} ({} bytes)", response.status, response.body.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};

use super::common::ApiError;
use super::request::PreparedRequest;

/// A fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends an authenticated request and returns the complete response.
///
/// Implementations must be safe to share between concurrent calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no status code could be obtained
    /// or the body could not be read to the end.
    async fn send(&self, request: PreparedRequest) -> Result<ApiResponse, ApiError>;
}

static SHARED_CLIENT: Lazy<Result<Client, String>> =
    Lazy::new(|| http_client(&user_agent(), None).map_err(|e| e.to_string()));

/// Default `User-Agent` header value.
pub fn user_agent() -> String {
    format!("bb1/{}", crate::VERSION)
}

fn http_client(user_agent: &str, timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut builder = Client::builder().user_agent(user_agent).http1_only();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// [`Transport`] backed by `reqwest`, speaking HTTP/1.1.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Returns a transport on the process-wide shared client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the shared client could not be
    /// built, which only happens when the TLS backend cannot initialize.
    pub fn shared() -> Result<Self, ApiError> {
        SHARED_CLIENT
            .as_ref()
            .map(|http| Self { http: http.clone() })
            .map_err(|e| ApiError::Transport(e.clone().into()))
    }

    /// Builds a transport with its own connection pool.
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        Ok(Self {
            http: http_client(user_agent, timeout)?,
        })
    }

    /// Wraps an existing `reqwest` client.
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: PreparedRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        // The response is dropped on every return path, releasing the connection.
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}
