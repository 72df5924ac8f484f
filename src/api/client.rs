//
//  bitbucket-legacy
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Bitbucket 1.0 API
//!
//! [`BitbucketClient`] runs every call through the same straight-line
//! pipeline:
//!
//! ```text
//! RequestSpec -> build -> authenticate -> send -> interpret -> decode
//! ```
//!
//! The first failing stage ends the call; nothing is retried.
//!
//! ## Features
//!
//! - Anonymous, Basic and OAuth 1.0a authentication
//! - Form and JSON request bodies
//! - Status code to [`ApiError`] mapping
//! - Pluggable [`Transport`] for tests

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::common::ApiError;
use super::request::{self, Body, RequestSpec};
use super::response::{self, StatusPolicy};
use super::transport::{ApiResponse, ReqwestTransport, Transport};
use super::v1::{
    DeployKeys, Emails, Groups, Repositories, Services, SourceFiles, SshKeys, Teams, Users,
};
use crate::auth::Credentials;
use crate::config::ClientConfig;

/// The client for the Bitbucket 1.0 API.
///
/// Credentials and transport are fixed at construction. The client is cheap
/// to clone and safe to share between tasks; each call builds its own
/// request.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use bitbucket_legacy::api::BitbucketClient;
/// use bitbucket_legacy::auth::Credentials;
///
/// // Public resources only
/// let guest = BitbucketClient::guest()?;
///
/// // Authenticated
/// let client = BitbucketClient::new(Credentials::basic("alice", "s3cret"))?;
/// # Ok::<(), bitbucket_legacy::api::ApiError>(())
/// ```
///
/// # Substituting the Transport
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use bitbucket_legacy::api::BitbucketClient;
/// use bitbucket_legacy::api::transport::ReqwestTransport;
/// use bitbucket_legacy::auth::Credentials;
///
/// let transport = Arc::new(ReqwestTransport::new("my-agent", None)?);
/// let client = BitbucketClient::with_transport(Credentials::Anonymous, transport)
///     .with_base_url("http://localhost:8080/1.0");
/// # Ok::<(), bitbucket_legacy::api::ApiError>(())
/// ```
#[derive(Clone)]
pub struct BitbucketClient {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    base_url: String,
    status_policy: StatusPolicy,
}

impl BitbucketClient {
    /// Creates a client on the shared transport with default settings.
    pub fn new(credentials: Credentials) -> Result<Self, ApiError> {
        let transport = Arc::new(ReqwestTransport::shared()?);
        Ok(Self::with_transport(credentials, transport))
    }

    /// Creates a client for public resources.
    pub fn guest() -> Result<Self, ApiError> {
        Self::new(Credentials::Anonymous)
    }

    /// Creates a client from a [`ClientConfig`].
    ///
    /// The shared transport is used unless the configuration changes the
    /// user agent or sets a timeout, in which case a dedicated transport is
    /// built.
    pub fn from_config(config: &ClientConfig, credentials: Credentials) -> Result<Self, ApiError> {
        let defaults = ClientConfig::default();
        let transport: Arc<dyn Transport> =
            if config.user_agent == defaults.user_agent && config.timeout_secs.is_none() {
                Arc::new(ReqwestTransport::shared()?)
            } else {
                Arc::new(ReqwestTransport::new(&config.user_agent, config.timeout())?)
            };

        Ok(Self::with_transport(credentials, transport)
            .with_base_url(&config.base_url)
            .with_status_policy(config.status_policy))
    }

    /// Creates a client on the given transport.
    pub fn with_transport(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            credentials,
            base_url: crate::API_BASE_URL.to_string(),
            status_policy: StatusPolicy::default(),
        }
    }

    /// Points the client at a different base URL.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    /// Builds, authenticates and sends a request, and checks its status.
    ///
    /// Returns the raw response so callers can decode it themselves.
    pub async fn send(&self, spec: RequestSpec) -> Result<ApiResponse, ApiError> {
        let mut request = request::build(&self.base_url, spec)?;
        self.credentials.authenticate(&mut request)?;

        tracing::debug!(
            "{} {} ({})",
            request.method,
            request.url,
            self.credentials.scheme()
        );

        let response = self.transport.send(request).await?;
        tracing::debug!("-> {} ({} bytes)", response.status, response.body.len());

        response::interpret(&response, self.status_policy)?;
        Ok(response)
    }

    /// Runs a request whose response body is not needed.
    pub async fn execute(&self, spec: RequestSpec) -> Result<(), ApiError> {
        self.send(spec).await.map(|_| ())
    }

    /// Runs a request and decodes the JSON response into `T`.
    pub async fn execute_json<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<T, ApiError> {
        let response = self.send(spec).await?;
        response::decode(&response)
    }

    /// `GET path`, decoded as `T`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bitbucket_legacy::api::BitbucketClient;
    ///
    /// # async fn example() -> Result<(), bitbucket_legacy::api::ApiError> {
    /// let client = BitbucketClient::guest()?;
    /// let user: serde_json::Value = client.get("/users/alice").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute_json(RequestSpec::get(path)).await
    }

    /// `GET path?query`, decoded as `T`.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let spec = query
            .iter()
            .fold(RequestSpec::get(path), |spec, (k, v)| spec.query(*k, *v));
        self.execute_json(spec).await
    }

    /// `POST path` with a form body, decoded as `T`.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.execute_json(RequestSpec::post(path).form(form.iter().copied()))
            .await
    }

    /// `PUT path` with a form body, decoded as `T`.
    pub async fn put_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.execute_json(RequestSpec::put(path).form(form.iter().copied()))
            .await
    }

    /// `POST path` with a JSON body, decoded as `T`.
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute_json(RequestSpec::post(path).body(Body::json(body)?))
            .await
    }

    /// `PUT path` with a JSON body, decoded as `T`.
    pub async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute_json(RequestSpec::put(path).body(Body::json(body)?))
            .await
    }

    /// `DELETE path`; the response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(RequestSpec::delete(path)).await
    }

    pub fn groups(&self) -> Groups<'_> {
        Groups::new(self)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    pub fn repositories(&self) -> Repositories<'_> {
        Repositories::new(self)
    }

    pub fn ssh_keys(&self) -> SshKeys<'_> {
        SshKeys::new(self)
    }

    pub fn deploy_keys(&self) -> DeployKeys<'_> {
        DeployKeys::new(self)
    }

    pub fn emails(&self) -> Emails<'_> {
        Emails::new(self)
    }

    pub fn teams(&self) -> Teams<'_> {
        Teams::new(self)
    }

    pub fn sources(&self) -> SourceFiles<'_> {
        SourceFiles::new(self)
    }

    pub fn services(&self) -> Services<'_> {
        Services::new(self)
    }
}

impl std::fmt::Debug for BitbucketClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitbucketClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("status_policy", &self.status_policy)
            .finish()
    }
}
