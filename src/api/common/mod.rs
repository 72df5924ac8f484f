//
//  bitbucket-legacy
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Bitbucket 1.0 API
//!
//! This module provides the error taxonomy shared by every stage of the
//! request pipeline, and the small data structures that several 1.0
//! resources embed in their responses.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`ErrorKind`] - Coarse category of an [`ApiError`], for matching
//! - [`UserRef`] - Lightweight user reference embedded in groups, repos, keys
//!
//! # Example
//!
//! ```rust
//! use bitbucket_legacy::api::common::{ApiError, ErrorKind};
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(e) if e.kind() == ErrorKind::NotFound => println!("Nothing there"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Bitbucket 1.0 API operations.
///
/// Every stage of the pipeline (build, authenticate, send, interpret, decode)
/// fails with one of these variants, and the first failure short-circuits
/// the rest of the chain.
///
/// # Variants
///
/// | Variant | Stage | HTTP Status |
/// |---------|-------|-------------|
/// | `NotFound` | interpret | 404 |
/// | `Forbidden` | interpret | 403 |
/// | `NotAuthorized` | interpret | 401 |
/// | `BadRequest` | interpret | 400 |
/// | `UnexpectedStatus` | interpret (strict policy only) | other non-2xx |
/// | `Transport` | send | N/A |
/// | `Encoding` / `InvalidUrl` | build | N/A |
/// | `Signing` | authenticate | N/A |
/// | `Decode` | decode | N/A |
/// | `UnexpectedResult` | resource accessor | N/A |
///
/// The status-derived variants carry no payload: callers distinguish
/// failures by category only. Use [`ApiError::kind`] to match on the category.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The requested resource was not found (HTTP 404).
    #[error("Not Found")]
    NotFound,

    /// The credentials were accepted but do not grant access (HTTP 403).
    #[error("Forbidden")]
    Forbidden,

    /// The call requires authentication and the credentials were missing
    /// or rejected (HTTP 401).
    #[error("Unauthorized")]
    NotAuthorized,

    /// The request was malformed, e.g. a required parameter was missing
    /// (HTTP 400).
    #[error("Bad Request")]
    BadRequest,

    /// A non-success status outside the four documented codes.
    ///
    /// Only produced under [`StatusPolicy::Strict`](crate::api::response::StatusPolicy::Strict).
    #[error("Unexpected status: {0}")]
    UnexpectedStatus(StatusCode),

    /// The request never produced a status code (DNS, connect, TLS, timeout,
    /// or a failure while reading the body).
    #[error("Network error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The request URL could not be constructed from the base URL and path.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The OAuth signer could not produce a signature.
    #[error("Failed to sign request: {0}")]
    Signing(String),

    /// The server accepted the request but the body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The server answered successfully but the result does not have the
    /// expected shape (e.g. a lookup matched several entries).
    #[error("Unexpected result: {0}")]
    UnexpectedResult(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

/// Coarse failure category of an [`ApiError`].
///
/// The categories split into three groups: the request never reached the
/// server (`TransportFailure`, `EncodingFailure`, `SigningFailure`), the
/// server rejected it (`NotFound`, `Forbidden`, `NotAuthorized`,
/// `BadRequest`, `UnexpectedStatus`), or the server accepted it but the
/// answer was unusable (`DecodeFailure`, `UnexpectedResult`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    NotAuthorized,
    BadRequest,
    UnexpectedStatus,
    TransportFailure,
    EncodingFailure,
    SigningFailure,
    DecodeFailure,
    UnexpectedResult,
}

impl ApiError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::NotFound,
            Self::Forbidden => ErrorKind::Forbidden,
            Self::NotAuthorized => ErrorKind::NotAuthorized,
            Self::BadRequest => ErrorKind::BadRequest,
            Self::UnexpectedStatus(_) => ErrorKind::UnexpectedStatus,
            Self::Transport(_) => ErrorKind::TransportFailure,
            Self::Encoding(_) | Self::InvalidUrl(_) => ErrorKind::EncodingFailure,
            Self::Signing(_) => ErrorKind::SigningFailure,
            Self::Decode(_) => ErrorKind::DecodeFailure,
            Self::UnexpectedResult(_) => ErrorKind::UnexpectedResult,
        }
    }

    /// Returns `true` for a 404, which higher-level code often treats as
    /// "absent" rather than as a hard failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Returns `true` if the server answered with a rejecting status code.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::NotFound
                | ErrorKind::Forbidden
                | ErrorKind::NotAuthorized
                | ErrorKind::BadRequest
                | ErrorKind::UnexpectedStatus
        )
    }

    /// Returns `true` if the request got as far as a status code.
    pub fn reached_server(&self) -> bool {
        !matches!(
            self.kind(),
            ErrorKind::TransportFailure | ErrorKind::EncodingFailure | ErrorKind::SigningFailure
        )
    }
}

/// Lightweight user reference embedded in 1.0 responses.
///
/// Groups, repositories, and privileges all carry an `owner` object with
/// this shape.
///
/// # Example
///
/// ```rust
/// use bitbucket_legacy::api::common::UserRef;
///
/// let json = r#"{
///     "username": "alice",
///     "first_name": "Alice",
///     "last_name": "Liddell",
///     "is_team": false
/// }"#;
///
/// let user: UserRef = serde_json::from_str(json).unwrap();
/// assert_eq!(user.username, "alice");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRef {
    /// Account name used in URLs.
    pub username: String,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    /// URL of the avatar image.
    #[serde(default)]
    pub avatar: Option<String>,

    /// Whether the account is a team rather than an individual.
    #[serde(default)]
    pub is_team: bool,

    /// Relative API URL of the account.
    #[serde(default)]
    pub resource_uri: Option<String>,
}

impl UserRef {
    /// Returns "First Last" when both names are set, otherwise the username.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                format!("{} {}", first, last)
            }
            _ => self.username.clone(),
        }
    }
}
