//
//  bitbucket-legacy
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # bitbucket-legacy
//!
//! A typed client for the legacy Bitbucket 1.0 REST API, plus the `bb1`
//! command-line tool built on top of it.
//!
//! Every call flows through the same pipeline:
//!
//! 1. A [`api::request::RequestSpec`] (method, path, query, body) is turned
//!    into a [`api::request::PreparedRequest`] against the API base URL.
//! 2. The client's [`Credentials`] attach an `Authorization` header:
//!    nothing, HTTP Basic, or an OAuth 1.0a HMAC-SHA1 signature.
//! 3. A [`api::transport::Transport`] performs the exchange.
//! 4. The response status is mapped onto [`ApiError`] and, on success, the
//!    body is decoded into the caller's type.
//!
//! ## Modules
//!
//! - [`api`] - Request building, transport, response mapping and the typed
//!   1.0 resources (groups, users, repositories, keys, ...)
//! - [`auth`] - Credentials and OAuth 1.0a signing
//! - [`config`] - Client configuration file and environment overrides
//! - [`cli`] - The `bb1` command-line interface
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_legacy::{BitbucketClient, Credentials};
//!
//! # async fn example() -> Result<(), bitbucket_legacy::ApiError> {
//! let client = BitbucketClient::new(Credentials::basic("alice", "secret"))?;
//!
//! for group in client.groups().list("alice").await? {
//!     println!("{} ({} members)", group.name, group.members.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Variables
//!
//! - `BB_USER`, `BB_PASSWORD` - Basic credentials
//! - `BB_CONSUMER_KEY`, `BB_CONSUMER_SECRET`, `BB_ACCESS_TOKEN`,
//!   `BB_TOKEN_SECRET` - OAuth 1.0a credentials
//! - `BB_API_URL` - Override the API base URL
//! - `BB_TIMEOUT_SECS` - Request timeout in seconds
//! - `BB_DEBUG` - Log filter for `bb1` (e.g. `debug`)

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;

pub use api::{ApiError, BitbucketClient, ErrorKind};
pub use auth::Credentials;
pub use cli::Cli;
pub use config::ClientConfig;

/// Base URL of the legacy REST API. Every request path is appended to it.
pub const API_BASE_URL: &str = "https://api.bitbucket.org/1.0";

/// Name of the command-line binary.
pub const APP_NAME: &str = "bb1";

/// Crate version, taken from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for `bb1`.
///
/// API failures are mapped by [`ErrorKind`] so scripts can tell a missing
/// resource from a rejected credential without parsing stderr.
///
/// # Example
///
/// ```rust
/// use bitbucket_legacy::{exit_codes, ErrorKind};
///
/// assert_eq!(exit_codes::for_kind(ErrorKind::NotFound), exit_codes::NOT_FOUND);
/// ```
pub mod exit_codes {
    use crate::ErrorKind;

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// Unspecified error; see stderr.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Credentials missing, rejected, or unable to sign the request.
    pub const AUTH_ERROR: i32 = 4;

    /// The resource does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// The server rejected the request parameters.
    pub const BAD_REQUEST: i32 = 16;

    /// The server could not be reached.
    pub const NETWORK_ERROR: i32 = 32;

    /// Exit code for a failed API call.
    pub fn for_kind(kind: ErrorKind) -> i32 {
        match kind {
            ErrorKind::NotFound => NOT_FOUND,
            ErrorKind::Forbidden | ErrorKind::NotAuthorized | ErrorKind::SigningFailure => {
                AUTH_ERROR
            }
            ErrorKind::BadRequest => BAD_REQUEST,
            ErrorKind::TransportFailure => NETWORK_ERROR,
            _ => ERROR,
        }
    }

}
