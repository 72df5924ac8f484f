//
//  bitbucket-legacy
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module implements the request pipeline for the Bitbucket 1.0 REST API
//! and the resource accessors built on top of it.
//!
//! ## Architecture
//!
//! - [`request`]: Builds a [`PreparedRequest`](request::PreparedRequest) from a method, path, query and body
//! - [`crate::auth`]: Applies Anonymous, Basic or OAuth 1.0a credentials
//! - [`transport`]: Sends the request and buffers the response
//! - [`response`]: Maps status codes to errors and decodes JSON
//! - [`client`]: Chains the stages together
//! - [`v1`]: Typed accessors (groups, users, repositories, keys, ...)
//! - [`common`]: Error taxonomy and shared types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitbucket_legacy::api::BitbucketClient;
//! use bitbucket_legacy::auth::Credentials;
//!
//! # async fn example() -> Result<(), bitbucket_legacy::api::ApiError> {
//! let client = BitbucketClient::new(Credentials::basic("alice", "s3cret"))?;
//! let group = client.groups().create("alice", "developers").await?;
//! println!("Created {}", group.slug);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`ApiError`]. The four documented status codes map to
//! dedicated variants:
//!
//! - `BadRequest`: 400
//! - `NotAuthorized`: 401
//! - `Forbidden`: 403
//! - `NotFound`: 404
//!
//! Failures before the server answered (`Transport`, `Encoding`, `Signing`)
//! and unusable answers (`Decode`) are kept apart; see [`ErrorKind`].

/// Core client and request pipeline.
pub mod client;

/// Error taxonomy and types shared between resources.
pub mod common;

/// Request construction and body encoding.
pub mod request;

/// Status code mapping and response decoding.
pub mod response;

/// The network seam.
pub mod transport;

/// Bitbucket 1.0 resources.
pub mod v1;

#[cfg(test)]
pub(crate) mod testing;

pub use client::BitbucketClient;
pub use common::{ApiError, ErrorKind};
