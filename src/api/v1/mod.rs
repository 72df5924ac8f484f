//
//  bitbucket-legacy
//  api/v1/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket 1.0 API resources.
//!
//! Each submodule holds the response types of one resource and a borrowed
//! accessor obtained from [`BitbucketClient`](crate::api::BitbucketClient).
//! The accessors only pick a method, a path and a body; everything else is
//! done by the client's request pipeline.
//!
//! # Module Organization
//!
//! - [`groups`] - Account groups and their members
//! - [`users`] - Account profiles and followers
//! - [`repositories`] - Repository lookup, creation and deletion
//! - [`keys`] - Account SSH keys and repository deploy keys
//! - [`emails`] - Account email addresses
//! - [`teams`] - Team privileges and membership
//! - [`sources`] - Source browsing and raw file access
//! - [`services`] - Repository service hooks
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_legacy::api::BitbucketClient;
//!
//! # async fn example() -> Result<(), bitbucket_legacy::api::ApiError> {
//! let client = BitbucketClient::guest()?;
//! for group in client.groups().list("alice").await? {
//!     println!("{} ({})", group.name, group.slug);
//! }
//! # Ok(())
//! # }
//! ```

pub mod emails;
pub mod groups;
pub mod keys;
pub mod repositories;
pub mod services;
pub mod sources;
pub mod teams;
pub mod users;

pub use emails::{EmailAddress, Emails};
pub use groups::{Group, Groups};
pub use keys::{DeployKeys, Key, SshKeys};
pub use repositories::{NewRepository, Repositories, Repository};
pub use services::{Service, ServiceDetail, ServiceField, Services};
pub use sources::{Directory, FileEntry, SourceFile, SourceFiles};
pub use teams::{TeamPrivileges, Teams};
pub use users::{Account, Followers, Users};
