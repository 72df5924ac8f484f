//
//  bitbucket-legacy
//  api/v1/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Account profiles.
//!
//! `GET /users/{account}` returns the public profile of any account together
//! with its visible repositories; `GET /user` does the same for the
//! authenticated caller.

use serde::{Deserialize, Serialize};

use super::repositories::Repository;
use crate::api::common::{ApiError, UserRef};
use crate::api::request::encode_path;
use crate::api::BitbucketClient;

/// An account profile and the repositories visible to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub user: UserRef,

    #[serde(default)]
    pub repositories: Vec<Repository>,
}

/// Followers of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub followers: Vec<UserRef>,
}

/// Accessor for the user endpoints.
pub struct Users<'a> {
    client: &'a BitbucketClient,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    pub async fn find(&self, account: &str) -> Result<Account, ApiError> {
        self.client.get(&encode_path(&["users", account])).await
    }

    /// The authenticated account. Fails with `NotAuthorized` when anonymous.
    pub async fn current(&self) -> Result<Account, ApiError> {
        self.client.get("/user").await
    }

    pub async fn followers(&self, account: &str) -> Result<Followers, ApiError> {
        self.client
            .get(&encode_path(&["users", account, "followers"]))
            .await
    }
}
