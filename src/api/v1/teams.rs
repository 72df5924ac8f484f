//
//  bitbucket-legacy
//  api/v1/teams.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Teams the authenticated user belongs to.
//!
//! `GET /user/privileges` returns a map from team account name to the
//! caller's privilege in that team (`admin` or `collaborator`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, UserRef};
use crate::api::request::encode_path;
use crate::api::BitbucketClient;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamPrivileges {
    #[serde(default)]
    pub teams: BTreeMap<String, String>,
}

impl TeamPrivileges {
    /// Team names where the caller has `privilege`.
    pub fn with_privilege(&self, privilege: &str) -> Vec<&str> {
        self.teams
            .iter()
            .filter(|(_, p)| p.as_str() == privilege)
            .map(|(team, _)| team.as_str())
            .collect()
    }
}

/// Accessor for the team endpoints.
pub struct Teams<'a> {
    client: &'a BitbucketClient,
}

impl<'a> Teams<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    pub async fn privileges(&self) -> Result<TeamPrivileges, ApiError> {
        self.client.get("/user/privileges").await
    }

    /// Names of every team the caller belongs to, sorted.
    pub async fn list(&self) -> Result<Vec<String>, ApiError> {
        Ok(self.privileges().await?.teams.into_keys().collect())
    }

    /// Members of a team account.
    pub async fn members(&self, team: &str) -> Result<Vec<UserRef>, ApiError> {
        self.client.get(&encode_path(&["users", team, "members"])).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::recording_client;

    #[tokio::test]
    async fn test_privileges() {
        let (client, transport) = recording_client(
            200,
            r#"{"teams": {"rebels": "admin", "empire": "collaborator", "jedi": "admin"}}"#,
        );
        let privileges = client.teams().privileges().await.unwrap();

        assert_eq!(privileges.with_privilege("admin"), vec!["jedi", "rebels"]);
        assert_eq!(transport.only().url.path(), "/1.0/user/privileges");
    }

    #[tokio::test]
    async fn test_list_sorted() {
        let (client, _) = recording_client(200, r#"{"teams": {"b": "admin", "a": "admin"}}"#);
        assert_eq!(client.teams().list().await.unwrap(), vec!["a", "b"]);
    }
}
