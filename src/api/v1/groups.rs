//
//  bitbucket-legacy
//  api/v1/groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Group management for an account.
//!
//! Groups bundle users so that repository permissions can be granted once
//! per group. A group belongs to an owner account and is addressed by its
//! slug, which Bitbucket derives from the name at creation time.
//!
//! # Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list | `GET /groups/{owner}/` |
//! | find | `GET /groups?group={owner}/{slug}` |
//! | create | `POST /groups/{owner}/` form `name` |
//! | delete | `DELETE /groups/{owner}/{slug}` |
//! | members | `GET /groups/{owner}/{slug}/members` |
//! | add member | `PUT /groups/{owner}/{slug}/members/{member}` |
//! | remove member | `DELETE /groups/{owner}/{slug}/members/{member}` |

use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, UserRef};
use crate::api::request::{encode_path, RequestSpec};
use crate::api::BitbucketClient;

/// A group owned by an account.
///
/// # Example
///
/// ```rust
/// use bitbucket_legacy::api::v1::Group;
///
/// let json = r#"{
///     "name": "Rebel Alliance",
///     "slug": "rebel_alliance",
///     "permission": "read",
///     "auto_add": false,
///     "email_forwarding_disabled": false,
///     "owner": { "username": "leia" },
///     "members": []
/// }"#;
///
/// let group: Group = serde_json::from_str(json).unwrap();
/// assert_eq!(group.slug, "rebel_alliance");
/// assert_eq!(group.owner.unwrap().username, "leia");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Display name.
    pub name: String,

    /// URL-safe identifier, unique per owner.
    pub slug: String,

    /// Account name of the owner, when the API includes it flat.
    #[serde(default, rename = "accountname")]
    pub account_name: Option<String>,

    /// Default repository permission (`read`, `write`, `admin`).
    #[serde(default)]
    pub permission: Option<String>,

    /// Whether new repositories grant this group access automatically.
    #[serde(default)]
    pub auto_add: bool,

    #[serde(default)]
    pub email_forwarding_disabled: bool,

    #[serde(default)]
    pub owner: Option<UserRef>,

    #[serde(default)]
    pub members: Vec<UserRef>,
}

/// Accessor for the group endpoints.
pub struct Groups<'a> {
    client: &'a BitbucketClient,
}

impl<'a> Groups<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    /// Lists the groups of an account.
    pub async fn list(&self, owner: &str) -> Result<Vec<Group>, ApiError> {
        self.client.get(&encode_path(&["groups", owner, ""])).await
    }

    /// Looks up one group by owner and slug.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] if no group matches
    /// - [`ApiError::UnexpectedResult`] if more than one does
    pub async fn find(&self, owner: &str, slug: &str) -> Result<Group, ApiError> {
        let filter = format!("{}/{}", owner, slug);
        let mut groups: Vec<Group> = self
            .client
            .get_with_query("/groups", &[("group", filter.as_str())])
            .await?;

        match groups.len() {
            1 => Ok(groups.remove(0)),
            0 => Err(ApiError::NotFound),
            n => Err(ApiError::UnexpectedResult(format!(
                "expected 1 group, found {} for {}",
                n, filter
            ))),
        }
    }

    /// Creates a group. The slug is derived from `name` by the server.
    pub async fn create(&self, owner: &str, name: &str) -> Result<Group, ApiError> {
        self.client
            .post_form(&encode_path(&["groups", owner, ""]), &[("name", name)])
            .await
    }

    pub async fn delete(&self, owner: &str, slug: &str) -> Result<(), ApiError> {
        self.client
            .delete(&encode_path(&["groups", owner, slug]))
            .await
    }

    pub async fn members(&self, owner: &str, slug: &str) -> Result<Vec<UserRef>, ApiError> {
        self.client
            .get(&encode_path(&["groups", owner, slug, "members"]))
            .await
    }

    /// Adds an account to a group and returns the added member.
    pub async fn add_member(
        &self,
        owner: &str,
        slug: &str,
        member: &str,
    ) -> Result<UserRef, ApiError> {
        self.client
            .execute_json(RequestSpec::put(encode_path(&[
                "groups", owner, slug, "members", member,
            ])))
            .await
    }

    pub async fn remove_member(&self, owner: &str, slug: &str, member: &str) -> Result<(), ApiError> {
        self.client
            .delete(&encode_path(&["groups", owner, slug, "members", member]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{form_of, recording_client};
    use crate::api::ErrorKind;
    use reqwest::Method;

    const GROUP: &str = r#"{"name":"Developers","slug":"developers","permission":"write",
        "auto_add":true,"owner":{"username":"alice"},"members":[{"username":"bob"}]}"#;

    #[tokio::test]
    async fn test_list() {
        let (client, transport) = recording_client(200, &format!("[{}]", GROUP));
        let groups = client.groups().list("alice").await.unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].permission.as_deref(), Some("write"));
        assert!(groups[0].auto_add);
        assert_eq!(groups[0].members[0].username, "bob");
        assert_eq!(transport.only().url.path(), "/1.0/groups/alice/");
    }

    #[tokio::test]
    async fn test_find_uses_group_filter() {
        let (client, transport) = recording_client(200, &format!("[{}]", GROUP));
        let group = client.groups().find("alice", "developers").await.unwrap();

        assert_eq!(group.name, "Developers");
        let sent = transport.only();
        assert_eq!(sent.url.path(), "/1.0/groups");
        assert_eq!(
            sent.query_pairs(),
            vec![("group".to_string(), "alice/developers".to_string())]
        );
    }

    #[tokio::test]
    async fn test_find_counts() {
        let (client, _) = recording_client(200, "[]");
        let err = client.groups().find("alice", "nope").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let (client, _) = recording_client(200, &format!("[{},{}]", GROUP, GROUP));
        let err = client.groups().find("alice", "developers").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedResult);
    }

    #[tokio::test]
    async fn test_create_posts_form() {
        let (client, transport) = recording_client(200, GROUP);
        client.groups().create("alice", "Developers").await.unwrap();

        let sent = transport.only();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.url.path(), "/1.0/groups/alice/");
        assert_eq!(form_of(&sent), vec![("name".to_string(), "Developers".to_string())]);
    }

    #[tokio::test]
    async fn test_membership() {
        let (client, transport) = recording_client(200, r#"{"username":"bob"}"#);
        let member = client
            .groups()
            .add_member("alice", "developers", "bob")
            .await
            .unwrap();
        assert_eq!(member.username, "bob");

        let sent = transport.only();
        assert_eq!(sent.method, Method::PUT);
        assert_eq!(sent.url.path(), "/1.0/groups/alice/developers/members/bob");
        assert!(sent.body.is_none());
    }

    #[tokio::test]
    async fn test_delete_ignores_body() {
        let (client, transport) = recording_client(204, "");
        client.groups().delete("alice", "developers").await.unwrap();
        assert_eq!(transport.only().method, Method::DELETE);
    }

    #[tokio::test]
    async fn test_names_are_encoded_into_one_segment() {
        let (client, transport) = recording_client(204, "");
        client.groups().delete("alice", "dev?ops").await.unwrap();

        let sent = transport.only();
        assert_eq!(sent.url.path(), "/1.0/groups/alice/dev%3Fops");
        assert_eq!(sent.url.query(), None);

        let (client, transport) = recording_client(200, r#"{"username":"b/ob"}"#);
        client
            .groups()
            .add_member("alice", "developers", "b/ob")
            .await
            .unwrap();
        assert_eq!(
            transport.only().url.path(),
            "/1.0/groups/alice/developers/members/b%2Fob"
        );
    }
}
