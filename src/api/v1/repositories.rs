//
//  bitbucket-legacy
//  api/v1/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository lookup, creation and deletion.
//!
//! # Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | find | `GET /repositories/{owner}/{slug}` |
//! | list mine | `GET /user/repositories` |
//! | create | `POST /repositories/` form |
//! | delete | `DELETE /repositories/{owner}/{slug}` |
//!
//! # Timestamps
//!
//! The 1.0 API reports times as `YYYY-MM-DD HH:MM:SS+00:00` strings. They are
//! kept verbatim and parsed on demand with [`parse_timestamp`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::common::ApiError;
use crate::api::request::{encode_path, Body, RequestSpec};
use crate::api::BitbucketClient;

/// A repository as returned by the 1.0 API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,

    pub slug: String,

    /// Owner account name.
    pub owner: String,

    /// Version control system: `git` or `hg`.
    #[serde(default)]
    pub scm: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub is_private: bool,

    #[serde(default)]
    pub is_fork: bool,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub has_issues: bool,

    #[serde(default)]
    pub has_wiki: bool,

    /// Repository size in bytes.
    #[serde(default)]
    pub size: u64,

    #[serde(default)]
    pub website: Option<String>,

    #[serde(default)]
    pub utc_created_on: Option<String>,

    #[serde(default)]
    pub utc_last_updated: Option<String>,

    #[serde(default)]
    pub resource_uri: Option<String>,
}

impl Repository {
    /// `owner/slug`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.slug)
    }

    pub fn created_on(&self) -> Option<DateTime<Utc>> {
        self.utc_created_on.as_deref().and_then(parse_timestamp)
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.utc_last_updated.as_deref().and_then(parse_timestamp)
    }
}

/// Parses a 1.0 API timestamp such as `2012-06-27 21:41:44+00:00`.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%:z")
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Form payload for creating a repository. Only `name` is required.
///
/// # Example
///
/// ```rust
/// use bitbucket_legacy::api::v1::NewRepository;
///
/// let repo = NewRepository::new("tools").private(true).scm("git");
/// assert_eq!(repo.to_form()[0], ("name".to_string(), "tools".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewRepository {
    pub name: String,
    pub scm: Option<String>,
    pub is_private: Option<bool>,
    pub description: Option<String>,
    pub language: Option<String>,
}

impl NewRepository {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn scm(mut self, scm: impl Into<String>) -> Self {
        self.scm = Some(scm.into());
        self
    }

    pub fn private(mut self, is_private: bool) -> Self {
        self.is_private = Some(is_private);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Form pairs in a fixed order; unset fields are omitted.
    pub fn to_form(&self) -> Vec<(String, String)> {
        let mut form = vec![("name".to_string(), self.name.clone())];
        if let Some(scm) = &self.scm {
            form.push(("scm".to_string(), scm.clone()));
        }
        if let Some(is_private) = self.is_private {
            form.push(("is_private".to_string(), is_private.to_string()));
        }
        if let Some(description) = &self.description {
            form.push(("description".to_string(), description.clone()));
        }
        if let Some(language) = &self.language {
            form.push(("language".to_string(), language.clone()));
        }
        form
    }
}

/// Accessor for the repository endpoints.
pub struct Repositories<'a> {
    client: &'a BitbucketClient,
}

impl<'a> Repositories<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    pub async fn find(&self, owner: &str, slug: &str) -> Result<Repository, ApiError> {
        self.client
            .get(&encode_path(&["repositories", owner, slug]))
            .await
    }

    /// Lists the repositories visible to the authenticated user.
    pub async fn list_mine(&self) -> Result<Vec<Repository>, ApiError> {
        self.client.get("/user/repositories").await
    }

    /// Creates a repository owned by the authenticated user.
    pub async fn create(&self, repo: &NewRepository) -> Result<Repository, ApiError> {
        self.client
            .execute_json(RequestSpec::post("/repositories/").body(Body::Form(repo.to_form())))
            .await
    }

    pub async fn delete(&self, owner: &str, slug: &str) -> Result<(), ApiError> {
        self.client
            .delete(&encode_path(&["repositories", owner, slug]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{form_of, recording_client};
    use chrono::{Datelike, Timelike};
    use reqwest::Method;

    const REPO: &str = r#"{
        "name": "Tools", "slug": "tools", "owner": "alice", "scm": "git",
        "is_private": true, "size": 1024,
        "utc_created_on": "2012-06-27 21:41:44+00:00",
        "utc_last_updated": "2013-01-02 03:04:05+00:00"
    }"#;

    #[tokio::test]
    async fn test_find() {
        let (client, transport) = recording_client(200, REPO);
        let repo = client.repositories().find("alice", "tools").await.unwrap();

        assert_eq!(repo.full_name(), "alice/tools");
        assert!(repo.is_private);
        assert_eq!(repo.size, 1024);
        assert_eq!(transport.only().url.path(), "/1.0/repositories/alice/tools");
    }

    #[test]
    fn test_timestamps() {
        let repo: Repository = serde_json::from_str(REPO).unwrap();
        let created = repo.created_on().unwrap();
        assert_eq!((created.year(), created.month(), created.day()), (2012, 6, 27));
        assert_eq!(created.hour(), 21);
        assert!(repo.last_updated().unwrap() > created);

        assert!(parse_timestamp("2013-01-02T03:04:05Z").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[tokio::test]
    async fn test_create_sends_only_set_fields() {
        let (client, transport) = recording_client(200, REPO);
        let new = NewRepository::new("Tools").private(true);
        client.repositories().create(&new).await.unwrap();

        let sent = transport.only();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.url.path(), "/1.0/repositories/");
        assert_eq!(
            form_of(&sent),
            vec![
                ("name".to_string(), "Tools".to_string()),
                ("is_private".to_string(), "true".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_mine() {
        let (client, transport) = recording_client(200, &format!("[{}]", REPO));
        let repos = client.repositories().list_mine().await.unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(transport.only().url.path(), "/1.0/user/repositories");
    }
}
