//
//  bitbucket-legacy
//  api/v1/sources.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository source browsing.
//!
//! `GET /repositories/{owner}/{slug}/src/{revision}/{path}` returns a
//! directory listing when `path` names a directory (or is empty), and the
//! file contents wrapped in JSON when it names a file. The `raw` endpoint
//! returns file bytes unwrapped.

use serde::{Deserialize, Serialize};

use crate::api::common::ApiError;
use crate::api::request::{encode_path, RequestSpec};
use crate::api::BitbucketClient;

/// A directory listing at a revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Directory {
    /// Short changeset hash the listing was taken at.
    pub node: String,

    pub path: String,

    #[serde(default)]
    pub directories: Vec<String>,

    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// A file within a [`Directory`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,

    #[serde(default)]
    pub size: u64,

    #[serde(default)]
    pub revision: Option<String>,

    #[serde(default)]
    pub utctimestamp: Option<String>,
}

/// A file at a revision, with its contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub node: String,

    pub path: String,

    /// File contents as text.
    pub data: String,

    #[serde(default)]
    pub size: Option<u64>,
}

/// Accessor for the source endpoints.
pub struct SourceFiles<'a> {
    client: &'a BitbucketClient,
}

impl<'a> SourceFiles<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    /// `path` keeps its `/` separators; each component is encoded on its own.
    fn path(kind: &str, owner: &str, slug: &str, revision: &str, path: &str) -> String {
        let mut segments = vec!["repositories", owner, slug, kind, revision];
        segments.extend(path.trim_start_matches('/').split('/'));
        encode_path(&segments)
    }

    /// Lists a directory. An empty `path` lists the repository root.
    pub async fn list(
        &self,
        owner: &str,
        slug: &str,
        revision: &str,
        path: &str,
    ) -> Result<Directory, ApiError> {
        self.client
            .get(&Self::path("src", owner, slug, revision, path))
            .await
    }

    pub async fn file(
        &self,
        owner: &str,
        slug: &str,
        revision: &str,
        path: &str,
    ) -> Result<SourceFile, ApiError> {
        self.client
            .get(&Self::path("src", owner, slug, revision, path))
            .await
    }

    /// File bytes, undecoded.
    pub async fn raw(
        &self,
        owner: &str,
        slug: &str,
        revision: &str,
        path: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let spec = RequestSpec::get(Self::path("raw", owner, slug, revision, path));
        Ok(self.client.send(spec).await?.body)
    }
}
