//
//  bitbucket-legacy
//  api/v1/keys.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! SSH keys on accounts and deploy keys on repositories.
//!
//! Both resources share one JSON shape and are addressed by a numeric
//! primary key (`pk`) assigned by the server.
//!
//! # Endpoints
//!
//! | Accessor | Base path |
//! |----------|-----------|
//! | [`SshKeys`] | `/users/{account}/ssh-keys` |
//! | [`DeployKeys`] | `/repositories/{owner}/{slug}/deploy-keys` |

use serde::{Deserialize, Serialize};

use crate::api::common::ApiError;
use crate::api::request::encode_path;
use crate::api::BitbucketClient;

/// A public SSH key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    /// Server-assigned identifier.
    pub pk: u64,

    /// The key in OpenSSH format, e.g. `ssh-rsa AAAA... comment`.
    pub key: String,

    #[serde(default)]
    pub label: Option<String>,
}

impl Key {
    /// The key type prefix, e.g. `ssh-ed25519`.
    pub fn key_type(&self) -> Option<&str> {
        self.key.split_whitespace().next()
    }
}

/// Shared list/find/create/delete over a key collection path.
async fn list(client: &BitbucketClient, base: &str) -> Result<Vec<Key>, ApiError> {
    client.get(base).await
}

async fn find(client: &BitbucketClient, base: &str, pk: u64) -> Result<Key, ApiError> {
    client.get(&format!("{}/{}", base, pk)).await
}

async fn create(
    client: &BitbucketClient,
    base: &str,
    key: &str,
    label: Option<&str>,
) -> Result<Key, ApiError> {
    let mut form = vec![("key", key)];
    if let Some(label) = label {
        form.push(("label", label));
    }
    client.post_form(base, &form).await
}

async fn delete(client: &BitbucketClient, base: &str, pk: u64) -> Result<(), ApiError> {
    client.delete(&format!("{}/{}", base, pk)).await
}

/// Accessor for the SSH keys of an account.
pub struct SshKeys<'a> {
    client: &'a BitbucketClient,
}

impl<'a> SshKeys<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    fn base(account: &str) -> String {
        encode_path(&["users", account, "ssh-keys"])
    }

    pub async fn list(&self, account: &str) -> Result<Vec<Key>, ApiError> {
        list(self.client, &Self::base(account)).await
    }

    pub async fn find(&self, account: &str, pk: u64) -> Result<Key, ApiError> {
        find(self.client, &Self::base(account), pk).await
    }

    pub async fn create(
        &self,
        account: &str,
        key: &str,
        label: Option<&str>,
    ) -> Result<Key, ApiError> {
        create(self.client, &Self::base(account), key, label).await
    }

    pub async fn delete(&self, account: &str, pk: u64) -> Result<(), ApiError> {
        delete(self.client, &Self::base(account), pk).await
    }
}

/// Accessor for the deploy keys of a repository.
pub struct DeployKeys<'a> {
    client: &'a BitbucketClient,
}

impl<'a> DeployKeys<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    fn base(owner: &str, slug: &str) -> String {
        encode_path(&["repositories", owner, slug, "deploy-keys"])
    }

    pub async fn list(&self, owner: &str, slug: &str) -> Result<Vec<Key>, ApiError> {
        list(self.client, &Self::base(owner, slug)).await
    }

    pub async fn find(&self, owner: &str, slug: &str, pk: u64) -> Result<Key, ApiError> {
        find(self.client, &Self::base(owner, slug), pk).await
    }

    pub async fn create(
        &self,
        owner: &str,
        slug: &str,
        key: &str,
        label: Option<&str>,
    ) -> Result<Key, ApiError> {
        create(self.client, &Self::base(owner, slug), key, label).await
    }

    pub async fn delete(&self, owner: &str, slug: &str, pk: u64) -> Result<(), ApiError> {
        delete(self.client, &Self::base(owner, slug), pk).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{form_of, recording_client};
    use crate::api::ErrorKind;
    use reqwest::Method;

    const KEY: &str = r#"{"pk": 42, "key": "ssh-ed25519 AAAAC3Nza alice@laptop", "label": "laptop"}"#;

    #[tokio::test]
    async fn test_ssh_key_create() {
        let (client, transport) = recording_client(200, KEY);
        let key = client
            .ssh_keys()
            .create("alice", "ssh-ed25519 AAAAC3Nza alice@laptop", Some("laptop"))
            .await
            .unwrap();

        assert_eq!(key.pk, 42);
        assert_eq!(key.key_type(), Some("ssh-ed25519"));

        let sent = transport.only();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.url.path(), "/1.0/users/alice/ssh-keys");
        assert_eq!(
            form_of(&sent),
            vec![
                ("key".to_string(), "ssh-ed25519 AAAAC3Nza alice@laptop".to_string()),
                ("label".to_string(), "laptop".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_deploy_key_paths() {
        let (client, transport) = recording_client(200, &format!("[{}]", KEY));
        let keys = client.deploy_keys().list("alice", "tools").await.unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(transport.only().url.path(), "/1.0/repositories/alice/tools/deploy-keys");

        let (client, transport) = recording_client(204, "");
        client.deploy_keys().delete("alice", "tools", 42).await.unwrap();
        let sent = transport.only();
        assert_eq!(sent.method, Method::DELETE);
        assert_eq!(sent.url.path(), "/1.0/repositories/alice/tools/deploy-keys/42");
    }

    #[tokio::test]
    async fn test_missing_key() {
        let (client, _) = recording_client(404, "");
        let err = client.ssh_keys().find("alice", 7).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
