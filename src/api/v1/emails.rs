//
//  bitbucket-legacy
//  api/v1/emails.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Email addresses of an account: `/users/{account}/emails`.

use serde::{Deserialize, Serialize};

use crate::api::common::ApiError;
use crate::api::request::encode_path;
use crate::api::BitbucketClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub email: String,

    #[serde(default)]
    pub primary: bool,

    /// Whether the address has been confirmed.
    #[serde(default)]
    pub active: bool,
}

/// Accessor for the email endpoints.
pub struct Emails<'a> {
    client: &'a BitbucketClient,
}

impl<'a> Emails<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, account: &str) -> Result<Vec<EmailAddress>, ApiError> {
        self.client
            .get(&encode_path(&["users", account, "emails"]))
            .await
    }

    pub async fn find(&self, account: &str, email: &str) -> Result<EmailAddress, ApiError> {
        self.client
            .get(&encode_path(&["users", account, "emails", email]))
            .await
    }

    /// Adds an address. Bitbucket sends a confirmation mail before it
    /// becomes active.
    pub async fn add(&self, account: &str, email: &str) -> Result<Vec<EmailAddress>, ApiError> {
        self.client
            .put_form(
                &encode_path(&["users", account, "emails", email]),
                &[("email", email)],
            )
            .await
    }

    /// Makes a confirmed address the primary one.
    pub async fn set_primary(
        &self,
        account: &str,
        email: &str,
    ) -> Result<Vec<EmailAddress>, ApiError> {
        self.client
            .post_form(
                &encode_path(&["users", account, "emails", email]),
                &[("primary", "true")],
            )
            .await
    }

    /// Returns the primary address, if one is set.
    pub async fn primary(&self, account: &str) -> Result<Option<EmailAddress>, ApiError> {
        Ok(self
            .list(account)
            .await?
            .into_iter()
            .find(|address| address.primary))
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{form_of, recording_client};
    use reqwest::Method;

    const EMAILS: &str = r#"[
        {"email": "alice@example.com", "primary": false, "active": true},
        {"email": "alice@work.example", "primary": true, "active": true}
    ]"#;

    #[tokio::test]
    async fn test_primary() {
        let (client, _) = recording_client(200, EMAILS);
        let primary = client.emails().primary("alice").await.unwrap().unwrap();
        assert_eq!(primary.email, "alice@work.example");
    }

    #[tokio::test]
    async fn test_add_puts_form() {
        let (client, transport) = recording_client(200, EMAILS);
        client.emails().add("alice", "alice@example.com").await.unwrap();

        let sent = transport.only();
        assert_eq!(sent.method, Method::PUT);
        assert_eq!(sent.url.path(), "/1.0/users/alice/emails/alice%40example.com");
        assert_eq!(
            form_of(&sent),
            vec![("email".to_string(), "alice@example.com".to_string())]
        );
    }
}
