//
//  bitbucket-legacy
//  api/v1/services.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository service hooks ("brokers"): POST hooks, issue trackers, chat
//! notifications and the like, configured per repository under
//! `/repositories/{owner}/{slug}/services`.

use serde::{Deserialize, Serialize};

use crate::api::common::ApiError;
use crate::api::request::{encode_path, Body, RequestSpec};
use crate::api::BitbucketClient;

/// A configured service hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: u64,
    pub service: ServiceDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDetail {
    /// Service type, e.g. `POST`.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub fields: Vec<ServiceField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceField {
    pub name: String,

    #[serde(default)]
    pub value: Option<String>,
}

impl Service {
    /// Value of a configuration field, e.g. `URL` for POST hooks.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.service
            .fields
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.value.as_deref())
    }
}

/// Accessor for the service endpoints.
pub struct Services<'a> {
    client: &'a BitbucketClient,
}

impl<'a> Services<'a> {
    pub(crate) fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    fn base(owner: &str, slug: &str) -> String {
        encode_path(&["repositories", owner, slug, "services"])
    }

    pub async fn list(&self, owner: &str, slug: &str) -> Result<Vec<Service>, ApiError> {
        self.client.get(&Self::base(owner, slug)).await
    }

    pub async fn find(&self, owner: &str, slug: &str, id: u64) -> Result<Service, ApiError> {
        self.client
            .get(&format!("{}/{}", Self::base(owner, slug), id))
            .await
    }

    /// Creates a service of type `kind` with the given field values.
    pub async fn create(
        &self,
        owner: &str,
        slug: &str,
        kind: &str,
        fields: &[(&str, &str)],
    ) -> Result<Service, ApiError> {
        let mut form = vec![("type".to_string(), kind.to_string())];
        form.extend(fields.iter().map(|(k, v)| (k.to_string(), v.to_string())));

        self.client
            .execute_json(RequestSpec::post(Self::base(owner, slug)).body(Body::Form(form)))
            .await
    }

    pub async fn delete(&self, owner: &str, slug: &str, id: u64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("{}/{}", Self::base(owner, slug), id))
            .await
    }
}
