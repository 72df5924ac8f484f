//
//  bitbucket-legacy
//  api/testing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! In-memory transport for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use super::common::ApiError;
use super::request::PreparedRequest;
use super::transport::{ApiResponse, Transport};
use super::BitbucketClient;
use crate::auth::Credentials;

/// Records every dispatched request and answers with a canned response.
pub struct RecordingTransport {
    status: StatusCode,
    body: Vec<u8>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl RecordingTransport {
    pub fn new(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.as_bytes().to_vec(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn recorded(&self) -> Vec<PreparedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The single request sent so far.
    pub fn only(&self) -> PreparedRequest {
        let sent = self.recorded();
        assert_eq!(sent.len(), 1, "expected exactly one request");
        sent.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: PreparedRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        Ok(ApiResponse::new(self.status, self.body.clone()))
    }
}

/// Fails every request as if the network were down.
pub struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn send(&self, _request: PreparedRequest) -> Result<ApiResponse, ApiError> {
        Err(ApiError::Transport("connection reset".into()))
    }
}

/// An anonymous client on a recording transport.
pub fn recording_client(status: u16, body: &str) -> (BitbucketClient, Arc<RecordingTransport>) {
    let transport = RecordingTransport::new(status, body);
    let client = BitbucketClient::with_transport(Credentials::Anonymous, transport.clone());
    (client, transport)
}

/// The decoded form body of a request.
pub fn form_of(request: &PreparedRequest) -> Vec<(String, String)> {
    request.form.clone().unwrap_or_default()
}
