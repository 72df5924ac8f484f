//
//  bitbucket-legacy
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Interpretation
//!
//! Maps a buffered [`ApiResponse`] to success or an [`ApiError`], and decodes
//! successful bodies into the caller's target type.
//!
//! ## Status Mapping
//!
//! Checked in this order, first match wins:
//!
//! | Status | Result |
//! |--------|--------|
//! | 404 | [`ApiError::NotFound`] |
//! | 403 | [`ApiError::Forbidden`] |
//! | 401 | [`ApiError::NotAuthorized`] |
//! | 400 | [`ApiError::BadRequest`] |
//! | anything else | depends on [`StatusPolicy`] |
//!
//! The mapping looks at the status code only, never at the body.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::common::ApiError;
use super::transport::ApiResponse;

/// What to do with a non-success status outside the four mapped codes.
///
/// The 1.0 API only documents 400, 401, 403 and 404. Anything else (5xx,
/// 3xx, 429) has no dedicated meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Treat the response as a success and attempt to decode it. An error
    /// page then usually surfaces as [`ApiError::Decode`]. A warning is logged.
    #[default]
    Lenient,

    /// Fail with [`ApiError::UnexpectedStatus`].
    Strict,
}

/// Returns the error for one of the four mapped status codes.
pub fn status_error(status: StatusCode) -> Option<ApiError> {
    match status {
        StatusCode::NOT_FOUND => Some(ApiError::NotFound),
        StatusCode::FORBIDDEN => Some(ApiError::Forbidden),
        StatusCode::UNAUTHORIZED => Some(ApiError::NotAuthorized),
        StatusCode::BAD_REQUEST => Some(ApiError::BadRequest),
        _ => None,
    }
}

/// Checks the status of a response.
///
/// # Errors
///
/// - One of the four status-derived errors for 404, 403, 401 and 400
/// - [`ApiError::UnexpectedStatus`] for any other non-2xx under
///   [`StatusPolicy::Strict`]
pub fn interpret(response: &ApiResponse, policy: StatusPolicy) -> Result<(), ApiError> {
    if let Some(err) = status_error(response.status) {
        return Err(err);
    }

    if !response.status.is_success() {
        match policy {
            StatusPolicy::Strict => return Err(ApiError::UnexpectedStatus(response.status)),
            StatusPolicy::Lenient => {
                tracing::warn!(
                    "Unmapped status {} treated as success ({} byte body)",
                    response.status,
                    response.body.len()
                );
            }
        }
    }

    Ok(())
}

/// Decodes a response body as JSON.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if the body is not valid JSON for `T`.
pub fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ApiError> {
    serde_json::from_slice(&response.body).map_err(ApiError::Decode)
}
