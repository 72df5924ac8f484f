//
//  bitbucket-legacy
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Construction
//!
//! Turns a logical `(method, path, query, body)` tuple into a
//! [`PreparedRequest`]: an absolute URL, default headers, and the encoded
//! body bytes.
//!
//! ## Body Encodings
//!
//! | Variant | Content-Type | Visible to the OAuth signer |
//! |---------|--------------|-----------------------------|
//! | [`Body::Empty`] | none | n/a |
//! | [`Body::Form`] | `application/x-www-form-urlencoded` | yes, raw pairs |
//! | [`Body::Json`] | `application/json` | no |
//!
//! Form pairs are kept on the prepared request in their raw, unencoded form
//! because the OAuth 1.0a signature base string is built from the parameters
//! themselves, not from the encoded bytes.
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_legacy::api::request::{build, RequestSpec};
//!
//! let spec = RequestSpec::post("/groups/alice/").form([("name", "developers")]);
//! let request = build("https://api.bitbucket.org/1.0", spec)?;
//!
//! assert_eq!(request.url.as_str(), "https://api.bitbucket.org/1.0/groups/alice/");
//! assert_eq!(request.body.as_deref(), Some(&b"name=developers"[..]));
//! # Ok::<(), bitbucket_legacy::api::ApiError>(())
//! ```

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::Serialize;

use super::common::ApiError;

/// Content type of form-encoded request bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Content type of JSON request bodies and of every expected response.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// The payload of a request. Exactly one variant is active per request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// No request body.
    #[default]
    Empty,

    /// Ordered key/value pairs, sent form-encoded.
    Form(Vec<(String, String)>),

    /// An arbitrary JSON value.
    Json(serde_json::Value),
}

impl Body {
    /// Builds a form body from any iterator of string-like pairs.
    pub fn form<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a JSON body from a serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encoding`] if the value cannot be represented as
    /// JSON (e.g. a map with non-string keys).
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// The `Content-Type` this body is sent with, if any.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Form(_) => Some(FORM_CONTENT_TYPE),
            Self::Json(_) => Some(JSON_CONTENT_TYPE),
        }
    }

    fn encode(&self) -> Result<Option<Vec<u8>>, ApiError> {
        match self {
            Self::Empty => Ok(None),
            Self::Form(pairs) => Ok(Some(encode_form(pairs).into_bytes())),
            Self::Json(value) => Ok(Some(serde_json::to_vec(value)?)),
        }
    }
}

/// Encodes pairs as `application/x-www-form-urlencoded`, preserving order.
pub fn encode_form(pairs: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter())
        .finish()
}

/// Joins path segments into an API path, percent-encoding each segment.
///
/// Caller-supplied names (owners, slugs, emails) may contain `/`, `?` or
/// `#`; encoding keeps them inside their own segment. An empty last segment
/// yields a trailing slash.
///
/// # Example
///
/// ```rust
/// use bitbucket_legacy::api::request::encode_path;
///
/// assert_eq!(encode_path(&["groups", "alice", ""]), "/groups/alice/");
/// assert_eq!(encode_path(&["groups", "alice", "dev?ops"]), "/groups/alice/dev%3Fops");
/// ```
pub fn encode_path(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|segment| format!("/{}", urlencoding::encode(segment)))
        .collect()
}

/// A logical request, constructed fresh for every call.
///
/// # Example
///
/// ```rust
/// use bitbucket_legacy::api::request::RequestSpec;
///
/// let spec = RequestSpec::get("/groups").query("group", "alice/developers");
/// assert_eq!(spec.query.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP verb (GET, POST, PUT, DELETE).
    pub method: Method,
    /// Path relative to the API base URL, e.g. `/groups/alice/`.
    pub path: String,
    /// Ordered query parameters; repeated keys are allowed.
    pub query: Vec<(String, String)>,
    /// Request payload.
    pub body: Body,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends one query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Replaces the body with form pairs.
    pub fn form<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.body = Body::form(pairs);
        self
    }

    /// Replaces the body.
    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }
}

/// A request ready to be authenticated and dispatched.
///
/// Authentication strategies mutate `headers` in place. `form` is the
/// signing context: the raw form pairs, present only for form bodies.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    pub form: Option<Vec<(String, String)>>,
}

impl PreparedRequest {
    /// Returns a header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the decoded query pairs of the URL, in order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

/// Builds a [`PreparedRequest`] from a base URL and a [`RequestSpec`].
///
/// The path is appended to the base URL verbatim (so the `/1.0` prefix of
/// the base is kept), query parameters are added only when present, and the
/// headers are fixed: `Accept: application/json` plus the body's
/// `Content-Type`. Building the same spec twice yields identical output.
///
/// # Errors
///
/// - [`ApiError::InvalidUrl`] if the joined URL does not parse
/// - [`ApiError::Encoding`] if the JSON body cannot be serialized
pub fn build(base_url: &str, spec: RequestSpec) -> Result<PreparedRequest, ApiError> {
    let base = base_url.trim_end_matches('/');
    let raw = if spec.path.starts_with('/') {
        format!("{}{}", base, spec.path)
    } else {
        format!("{}/{}", base, spec.path)
    };

    let mut url = Url::parse(&raw)?;
    if !spec.query.is_empty() {
        url.query_pairs_mut().extend_pairs(spec.query.iter());
    }

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
    if let Some(content_type) = spec.body.content_type() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    }

    let body = spec.body.encode()?;
    let form = match spec.body {
        Body::Form(pairs) => Some(pairs),
        Body::Empty | Body::Json(_) => None,
    };

    Ok(PreparedRequest {
        method: spec.method,
        url,
        headers,
        body,
        form,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    const BASE: &str = "https://api.bitbucket.org/1.0";

    #[test]
    fn test_path_is_appended_to_base() {
        let req = build(BASE, RequestSpec::get("/groups/alice/")).unwrap();
        assert_eq!(req.url.as_str(), "https://api.bitbucket.org/1.0/groups/alice/");
        assert_eq!(req.method, Method::GET);
        assert!(req.body.is_none());
        assert!(req.form.is_none());
        assert_eq!(req.header("accept"), Some(JSON_CONTENT_TYPE));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn test_missing_slash_and_trailing_base_slash() {
        let req = build("https://api.bitbucket.org/1.0/", RequestSpec::get("user")).unwrap();
        assert_eq!(req.url.as_str(), "https://api.bitbucket.org/1.0/user");
    }

    #[test]
    fn test_query_only_when_present() {
        let req = build(BASE, RequestSpec::get("/groups")).unwrap();
        assert_eq!(req.url.query(), None);

        let req = build(
            BASE,
            RequestSpec::get("/groups")
                .query("group", "alice/dev team")
                .query("group", "bob/ops"),
        )
        .unwrap();
        assert_eq!(req.url.query(), Some("group=alice%2Fdev+team&group=bob%2Fops"));
        assert_eq!(
            req.query_pairs(),
            vec![
                ("group".to_string(), "alice/dev team".to_string()),
                ("group".to_string(), "bob/ops".to_string()),
            ]
        );
    }

    #[test]
    fn test_form_body_keeps_raw_pairs_for_signing() {
        let pairs = vec![
            ("name".to_string(), "dev & ops".to_string()),
            ("permission".to_string(), "read/write".to_string()),
            ("name".to_string(), "ünïcode".to_string()),
        ];
        let spec = RequestSpec::post("/groups/alice/").body(Body::Form(pairs.clone()));
        let req = build(BASE, spec).unwrap();

        assert_eq!(req.form.as_ref(), Some(&pairs));
        assert_eq!(req.header("content-type"), Some(FORM_CONTENT_TYPE));
        assert_eq!(
            String::from_utf8(req.body.unwrap()).unwrap(),
            "name=dev+%26+ops&permission=read%2Fwrite&name=%C3%BCn%C3%AFcode"
        );
    }

    #[test]
    fn test_json_body_is_not_exposed_to_signer() {
        let body = Body::json(&serde_json::json!({ "name": "test", "auto_add": true })).unwrap();
        let req = build(BASE, RequestSpec::put("/groups/alice/dev").body(body)).unwrap();

        assert!(req.form.is_none());
        assert_eq!(req.header("content-type"), Some(JSON_CONTENT_TYPE));
        let decoded: serde_json::Value = serde_json::from_slice(&req.body.unwrap()).unwrap();
        assert_eq!(decoded["name"], "test");
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let spec = RequestSpec::post("/repositories/")
            .query("a", "1")
            .form([("name", "repo"), ("scm", "git"), ("is_private", "true")]);
        let first = build(BASE, spec.clone()).unwrap();
        let second = build(BASE, spec).unwrap();
        assert_eq!(first.body, second.body);
        assert_eq!(first.url, second.url);
        assert_eq!(first.headers, second.headers);

        let mut map = BTreeMap::new();
        map.insert("z", 1);
        map.insert("a", 2);
        let spec = RequestSpec::post("/x").body(Body::json(&map).unwrap());
        assert_eq!(build(BASE, spec.clone()).unwrap().body, build(BASE, spec).unwrap().body);
    }

    #[test]
    fn test_unserializable_json_is_encoding_failure() {
        let mut map = BTreeMap::new();
        map.insert((1u8, 2u8), "tuple keys are not strings");
        let err = Body::json(&map).unwrap_err();
        assert_eq!(err.kind(), crate::api::ErrorKind::EncodingFailure);
    }

    #[test]
    fn test_encoded_segments_stay_in_path() {
        let path = encode_path(&["groups", "alice", "dev?ops#1", "a/b"]);
        assert_eq!(path, "/groups/alice/dev%3Fops%231/a%2Fb");

        let req = build(BASE, RequestSpec::delete(path)).unwrap();
        assert_eq!(req.url.path(), "/1.0/groups/alice/dev%3Fops%231/a%2Fb");
        assert_eq!(req.url.query(), None);
        assert_eq!(req.url.fragment(), None);
    }

    #[test]
    fn test_invalid_base_url() {
        let err = build("not a base", RequestSpec::get("/user")).unwrap_err();
        assert_eq!(err.kind(), crate::api::ErrorKind::EncodingFailure);
    }
}
