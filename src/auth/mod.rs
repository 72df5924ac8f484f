//
//  bitbucket-legacy
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Authentication strategies for the Bitbucket 1.0 API. A strategy mutates an
//! outbound [`PreparedRequest`] immediately before it is dispatched.
//!
//! ## Supported Authentication Methods
//!
//! - **Anonymous**: No credentials; only public resources are reachable.
//! - **Basic**: Username and password in an HTTP Basic `Authorization` header.
//! - **OAuth 1.0a**: Consumer and access token pairs, `HMAC-SHA1` signed.
//!
//! ## Module Structure
//!
//! - [`oauth1`]: OAuth 1.0a signature base string and header construction
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_legacy::api::request::{build, RequestSpec};
//! use bitbucket_legacy::auth::Credentials;
//!
//! let credentials = Credentials::basic("alice", "s3cret");
//! let mut request = build("https://api.bitbucket.org/1.0", RequestSpec::get("/user"))?;
//! credentials.authenticate(&mut request)?;
//!
//! assert!(request.header("authorization").unwrap().starts_with("Basic "));
//! # Ok::<(), bitbucket_legacy::api::ApiError>(())
//! ```

pub mod oauth1;

pub use oauth1::{OAuthCredentials, OAuthSigner};

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::header::{HeaderValue, AUTHORIZATION};

use crate::api::request::PreparedRequest;
use crate::api::ApiError;

/// Environment variable holding the account name for Basic authentication.
pub const ENV_USER: &str = "BB_USER";
/// Environment variable holding the password for Basic authentication.
pub const ENV_PASSWORD: &str = "BB_PASSWORD";
/// Environment variable holding the OAuth consumer key.
pub const ENV_CONSUMER_KEY: &str = "BB_CONSUMER_KEY";
/// Environment variable holding the OAuth consumer secret.
pub const ENV_CONSUMER_SECRET: &str = "BB_CONSUMER_SECRET";
/// Environment variable holding the OAuth access token.
pub const ENV_ACCESS_TOKEN: &str = "BB_ACCESS_TOKEN";
/// Environment variable holding the OAuth access token secret.
pub const ENV_TOKEN_SECRET: &str = "BB_TOKEN_SECRET";

/// Authentication credentials, fixed for the lifetime of a client.
///
/// # Variants
///
/// - `Anonymous`: leaves the request untouched
/// - `Basic`: standard HTTP Basic authentication
/// - `OAuth`: OAuth 1.0a `HMAC-SHA1` signature
///
/// # Example
///
/// ```rust
/// use bitbucket_legacy::auth::Credentials;
///
/// let anonymous = Credentials::Anonymous;
/// let basic = Credentials::basic("alice", "s3cret");
/// let oauth = Credentials::oauth("key", "secret", "token", "token-secret");
///
/// assert_eq!(anonymous.scheme(), "anonymous");
/// assert_eq!(basic.scheme(), "basic");
/// assert_eq!(oauth.scheme(), "oauth1");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    /// No authentication; only public resources are accessible.
    #[default]
    Anonymous,

    /// HTTP Basic authentication.
    Basic {
        /// The Bitbucket account name.
        username: String,
        /// The account password.
        password: String,
    },

    /// OAuth 1.0a signed requests.
    OAuth(OAuthCredentials),
}

impl Credentials {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn oauth(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Self::OAuth(OAuthCredentials::new(
            consumer_key,
            consumer_secret,
            access_token,
            token_secret,
        ))
    }

    /// Short name of the scheme, safe to log.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Basic { .. } => "basic",
            Self::OAuth(_) => "oauth1",
        }
    }

    /// Applies the credentials to a request, in place.
    ///
    /// Must be called exactly once per prepared request, right before it is
    /// sent. For OAuth the nonce is single-use, so a request that has to be
    /// resent must be rebuilt and authenticated again.
    ///
    /// # Errors
    ///
    /// Only the OAuth variant can fail, with [`ApiError::Signing`].
    pub fn authenticate(&self, request: &mut PreparedRequest) -> Result<(), ApiError> {
        match self {
            Self::Anonymous => Ok(()),
            Self::Basic { username, password } => {
                let value = basic_auth_header(username, password);
                set_authorization(request, &value)
            }
            Self::OAuth(creds) => {
                let form = request.form.as_deref().unwrap_or(&[]);
                let value = OAuthSigner::new(creds).sign(&request.method, &request.url, form)?;
                set_authorization(request, &value)
            }
        }
    }

    /// Loads credentials from the process environment.
    ///
    /// See [`Credentials::from_lookup`] for the rules.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves credentials from a variable lookup.
    ///
    /// - `BB_USER` and `BB_PASSWORD` both set: Basic
    /// - otherwise all four of `BB_CONSUMER_KEY`, `BB_CONSUMER_SECRET`,
    ///   `BB_ACCESS_TOKEN` and `BB_TOKEN_SECRET` set: OAuth
    /// - otherwise: Anonymous
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let (Some(username), Some(password)) = (get(ENV_USER), get(ENV_PASSWORD)) {
            return Self::Basic { username, password };
        }

        match (
            get(ENV_CONSUMER_KEY),
            get(ENV_CONSUMER_SECRET),
            get(ENV_ACCESS_TOKEN),
            get(ENV_TOKEN_SECRET),
        ) {
            (Some(key), Some(secret), Some(token), Some(token_secret)) => {
                Self::oauth(key, secret, token, token_secret)
            }
            _ => Self::Anonymous,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::OAuth(creds) => f.debug_tuple("OAuth").field(creds).finish(),
        }
    }
}

/// Returns the `Basic <base64(username:password)>` header value.
pub fn basic_auth_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

fn set_authorization(request: &mut PreparedRequest, value: &str) -> Result<(), ApiError> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|e| ApiError::Signing(format!("invalid authorization header: {}", e)))?;
    header.set_sensitive(true);
    request.headers.insert(AUTHORIZATION, header);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::{build, RequestSpec};
    use std::collections::HashMap;

    const BASE: &str = "https://api.bitbucket.org/1.0";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_anonymous_leaves_request_untouched() {
        let mut req = build(BASE, RequestSpec::get("/user")).unwrap();
        let before = req.headers.clone();
        Credentials::Anonymous.authenticate(&mut req).unwrap();
        assert_eq!(req.headers, before);
    }

    #[test]
    fn test_basic_header() {
        let mut req = build(BASE, RequestSpec::get("/user")).unwrap();
        Credentials::basic("Aladdin", "open sesame")
            .authenticate(&mut req)
            .unwrap();
        assert_eq!(
            req.header("authorization"),
            Some("Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==")
        );
    }

    #[test]
    fn test_oauth_header_signs_form() {
        let mut req = build(
            BASE,
            RequestSpec::post("/groups/alice/").form([("name", "test")]),
        )
        .unwrap();
        Credentials::oauth("key", "secret", "token", "token-secret")
            .authenticate(&mut req)
            .unwrap();

        let header = req.header("authorization").unwrap();
        assert!(header.starts_with("OAuth "));
        assert!(oauth1::header_param(header, "oauth_signature").is_some());
        assert_eq!(oauth1::header_param(header, "oauth_token").as_deref(), Some("token"));
    }

    #[test]
    fn test_from_lookup_prefers_basic() {
        let creds = Credentials::from_lookup(lookup(&[
            (ENV_USER, "alice"),
            (ENV_PASSWORD, "pw"),
            (ENV_CONSUMER_KEY, "key"),
        ]));
        assert_eq!(creds, Credentials::basic("alice", "pw"));
    }

    #[test]
    fn test_from_lookup_oauth_requires_all_four() {
        let partial = Credentials::from_lookup(lookup(&[
            (ENV_USER, "alice"),
            (ENV_CONSUMER_KEY, "key"),
            (ENV_CONSUMER_SECRET, "secret"),
            (ENV_ACCESS_TOKEN, "token"),
        ]));
        assert_eq!(partial, Credentials::Anonymous);

        let full = Credentials::from_lookup(lookup(&[
            (ENV_CONSUMER_KEY, "key"),
            (ENV_CONSUMER_SECRET, "secret"),
            (ENV_ACCESS_TOKEN, "token"),
            (ENV_TOKEN_SECRET, "token-secret"),
        ]));
        assert_eq!(full.scheme(), "oauth1");
    }

    #[test]
    fn test_empty_values_are_unset() {
        let creds = Credentials::from_lookup(lookup(&[(ENV_USER, "alice"), (ENV_PASSWORD, "")]));
        assert_eq!(creds, Credentials::Anonymous);
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", Credentials::basic("alice", "hunter2"));
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}
