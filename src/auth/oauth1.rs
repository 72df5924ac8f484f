//
//  bitbucket-legacy
//  auth/oauth1.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OAuth 1.0a Request Signing
//!
//! The Bitbucket 1.0 API accepts requests signed with OAuth 1.0a using the
//! `HMAC-SHA1` signature method (RFC 5849). This module produces the
//! `Authorization` header for a single request.
//!
//! ## Signing Steps
//!
//! 1. Generate a fresh nonce and timestamp
//! 2. Collect the query parameters, the form body parameters and the
//!    `oauth_*` protocol parameters
//! 3. Percent-encode (RFC 3986), sort, and join them into the normalized
//!    parameter string
//! 4. Build the signature base string `METHOD&uri&params`
//! 5. Sign it with `HMAC-SHA1` keyed by `consumer_secret&token_secret`
//! 6. Emit `Authorization: OAuth key="value", ...`
//!
//! A signature is only valid once. Resending a signed request requires
//! signing it again, which produces a new nonce and timestamp.
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_legacy::auth::{OAuthCredentials, OAuthSigner};
//! use reqwest::{Method, Url};
//!
//! let credentials = OAuthCredentials::new("key", "secret", "token", "token-secret");
//! let url = Url::parse("https://api.bitbucket.org/1.0/user")?;
//!
//! let header = OAuthSigner::new(&credentials).sign(&Method::GET, &url, &[])?;
//! assert!(header.starts_with("OAuth "));
//! assert!(header.contains("oauth_signature="));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;

use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine,
};
use hmac::{Hmac, Mac};
use rand::RngCore;
use reqwest::{Method, Url};
use sha1::Sha1;

use crate::api::ApiError;

type HmacSha1 = Hmac<Sha1>;

/// The only signature method the 1.0 API supports.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// Value of the `oauth_version` parameter.
pub const OAUTH_VERSION: &str = "1.0";

/// OAuth 1.0a consumer and access token key material.
///
/// The consumer pair identifies the registered application; the access token
/// pair identifies the user who authorized it.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub token_secret: String,
}

impl OAuthCredentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            token_secret: token_secret.into(),
        }
    }
}

impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

/// Signs requests with a borrowed set of [`OAuthCredentials`].
pub struct OAuthSigner<'a> {
    credentials: &'a OAuthCredentials,
}

impl<'a> OAuthSigner<'a> {
    pub fn new(credentials: &'a OAuthCredentials) -> Self {
        Self { credentials }
    }

    /// Signs a request with a freshly generated nonce and timestamp and
    /// returns the `Authorization` header value.
    ///
    /// # Parameters
    ///
    /// * `method` - The HTTP verb of the request
    /// * `url` - The absolute request URL; its query pairs are signed
    /// * `form` - Raw form body pairs; empty for JSON or empty bodies
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Signing`] if the consumer key is empty, the URL
    /// has no host, or the HMAC key cannot be constructed.
    pub fn sign(
        &self,
        method: &Method,
        url: &Url,
        form: &[(String, String)],
    ) -> Result<String, ApiError> {
        self.sign_with(method, url, form, &generate_nonce(), generate_timestamp())
    }

    /// Signs a request with a caller-supplied nonce and timestamp.
    ///
    /// Only useful for reproducible signatures; real requests go through
    /// [`OAuthSigner::sign`].
    pub fn sign_with(
        &self,
        method: &Method,
        url: &Url,
        form: &[(String, String)],
        nonce: &str,
        timestamp: i64,
    ) -> Result<String, ApiError> {
        let mut protocol = self.protocol_params(nonce, timestamp)?;
        let base = signature_base_string(method, url, form, &protocol)?;
        let signature = self.signature(&base)?;
        protocol.push(("oauth_signature".to_string(), signature));
        Ok(authorization_header(&protocol))
    }

    fn protocol_params(
        &self,
        nonce: &str,
        timestamp: i64,
    ) -> Result<Vec<(String, String)>, ApiError> {
        let creds = self.credentials;
        if creds.consumer_key.is_empty() {
            return Err(ApiError::Signing("consumer key is empty".to_string()));
        }

        let mut params = vec![
            ("oauth_consumer_key".to_string(), creds.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
        ];
        if !creds.access_token.is_empty() {
            params.push(("oauth_token".to_string(), creds.access_token.clone()));
        }
        params.push(("oauth_version".to_string(), OAUTH_VERSION.to_string()));
        Ok(params)
    }

    fn signature(&self, base: &str) -> Result<String, ApiError> {
        let key = format!(
            "{}&{}",
            percent_encode(&self.credentials.consumer_secret),
            percent_encode(&self.credentials.token_secret)
        );
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| ApiError::Signing(format!("invalid signing key: {}", e)))?;
        mac.update(base.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// RFC 3986 percent-encoding: everything except `A-Z a-z 0-9 - . _ ~`.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Returns the base string URI: scheme and host lowercased, default port
/// dropped, no query or fragment.
pub fn base_string_uri(url: &Url) -> Result<String, ApiError> {
    let host = url
        .host_str()
        .ok_or_else(|| ApiError::Signing(format!("URL has no host: {}", url)))?;

    let mut uri = format!(
        "{}://{}",
        url.scheme().to_ascii_lowercase(),
        host.to_ascii_lowercase()
    );
    // `Url::port` is `None` when the port is the scheme default.
    if let Some(port) = url.port() {
        uri.push_str(&format!(":{}", port));
    }
    uri.push_str(url.path());
    Ok(uri)
}

/// Encodes, sorts, and joins every parameter that takes part in the
/// signature: URL query pairs, form pairs and protocol parameters.
pub fn normalized_parameters(
    url: &Url,
    form: &[(String, String)],
    protocol: &[(String, String)],
) -> String {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (percent_encode(&k), percent_encode(&v)))
        .chain(
            form.iter()
                .chain(protocol.iter())
                .filter(|(k, _)| k != "oauth_signature")
                .map(|(k, v)| (percent_encode(k), percent_encode(v))),
        )
        .collect();
    params.sort();

    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Builds the signature base string `METHOD&encoded-uri&encoded-params`.
pub fn signature_base_string(
    method: &Method,
    url: &Url,
    form: &[(String, String)],
    protocol: &[(String, String)],
) -> Result<String, ApiError> {
    let uri = base_string_uri(url)?;
    let params = normalized_parameters(url, form, protocol);
    Ok(format!(
        "{}&{}&{}",
        method.as_str().to_ascii_uppercase(),
        percent_encode(&uri),
        percent_encode(&params)
    ))
}

fn authorization_header(params: &[(String, String)]) -> String {
    let fields = params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {}", fields)
}

/// Generates a single-use nonce from 16 random bytes.
pub fn generate_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn generate_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Extracts one parameter from an `Authorization: OAuth ...` header value.
pub fn header_param(header: &str, name: &str) -> Option<String> {
    header
        .strip_prefix("OAuth ")?
        .split(", ")
        .filter_map(|field| field.split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| urlencoding::decode(value.trim_matches('"')).ok())
        .map(|value| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Example from the OAuth 1.0 protocol documentation.
    fn photos_credentials() -> OAuthCredentials {
        OAuthCredentials::new(
            "dpf43f3p2l4k3l03",
            "kd94hf93k423kf44",
            "nnch734d00sl2jdk",
            "pfkkdhi9sl3r4s00",
        )
    }

    fn photos_url() -> Url {
        Url::parse("http://photos.example.net/photos?file=vacation.jpg&size=original").unwrap()
    }

    #[test]
    fn test_known_base_string() {
        let creds = photos_credentials();
        let signer = OAuthSigner::new(&creds);
        let protocol = signer.protocol_params("kllo9940pd9333jh", 1191242096).unwrap();
        let base = signature_base_string(&Method::GET, &photos_url(), &[], &protocol).unwrap();

        assert_eq!(
            base,
            "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg\
             %26oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh\
             %26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096\
             %26oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal"
        );
    }

    #[test]
    fn test_known_signature() {
        let creds = photos_credentials();
        let header = OAuthSigner::new(&creds)
            .sign_with(&Method::GET, &photos_url(), &[], "kllo9940pd9333jh", 1191242096)
            .unwrap();

        assert_eq!(
            header_param(&header, "oauth_signature").as_deref(),
            Some("tR3+Ty81lMeYAr/Fid0kMTYa/WM=")
        );
        assert!(header.contains("oauth_signature=\"tR3%2BTy81lMeYAr%2FFid0kMTYa%2FWM%3D\""));
    }

    #[test]
    fn test_form_params_are_signed() {
        let creds = photos_credentials();
        let signer = OAuthSigner::new(&creds);
        let url = Url::parse("https://api.bitbucket.org/1.0/groups/alice/").unwrap();
        let form = vec![("name".to_string(), "test group".to_string())];

        let with_form = signer.sign_with(&Method::POST, &url, &form, "n", 1).unwrap();
        let without = signer.sign_with(&Method::POST, &url, &[], "n", 1).unwrap();
        assert_ne!(
            header_param(&with_form, "oauth_signature"),
            header_param(&without, "oauth_signature")
        );

        let protocol = signer.protocol_params("n", 1).unwrap();
        let base = signature_base_string(&Method::POST, &url, &form, &protocol).unwrap();
        assert!(base.contains("name%3Dtest%2520group"));
    }

    #[test]
    fn test_base_uri_normalization() {
        let url = Url::parse("HTTPS://API.Bitbucket.org:443/1.0/user?x=1#frag").unwrap();
        assert_eq!(base_string_uri(&url).unwrap(), "https://api.bitbucket.org/1.0/user");

        let url = Url::parse("http://localhost:8080/1.0/user").unwrap();
        assert_eq!(base_string_uri(&url).unwrap(), "http://localhost:8080/1.0/user");
    }

    #[test]
    fn test_fresh_nonce_per_signature() {
        let creds = photos_credentials();
        let signer = OAuthSigner::new(&creds);
        let url = Url::parse("https://api.bitbucket.org/1.0/user").unwrap();

        let first = signer.sign(&Method::GET, &url, &[]).unwrap();
        let second = signer.sign(&Method::GET, &url, &[]).unwrap();
        assert_ne!(
            header_param(&first, "oauth_nonce"),
            header_param(&second, "oauth_nonce")
        );
    }

    #[test]
    fn test_empty_token_is_omitted() {
        let creds = OAuthCredentials::new("key", "secret", "", "");
        let url = Url::parse("https://api.bitbucket.org/1.0/user").unwrap();
        let header = OAuthSigner::new(&creds).sign(&Method::GET, &url, &[]).unwrap();
        assert!(header_param(&header, "oauth_token").is_none());
        assert_eq!(header_param(&header, "oauth_consumer_key").as_deref(), Some("key"));
    }

    #[test]
    fn test_empty_consumer_key_fails() {
        let creds = OAuthCredentials::new("", "secret", "token", "token-secret");
        let url = Url::parse("https://api.bitbucket.org/1.0/user").unwrap();
        let err = OAuthSigner::new(&creds).sign(&Method::GET, &url, &[]).unwrap_err();
        assert_eq!(err.kind(), crate::api::ErrorKind::SigningFailure);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", photos_credentials());
        assert!(!debug.contains("kd94hf93k423kf44"));
        assert!(!debug.contains("pfkkdhi9sl3r4s00"));
        assert!(debug.contains("dpf43f3p2l4k3l03"));
    }
}
