//
//  bitbucket-legacy
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Sends an arbitrary request through the same pipeline as the typed
//! commands, so credentials, signing and status mapping all apply. Useful for
//! 1.0 endpoints that have no dedicated command.
//!
//! ## Examples
//!
//! ```bash
//! # Fetch a user
//! bb1 api /users/alice
//!
//! # Look up a group with a query parameter
//! bb1 api /groups -q group=alice/developers
//!
//! # Create a group with a form body
//! bb1 api -X POST /groups/alice/ -F name=Developers
//!
//! # Send a JSON body from a file (- for stdin)
//! bb1 api -X PUT /some/endpoint --input body.json
//! ```

use std::fs;
use std::io::Read;

use anyhow::{bail, Result};
use clap::Args;
use reqwest::Method;
use serde_json::Value;

use crate::api::request::{Body, RequestSpec};

use super::{parse_pair, GlobalOptions};

/// Make direct API requests
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// API path relative to the base URL (e.g., /users/alice)
    pub endpoint: String,

    /// HTTP method (GET, POST, PUT, DELETE)
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Query parameters as key=value (can be specified multiple times)
    #[arg(long, short = 'q', action = clap::ArgAction::Append)]
    pub query: Vec<String>,

    /// Form fields as key=value (can be specified multiple times)
    #[arg(long, short = 'F', action = clap::ArgAction::Append, conflicts_with = "input")]
    pub field: Vec<String>,

    /// Read a JSON request body from file (- for stdin)
    #[arg(long, short = 'f')]
    pub input: Option<String>,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let spec = self.build_spec()?;
        let client = global.client()?;

        let response = client.send(spec).await?;

        if response.body.is_empty() {
            return Ok(());
        }
        match serde_json::from_slice::<Value>(&response.body) {
            Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Err(_) => print!("{}", response.text()),
        }

        Ok(())
    }

    fn parse_method(&self) -> Result<Method> {
        match self.method.to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            _ => bail!("Unsupported HTTP method: {}", self.method),
        }
    }

    fn build_body(&self) -> Result<Body> {
        if let Some(input) = &self.input {
            let content = if input == "-" {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else {
                fs::read_to_string(input)?
            };

            let value: Value = serde_json::from_str(&content)?;
            return Ok(Body::Json(value));
        }

        if self.field.is_empty() {
            return Ok(Body::Empty);
        }

        let pairs = self
            .field
            .iter()
            .map(|field| parse_pair(field))
            .collect::<Result<Vec<_>>>()?;
        Ok(Body::Form(pairs))
    }

    fn build_spec(&self) -> Result<RequestSpec> {
        let mut spec = RequestSpec::new(self.parse_method()?, self.endpoint.clone())
            .body(self.build_body()?);
        for item in &self.query {
            let (key, value) = parse_pair(item)?;
            spec = spec.query(key, value);
        }
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn command(args: &[&str]) -> ApiCommand {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            api: ApiCommand,
        }

        let mut argv = vec!["api"];
        argv.extend_from_slice(args);
        Wrapper::try_parse_from(argv).unwrap().api
    }

    #[test]
    fn test_form_fields_keep_order() {
        let spec = command(&["-X", "post", "/groups/alice/", "-F", "name=Devs", "-F", "a=1"])
            .build_spec()
            .unwrap();

        assert_eq!(spec.method, Method::POST);
        assert_eq!(
            spec.body,
            Body::Form(vec![
                ("name".to_string(), "Devs".to_string()),
                ("a".to_string(), "1".to_string()),
            ])
        );
    }

    #[test]
    fn test_query_and_empty_body() {
        let spec = command(&["/groups", "-q", "group=alice/devs"]).build_spec().unwrap();
        assert_eq!(spec.method, Method::GET);
        assert_eq!(spec.query, vec![("group".to_string(), "alice/devs".to_string())]);
        assert_eq!(spec.body, Body::Empty);
    }

    #[test]
    fn test_json_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "Devs"}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let spec = command(&["-X", "PUT", "/x", "--input", &path]).build_spec().unwrap();
        assert_eq!(spec.body, Body::Json(serde_json::json!({"name": "Devs"})));
    }

    #[test]
    fn test_unsupported_method() {
        assert!(command(&["-X", "TRACE", "/x"]).build_spec().is_err());
    }
}
