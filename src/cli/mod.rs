//
//  bitbucket-legacy
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod group;
mod repo;
mod user;

pub use api::ApiCommand;
pub use group::GroupCommand;
pub use repo::RepoCommand;
pub use user::UserCommand;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::api::response::StatusPolicy;
use crate::api::BitbucketClient;
use crate::auth::Credentials;
use crate::config::ClientConfig;

/// bb1 - Work with the legacy Bitbucket 1.0 API from the command line
#[derive(Parser, Debug)]
#[command(
    name = "bb1",
    version,
    about = "Work with the legacy Bitbucket 1.0 API from the command line",
    long_about = "bb1 talks to the Bitbucket 1.0 REST API.\n\n\
                  Credentials come from BB_USER/BB_PASSWORD (Basic) or \
                  BB_CONSUMER_KEY/BB_CONSUMER_SECRET/BB_ACCESS_TOKEN/BB_TOKEN_SECRET (OAuth 1.0a).\n\
                  Without either, requests are sent anonymously.",
    propagate_version = true,
    after_help = "Use 'bb1 <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override the API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Treat any unexpected status code as an error
    #[arg(long, global = true)]
    pub strict: bool,

    /// Ignore credentials in the environment
    #[arg(long, global = true)]
    pub anonymous: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage account groups
    #[command(visible_alias = "g")]
    Group(GroupCommand),

    /// Show user accounts
    User(UserCommand),

    /// Show repositories
    #[command(visible_alias = "r")]
    Repo(RepoCommand),

    /// Make API requests
    Api(ApiCommand),
}

impl GlobalOptions {
    /// Resolves configuration, applying command-line overrides on top of the
    /// file and environment.
    pub fn config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::load()?;
        if let Some(url) = &self.api_url {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if self.strict {
            config.status_policy = StatusPolicy::Strict;
        }
        Ok(config)
    }

    pub fn credentials(&self) -> Credentials {
        if self.anonymous {
            Credentials::Anonymous
        } else {
            Credentials::from_env()
        }
    }

    /// Builds the API client for a command.
    pub fn client(&self) -> Result<BitbucketClient> {
        let config = self.config()?;
        let credentials = self.credentials();
        tracing::debug!("Using {} credentials against {}", credentials.scheme(), config.base_url);
        Ok(BitbucketClient::from_config(&config, credentials)?)
    }
}

/// Splits `OWNER/SLUG` into its two halves.
pub(crate) fn parse_owner_slug(value: &str) -> Result<(&str, &str)> {
    match value.split_once('/') {
        Some((owner, slug)) if !owner.is_empty() && !slug.is_empty() && !slug.contains('/') => {
            Ok((owner, slug))
        }
        _ => bail!("Expected OWNER/SLUG, got '{}'", value),
    }
}

/// Splits a `key=value` argument.
pub(crate) fn parse_pair(value: &str) -> Result<(String, String)> {
    match value.split_once('=') {
        Some((key, val)) if !key.is_empty() => Ok((key.to_string(), val.to_string())),
        _ => bail!("Expected key=value, got '{}'", value),
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
