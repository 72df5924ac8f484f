//
//  bitbucket-legacy
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Client Configuration
//!
//! Settings that shape how the client talks to the API: where it points,
//! how it identifies itself, how long it waits, and how strictly it reads
//! status codes.
//!
//! ## Configuration File Location
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/bb1/config.toml` |
//! | macOS | `~/Library/Application Support/bb1/config.toml` |
//! | Windows | `%APPDATA%\bb1\config.toml` |
//!
//! ## File Format
//!
//! ```toml
//! base_url = "https://api.bitbucket.org/1.0"
//! user_agent = "bb1/0.1.0"
//! timeout_secs = 30
//! status_policy = "strict"
//! ```
//!
//! Every key is optional. A missing file means defaults.
//!
//! ## Environment Overrides
//!
//! - `BB_API_URL` replaces `base_url`
//! - `BB_TIMEOUT_SECS` replaces `timeout_secs`

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::response::StatusPolicy;

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "BB_API_URL";

/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "BB_TIMEOUT_SECS";

/// Settings for a [`BitbucketClient`](crate::api::BitbucketClient).
///
/// # Example
///
/// ```rust
/// use bitbucket_legacy::config::ClientConfig;
///
/// let config: ClientConfig = toml::from_str("timeout_secs = 10")?;
/// assert_eq!(config.base_url, "https://api.bitbucket.org/1.0");
/// assert_eq!(config.timeout(), Some(std::time::Duration::from_secs(10)));
/// # Ok::<(), toml::de::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API base URL; request paths are appended to it.
    pub base_url: String,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,

    /// Overall request timeout. `None` keeps the transport default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Handling of non-success statuses other than 400/401/403/404.
    pub status_policy: StatusPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: crate::API_BASE_URL.to_string(),
            user_agent: crate::api::transport::user_agent(),
            timeout_secs: None,
            status_policy: StatusPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Loads the configuration from the default location and applies
    /// environment overrides.
    ///
    /// A missing file is not an error.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Loads the configuration from a specific file, without environment
    /// overrides. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Writes the configuration as pretty TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the platform-specific path of `config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "bb1")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Applies `BB_API_URL` and `BB_TIMEOUT_SECS` from a variable lookup.
    ///
    /// Unparseable timeouts are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.timeout_secs = Some(secs),
                Err(_) => tracing::warn!("Ignoring {}={:?}: not a number", ENV_TIMEOUT_SECS, raw),
            }
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
