//
//  gerrit-rest
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Settings for the REST client and the `gerrit-rest` command-line tool,
//! stored as TOML in a platform-specific directory:
//!
//! - **Linux**: `~/.config/gerrit-rest/config.toml`
//! - **macOS**: `~/Library/Application Support/gerrit-rest/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\gerrit-rest\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! default_host = "review.example.org"
//!
//! [client]
//! timeout_ms = 60000
//! follow_redirects = true
//!
//! [hosts."review.example.org"]
//! host = "https://review.example.org"
//! login = "jdoe"
//! http_password = true
//! ```
//!
//! Passwords are never written here; see [`KeyringStore`](crate::auth::KeyringStore).
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations
//! - [`hosts`]: Host URL normalization

mod file;
mod hosts;

pub use file::*;
pub use hosts::*;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Default timeout applied to connecting, reading and the whole request.
pub const DEFAULT_TIMEOUT_MS: u64 = 300_000;

/// Transport settings for a [`GerritRestClient`](crate::api::GerritRestClient).
///
/// # Examples
///
/// ```rust
/// use gerrit_rest::config::ClientConfig;
///
/// let config = ClientConfig::default();
/// assert_eq!(config.timeout_ms, 300_000);
/// assert!(config.follow_redirects);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Timeout in milliseconds for connect, read and the request as a whole.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Follow redirects. The `/login/` POST answers with a redirect whose
    /// target sets the token cookie, so turning this off breaks token
    /// login on most Gerrit versions.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Agent the `gerrit-rest-java-client/<version> using ...` User-Agent
    /// is built around. Defaults to `reqwest`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_follow_redirects() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            follow_redirects: default_follow_redirects(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// The configured timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// A Gerrit server the command-line tool knows about.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HostConfig {
    /// Base URL, e.g. `https://review.example.org`.
    #[serde(default)]
    pub host: String,

    /// Account user name.
    #[serde(default)]
    pub login: Option<String>,

    /// Whether the stored password is an HTTP password token.
    #[serde(default)]
    pub http_password: bool,
}

/// Complete configuration file contents.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Host key used when no `--host` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_host: Option<String>,

    /// Transport settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Known hosts keyed by [`host_key`].
    #[serde(default)]
    pub hosts: HashMap<String, HostConfig>,
}

impl Config {
    /// Loads the configuration from the default location, or returns the
    /// defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`, or returns the defaults when the
    /// file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Location of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Looks up a host by URL or bare host name.
    pub fn host_config(&self, host: &str) -> Option<&HostConfig> {
        self.hosts.get(&host_key(host))
    }

    /// The host configured as default, or the only host if there is one.
    pub fn default_host_config(&self) -> Option<&HostConfig> {
        match &self.default_host {
            Some(host) => self.host_config(host),
            None if self.hosts.len() == 1 => self.hosts.values().next(),
            None => None,
        }
    }

    /// Adds or replaces a host entry.
    pub fn insert_host(&mut self, host: HostConfig) {
        self.hosts.insert(host_key(&host.host), host);
    }

    /// Removes a host entry, clearing `default_host` if it pointed there.
    pub fn remove_host(&mut self, host: &str) -> Option<HostConfig> {
        let key = host_key(host);
        if self.default_host.as_deref().map(host_key) == Some(key.clone()) {
            self.default_host = None;
        }
        self.hosts.remove(&key)
    }
}
