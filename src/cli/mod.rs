//
//  gerrit-rest
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod auth;
mod changes;

pub use api::ApiCommand;
pub use auth::AuthCommand;
pub use changes::ChangesCommand;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::api::GerritRestClient;
use crate::auth::{keyring_credentials, AuthData, Credentials};
use crate::config::{normalize_host, Config};

/// gerrit-rest - Talk to Gerrit's REST API from the command line
#[derive(Parser, Debug)]
#[command(
    name = "gerrit-rest",
    version,
    about = "Talk to Gerrit's REST API from the command line",
    long_about = "gerrit-rest sends authenticated requests to a Gerrit Code Review server.\n\n\
                  It works with HTTP, LDAP form and cookie based logins as well as HTTP password tokens.",
    propagate_version = true,
    after_help = "Use 'gerrit-rest <command> --help' for more information about a command."
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
    /// Gerrit server URL, e.g. https://review.example.org
    #[arg(long, global = true, env = "GERRIT_HOST")]
    pub host: Option<String>,

    /// Account user name
    #[arg(long, short = 'u', global = true, env = "GERRIT_USER")]
    pub user: Option<String>,

    /// Password or HTTP password token (otherwise read from the keyring)
    #[arg(long, global = true, env = "GERRIT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// The password is an HTTP password token
    #[arg(long, global = true)]
    pub http_password: bool,

    /// Ignore stored credentials and access the server anonymously
    #[arg(long, global = true)]
    pub anonymous: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with a Gerrit server
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Make API requests
    Api(ApiCommand),

    /// Query changes
    Changes(ChangesCommand),

    /// Print version information
    Version,
}

/// Works out which credentials the global options and config ask for.
///
/// Precedence: command-line/environment, then the config file. A login
/// without an explicit password reads the keyring on every request.
pub fn resolve_auth(global: &GlobalOptions, config: &Config) -> Result<AuthData> {
    let host_config = match &global.host {
        Some(host) => config.host_config(host),
        None => config.default_host_config(),
    };

    let host = match (&global.host, host_config) {
        (Some(host), _) => normalize_host(host),
        (None, Some(host_config)) => normalize_host(&host_config.host),
        (None, None) => bail!("No Gerrit host given. Use --host, GERRIT_HOST, or 'gerrit-rest auth login'."),
    };

    if global.anonymous {
        return Ok(Credentials::anonymous(host).into());
    }

    let login = global
        .user
        .clone()
        .or_else(|| host_config.and_then(|h| h.login.clone()));
    let http_password = global.http_password || host_config.is_some_and(|h| h.http_password);

    Ok(match (login, &global.password) {
        (Some(login), Some(password)) => {
            Credentials::new(host, Some(login), Some(password.clone()), http_password).into()
        }
        (Some(login), None) => keyring_credentials(&host, &login, http_password),
        (None, _) => Credentials::anonymous(host).into(),
    })
}

/// Builds a client from the global options and the config file.
pub fn build_client(global: &GlobalOptions) -> Result<GerritRestClient> {
    let config = Config::load()?;
    let auth = resolve_auth(global, &config)?;
    Ok(GerritRestClient::new(auth, config.client.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostConfig;

    fn config_with_host() -> Config {
        let mut config = Config::default();
        config.insert_host(HostConfig {
            host: "https://review.example.org".to_string(),
            login: Some("jdoe".to_string()),
            http_password: true,
        });
        config
    }

    #[test]
    fn test_missing_host_is_an_error() {
        let err = resolve_auth(&GlobalOptions::default(), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("No Gerrit host"));
    }

    #[test]
    fn test_explicit_password_wins() {
        let global = GlobalOptions {
            host: Some("review.example.org".to_string()),
            password: Some("pw".to_string()),
            ..Default::default()
        };
        let credentials = resolve_auth(&global, &config_with_host()).unwrap().current();
        assert_eq!(credentials.host, "https://review.example.org");
        assert_eq!(credentials.login.as_deref(), Some("jdoe"));
        assert_eq!(credentials.password.as_deref(), Some("pw"));
        assert!(credentials.http_password);
    }

    #[test]
    fn test_anonymous_flag() {
        let global = GlobalOptions {
            anonymous: true,
            password: Some("pw".to_string()),
            ..Default::default()
        };
        let credentials = resolve_auth(&global, &config_with_host()).unwrap().current();
        assert!(!credentials.has_login_and_password());
        assert_eq!(credentials.host, "https://review.example.org");
    }

    #[test]
    fn test_no_login_means_anonymous() {
        let global = GlobalOptions {
            host: Some("http://localhost:8080".to_string()),
            ..Default::default()
        };
        let credentials = resolve_auth(&global, &Config::default()).unwrap().current();
        assert_eq!(credentials.login, None);
        assert_eq!(credentials.host, "http://localhost:8080");
    }
}
