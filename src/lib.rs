//
//  gerrit-rest
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Gerrit REST Library
//!
//! A typed client for the Gerrit Code Review REST API, plus the
//! `gerrit-rest` command-line tool built on it.
//!
//! ## Overview
//!
//! Gerrit servers authenticate in several ways: HTTP Basic, cookie based
//! "GerritAuth" login, LDAP login forms, or GitHub OAuth. Which one a server
//! uses is not known up front. [`GerritRestClient`] probes the server, keeps
//! an auth token and cookie jar per client, reuses them while they are
//! valid, and falls back to Basic auth on the `/a` REST namespace when no
//! token can be obtained.
//!
//! ## Module Structure
//!
//! - [`api`]: the authenticating client, response classification, resource endpoints
//! - [`auth`]: credentials, credential sources, session cache, keyring storage
//! - [`config`]: client and CLI configuration
//! - [`cli`]: command-line interface definitions using clap
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gerrit_rest::api::GerritRestClient;
//! use gerrit_rest::auth::Credentials;
//!
//! # async fn example() -> gerrit_rest::api::Result<()> {
//! let client = GerritRestClient::with_defaults(Credentials::basic(
//!     "https://review.example.org",
//!     "jdoe",
//!     "secret",
//! ));
//!
//! let me = client.accounts().self_account().await?;
//! println!("Logged in as {}", me.display_name());
//!
//! for change in client.changes().query("status:open owner:self", Some(10)).await? {
//!     println!("{} {}", change.number, change.subject);
//! }
//! # Ok(())
//! # }
//! ```

/// Gerrit REST API client.
///
/// Request execution with automatic login, session reuse and a single
/// retry when a session expires, plus typed endpoints for accounts,
/// changes and projects.
pub mod api;

/// Credentials and session state.
pub mod auth;

/// Configuration file management.
///
/// - Linux: `~/.config/gerrit-rest/config.toml`
/// - macOS: `~/Library/Application Support/gerrit-rest/config.toml`
/// - Windows: `%APPDATA%\gerrit-rest\config.toml`
pub mod config;

/// Command-line interface definitions.
pub mod cli;

pub use api::{GerritRestClient, RestError};
pub use auth::{AuthData, Credentials};
pub use cli::Cli;
pub use config::{ClientConfig, Config};

/// Application name, used for the binary, config directory and keyring service.
pub const APP_NAME: &str = "gerrit-rest";

/// Application version, taken from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: Server-side issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Authentication required or failed (401, 403).
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found (404).
    pub const NOT_FOUND: i32 = 8;

    /// The server failed (5xx).
    pub const SERVER_ERROR: i32 = 32;

    /// Picks the exit code for an error returned by a command.
    pub fn for_error(error: &anyhow::Error) -> i32 {
        let rest_error = error
            .chain()
            .find_map(|cause| cause.downcast_ref::<crate::RestError>());
        match rest_error {
            Some(crate::RestError::UnsupportedVerb(_)) => USAGE,
            Some(e) if e.is_auth_failure() => AUTH_ERROR,
            Some(e) if e.is_not_found() => NOT_FOUND,
            Some(crate::RestError::ServerError { .. }) => SERVER_ERROR,
            _ => ERROR,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use anyhow::Context;
        use reqwest::StatusCode;

        fn status_error(status: StatusCode) -> anyhow::Error {
            let result: Result<(), crate::RestError> =
                Err(crate::RestError::from_status(status, "").unwrap());
            result.context("Could not log in").unwrap_err()
        }

        #[test]
        fn test_exit_code_mapping() {
            assert_eq!(for_error(&status_error(StatusCode::UNAUTHORIZED)), AUTH_ERROR);
            assert_eq!(for_error(&status_error(StatusCode::FORBIDDEN)), AUTH_ERROR);
            assert_eq!(for_error(&status_error(StatusCode::NOT_FOUND)), NOT_FOUND);
            assert_eq!(for_error(&status_error(StatusCode::BAD_GATEWAY)), SERVER_ERROR);
            assert_eq!(for_error(&anyhow::anyhow!("boom")), ERROR);
            assert_eq!(
                for_error(&crate::RestError::UnsupportedVerb("PATCH".into()).into()),
                USAGE
            );
        }
    }
}
