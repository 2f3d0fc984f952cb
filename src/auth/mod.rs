//
//  gerrit-rest
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! This module holds everything the REST client needs to know about *who* is
//! talking to a Gerrit server:
//!
//! - [`Credentials`]: host, login, password and whether the password is an
//!   HTTP password token generated in Gerrit's settings
//! - [`AuthData`]: where credentials come from, either a fixed value or a
//!   closure that is asked again on every request
//! - [`LoginCache`]: the per-client session state (auth token, cookie jar,
//!   whether the host supports the token login flow)
//! - [`KeyringStore`]: password storage in the system keyring
//!
//! ## Example
//!
//! ```rust
//! use gerrit_rest::auth::{AuthData, Credentials};
//!
//! let static_auth = AuthData::from(Credentials::basic(
//!     "https://review.example.org/",
//!     "jdoe",
//!     "secret",
//! ));
//! assert_eq!(static_auth.current().host, "https://review.example.org");
//!
//! let dynamic_auth = AuthData::dynamic(|| Credentials::anonymous("https://review.example.org"));
//! assert!(!dynamic_auth.current().has_login_and_password());
//! ```

mod keyring;
mod login_cache;

pub use keyring::*;
pub use login_cache::*;

use std::fmt;
use std::sync::Arc;

/// Credentials used to talk to one Gerrit host.
///
/// The host is stored without a trailing slash so that paths can be appended
/// directly (`{host}/a/changes/`).
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Base URL of the Gerrit server, e.g. `https://review.example.org`.
    pub host: String,
    /// Account user name, if any.
    pub login: Option<String>,
    /// Account password or HTTP password token, if any.
    pub password: Option<String>,
    /// `true` when `password` is an HTTP password token rather than the
    /// account's primary password.
    ///
    /// HTTP password tokens are never sent to the interactive `/login/`
    /// endpoint.
    pub http_password: bool,
}

impl Credentials {
    /// Creates credentials, normalizing the host.
    pub fn new(
        host: impl Into<String>,
        login: Option<String>,
        password: Option<String>,
        http_password: bool,
    ) -> Self {
        Self {
            host: normalize_base_url(&host.into()),
            login,
            password,
            http_password,
        }
    }

    /// Credentials with a login and primary password.
    pub fn basic(host: impl Into<String>, login: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(host, Some(login.into()), Some(password.into()), false)
    }

    /// Credentials with a login and an HTTP password token.
    pub fn http_password(
        host: impl Into<String>,
        login: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self::new(host, Some(login.into()), Some(token.into()), true)
    }

    /// Credentials for anonymous access.
    pub fn anonymous(host: impl Into<String>) -> Self {
        Self::new(host, None, None, false)
    }

    /// Returns `true` when both a non-empty login and a password are set.
    pub fn has_login_and_password(&self) -> bool {
        matches!(
            (&self.login, &self.password),
            (Some(login), Some(_)) if !login.is_empty()
        )
    }
}

// Passwords must not end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("http_password", &self.http_password)
            .finish()
    }
}

/// Source of [`Credentials`] for a client.
///
/// `Dynamic` sources are consulted again on every request, so a client
/// built from live settings (a keyring entry, an editable preferences
/// screen) always uses what is current.
#[derive(Clone)]
pub enum AuthData {
    /// Credentials fixed at construction time.
    Static(Credentials),
    /// Credentials produced on demand.
    Dynamic(Arc<dyn Fn() -> Credentials + Send + Sync>),
}

impl AuthData {
    /// Wraps a closure as a dynamic credential source.
    pub fn dynamic<F>(provider: F) -> Self
    where
        F: Fn() -> Credentials + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(provider))
    }

    /// Returns the credentials to use right now.
    pub fn current(&self) -> Credentials {
        match self {
            Self::Static(credentials) => credentials.clone(),
            Self::Dynamic(provider) => {
                let mut credentials = provider();
                credentials.host = normalize_base_url(&credentials.host);
                credentials
            }
        }
    }
}

impl From<Credentials> for AuthData {
    fn from(credentials: Credentials) -> Self {
        Self::Static(credentials)
    }
}

impl fmt::Debug for AuthData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(credentials) => f.debug_tuple("Static").field(credentials).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Strips a single trailing slash from a base URL.
pub fn normalize_base_url(host: &str) -> String {
    host.strip_suffix('/').unwrap_or(host).to_string()
}
