//
//  gerrit-rest
//  auth/login_cache.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Login Cache
//!
//! Session state owned by one [`GerritRestClient`](crate::api::GerritRestClient):
//!
//! - the last `X-Gerrit-Auth` token obtained from `/login/`
//! - whether the host supports the token login flow at all
//! - whether the host redirected `/login/` to GitHub OAuth
//! - the cookie jar shared by every request of the client
//!
//! Every read and write takes the credentials currently in effect. If they
//! differ from the ones the state was built for, the state is reset before
//! the operation runs, so a token obtained for one account or host never
//! leaks into requests made for another. The check and the operation happen
//! under a single lock acquisition.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reqwest::cookie::Jar;
use sha2::{Digest, Sha256};

use super::Credentials;

type Fingerprint = [u8; 32];

#[derive(Debug)]
struct SessionState {
    auth_token: Option<String>,
    host_supports_token_login: bool,
    oauth_detected: bool,
    cookie_jar: Arc<Jar>,
    fingerprint: Option<Fingerprint>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            auth_token: None,
            host_supports_token_login: true,
            oauth_detected: false,
            cookie_jar: Arc::new(Jar::default()),
            fingerprint: None,
        }
    }
}

/// A consistent copy of the session state taken under one lock.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Cached auth token, if a previous login produced one.
    pub auth_token: Option<String>,
    /// `false` once a login attempt on this host produced no token.
    pub host_supports_token_login: bool,
    /// `true` once `/login/` was seen redirecting to GitHub OAuth.
    pub oauth_detected: bool,
    /// Cookie jar used by every request of the owning client.
    pub cookie_jar: Arc<Jar>,
}

/// Per-client session cache.
///
/// # Example
///
/// ```rust
/// use gerrit_rest::auth::{Credentials, LoginCache};
///
/// let cache = LoginCache::new();
/// let alice = Credentials::basic("https://review.example.org", "alice", "pw");
/// let bob = Credentials::basic("https://review.example.org", "bob", "pw");
///
/// cache.set_auth_token(&alice, Some("token".to_string()));
/// assert_eq!(cache.auth_token(&alice).as_deref(), Some("token"));
///
/// // Different credentials reset the session.
/// assert_eq!(cache.auth_token(&bob), None);
/// assert!(cache.host_supports_token_login(&bob));
/// ```
#[derive(Debug, Default)]
pub struct LoginCache {
    state: Mutex<SessionState>,
}

impl LoginCache {
    /// Creates an empty cache that assumes the token login flow works.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached auth token for `credentials`.
    pub fn auth_token(&self, credentials: &Credentials) -> Option<String> {
        self.checked(credentials).auth_token.clone()
    }

    /// Returns whether the host is still believed to support token login.
    pub fn host_supports_token_login(&self, credentials: &Credentials) -> bool {
        self.checked(credentials).host_supports_token_login
    }

    /// Returns whether GitHub OAuth was detected on the host.
    pub fn oauth_detected(&self, credentials: &Credentials) -> bool {
        self.checked(credentials).oauth_detected
    }

    /// Returns the cookie jar for requests made with `credentials`.
    pub fn cookie_jar(&self, credentials: &Credentials) -> Arc<Jar> {
        Arc::clone(&self.checked(credentials).cookie_jar)
    }

    /// Returns all session fields at once.
    pub fn snapshot(&self, credentials: &Credentials) -> SessionSnapshot {
        let state = self.checked(credentials);
        SessionSnapshot {
            auth_token: state.auth_token.clone(),
            host_supports_token_login: state.host_supports_token_login,
            oauth_detected: state.oauth_detected,
            cookie_jar: Arc::clone(&state.cookie_jar),
        }
    }

    /// Stores the outcome of a login attempt.
    ///
    /// A missing token marks the host as not supporting token login until
    /// the cache is invalidated.
    pub fn set_auth_token(&self, credentials: &Credentials, token: Option<String>) {
        let mut state = self.checked(credentials);
        state.host_supports_token_login = token.is_some();
        state.auth_token = token;
    }

    /// Records that `/login/` redirects to GitHub OAuth on this host.
    pub fn mark_oauth_detected(&self, credentials: &Credentials) {
        self.checked(credentials).oauth_detected = true;
    }

    /// Drops the token, cookies and fingerprint memo.
    pub fn invalidate(&self) {
        *self.lock() = SessionState::default();
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn checked(&self, credentials: &Credentials) -> MutexGuard<'_, SessionState> {
        let fingerprint = fingerprint(credentials);
        let mut state = self.lock();
        if state.fingerprint != Some(fingerprint) {
            if state.fingerprint.is_some() {
                tracing::debug!(host = %credentials.host, "credentials changed, resetting session");
            }
            *state = SessionState::default();
            state.fingerprint = Some(fingerprint);
        }
        state
    }
}

/// Digest over `(host, login, password)`.
///
/// Fields are length-prefixed so that `("ab", "c")` and `("a", "bc")` differ.
/// The HTTP password flag is deliberately not part of it.
fn fingerprint(credentials: &Credentials) -> Fingerprint {
    let mut hasher = Sha256::new();
    for field in [
        Some(credentials.host.as_str()),
        credentials.login.as_deref(),
        credentials.password.as_deref(),
    ] {
        match field {
            Some(value) => {
                hasher.update([1u8]);
                hasher.update((value.len() as u64).to_be_bytes());
                hasher.update(value.as_bytes());
            }
            None => hasher.update([0u8]),
        }
    }
    hasher.finalize().into()
}
