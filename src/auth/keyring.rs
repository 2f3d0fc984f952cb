//
//  gerrit-rest
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Keyring Credential Storage
//!
//! Passwords and HTTP password tokens are kept in the system keyring
//! (Keychain on macOS, Secret Service on Linux, Credential Manager on
//! Windows), never in the configuration file.
//!
//! Entries are keyed by `login@host`, so several accounts on the same
//! Gerrit server can coexist.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gerrit_rest::auth::KeyringStore;
//!
//! fn remember() -> anyhow::Result<()> {
//!     let store = KeyringStore::new();
//!     store.store("https://review.example.org", "jdoe", "http-password")?;
//!
//!     if let Some(password) = store.get("https://review.example.org", "jdoe")? {
//!         println!("found {} characters", password.len());
//!     }
//!
//!     store.delete("https://review.example.org", "jdoe")?;
//!     Ok(())
//! }
//! ```

use anyhow::Result;
use keyring::Entry;

use super::{AuthData, Credentials};

/// The service name used to identify this application in the system keyring.
const SERVICE_NAME: &str = "gerrit-rest";

/// Password storage backed by the platform keyring.
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    /// Creates a store using the default service name.
    ///
    /// No keyring access happens until a method is called.
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Stores or replaces the password for `login` on `host`.
    pub fn store(&self, host: &str, login: &str, password: &str) -> Result<()> {
        let entry = Entry::new(&self.service, &entry_key(host, login))?;
        entry.set_password(password)?;
        Ok(())
    }

    /// Returns the stored password, or `None` if there is no entry.
    pub fn get(&self, host: &str, login: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, &entry_key(host, login))?;
        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes the stored password. Deleting a missing entry succeeds.
    pub fn delete(&self, host: &str, login: &str) -> Result<()> {
        let entry = Entry::new(&self.service, &entry_key(host, login))?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Builds a credential source that reads the keyring on every request.
///
/// A password changed by `gerrit-rest auth login` in another process is
/// picked up by the next request, and the client's session resets because
/// the credentials changed. Keyring failures degrade to anonymous access
/// for `login`.
pub fn keyring_credentials(host: &str, login: &str, http_password: bool) -> AuthData {
    let host = host.to_string();
    let login = login.to_string();
    AuthData::dynamic(move || {
        let password = match KeyringStore::new().get(&host, &login) {
            Ok(password) => password,
            Err(e) => {
                tracing::warn!(host = %host, login = %login, "keyring lookup failed: {e}");
                None
            }
        };
        Credentials::new(host.clone(), Some(login.clone()), password, http_password)
    })
}

fn entry_key(host: &str, login: &str) -> String {
    format!("{}@{}", login, crate::config::host_key(host))
}
