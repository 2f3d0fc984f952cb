//
//  gerrit-rest
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Host URL helpers.
//!
//! Gerrit servers are addressed by base URL (`https://review.example.org`,
//! possibly with a context path such as `https://example.org/gerrit`), while
//! the configuration file and the keyring index them by a bare host key.
//!
//! ```rust
//! use gerrit_rest::config::{host_key, normalize_host};
//!
//! assert_eq!(normalize_host("review.example.org/"), "https://review.example.org");
//! assert_eq!(host_key("https://Review.Example.org/"), "review.example.org");
//! ```

/// Turns user input into a base URL: adds `https://` when no scheme is
/// given and strips the trailing slash.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host.strip_suffix('/').unwrap_or(host);
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// Bare, lowercase host (plus context path) used as a lookup key.
pub fn host_key(host: &str) -> String {
    let host = host.trim();
    let host = host.strip_prefix("https://").unwrap_or(host);
    let host = host.strip_prefix("http://").unwrap_or(host);
    let host = host.strip_suffix('/').unwrap_or(host);
    host.to_lowercase()
}
