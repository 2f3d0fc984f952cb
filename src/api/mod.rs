//
//  gerrit-rest
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Gerrit REST API Client
//!
//! ## Module Organization
//!
//! - [`client`]: [`GerritRestClient`], the authenticating request executor
//! - `login`: token login and session reuse used by the client
//! - [`request`]: verbs, request descriptors and raw responses
//! - [`response`]: classification of responses into JSON or errors
//! - [`json`]: anti-XSSI prefix and timestamp conventions
//! - [`error`]: [`RestError`]
//! - [`accounts`], [`changes`], [`projects`]: typed resource endpoints
//!
//! ## Wire Conventions
//!
//! - Requests with Basic credentials go to `<host>/a/<path>`; requests with
//!   an auth token go to `<host>/<path>` with an `X-Gerrit-Auth` header.
//! - Every request sends `Accept: application/json`.
//! - The User-Agent is `gerrit-rest-java-client/<version> using <agent>`.

pub mod accounts;
pub mod changes;
pub mod client;
pub mod error;
pub mod json;
mod login;
pub mod projects;
pub mod request;
pub mod response;

pub use accounts::{AccountInfo, AccountsApi};
pub use changes::{ChangeInfo, ChangeStatus, ChangesApi};
pub use client::GerritRestClient;
pub use error::{RestError, Result};
pub use login::{extract_gerrit_auth, GERRIT_ACCOUNT_COOKIE, XSRF_TOKEN_COOKIE};
pub use projects::{ProjectInfo, ProjectsApi, ServerApi};
pub use request::{HttpVerb, RawResponse, RequestDescriptor};
pub use response::{classify, classify_response};

impl GerritRestClient {
    /// Account endpoints.
    pub fn accounts(&self) -> AccountsApi<'_> {
        AccountsApi::new(self)
    }

    /// Change endpoints.
    pub fn changes(&self) -> ChangesApi<'_> {
        ChangesApi::new(self)
    }

    /// Project endpoints.
    pub fn projects(&self) -> ProjectsApi<'_> {
        ProjectsApi::new(self)
    }

    /// Server endpoints.
    pub fn server(&self) -> ServerApi<'_> {
        ServerApi::new(self)
    }
}

/// Percent-encodes an id for use as one path segment (`/` becomes `%2F`).
///
/// `~` stays as is so `project~branch~Change-Id` ids go out unchanged.
pub(crate) fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace("%7E", "~")
}

/// Encodes a query parameter value.
pub(crate) fn encode_query(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("tools/gerrit"), "tools%2Fgerrit");
        assert_eq!(encode_segment("12345"), "12345");
        assert_eq!(encode_segment("a b"), "a%20b");
        assert_eq!(encode_segment("p~b~I1"), "p~b~I1");
        assert_eq!(encode_segment("tools/gerrit~master~I1"), "tools%2Fgerrit~master~I1");
    }

    #[test]
    fn test_encode_query() {
        assert_eq!(encode_query("status:open owner:self"), "status%3Aopen+owner%3Aself");
    }
}
