//
//  gerrit-rest
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authenticating HTTP Client for the Gerrit REST API
//!
//! [`GerritRestClient`] executes REST calls on behalf of the resource
//! clients. For every call it:
//!
//! 1. reads the current credentials from its [`AuthData`]
//! 2. builds a transport sharing the session's cookie jar
//! 3. decides between anonymous access, Basic auth and an `X-Gerrit-Auth`
//!    token (see the `login` module)
//! 4. sends the request to `<host>/a/<path>` (Basic auth) or
//!    `<host>/<path>` (token or anonymous)
//! 5. on `403 Forbidden` with a token in play, drops the session and runs
//!    the whole request once more
//! 6. classifies the response
//!
//! The login sub-requests and the retry run one after another inside the
//! awaited call; nothing is spawned.
//!
//! ## Concurrency
//!
//! The session cache is locked for each read-check-write step, so sharing a
//! client between tasks is memory safe. Two tasks that log in at the same
//! time may still both hit `/login/`; the last token written wins.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{redirect, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::{RestError, Result};
use super::request::{HttpVerb, RawResponse, RequestDescriptor};
use super::response::classify_response;
use crate::auth::{AuthData, Credentials, LoginCache};
use crate::config::ClientConfig;

/// Header carrying the auth token obtained from `/login/`.
pub const GERRIT_AUTH_HEADER: &str = "X-Gerrit-Auth";

/// Product token put in front of the User-Agent.
pub const USER_AGENT_PRODUCT: &str = "gerrit-rest-java-client";

/// Agent named after "using" when the configuration gives none.
const DEFAULT_AGENT: &str = "reqwest";

/// Maximum number of redirects followed per request.
const MAX_REDIRECTS: usize = 10;

/// The main HTTP client for the Gerrit REST API.
///
/// One instance owns one session (token, cookies). Create one client per
/// Gerrit account you talk to.
///
/// # Example
///
/// ```rust,no_run
/// use gerrit_rest::api::GerritRestClient;
/// use gerrit_rest::auth::Credentials;
/// use gerrit_rest::config::ClientConfig;
///
/// # async fn example() -> gerrit_rest::api::Result<()> {
/// let client = GerritRestClient::new(
///     Credentials::http_password("https://review.example.org", "jdoe", "token"),
///     ClientConfig::default(),
/// );
/// let changes = client.get("/changes/?q=status:open&n=5").await?;
/// println!("{}", changes.unwrap_or_default());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GerritRestClient {
    pub(super) auth: AuthData,
    pub(super) config: ClientConfig,
    pub(super) login_cache: LoginCache,
}

impl GerritRestClient {
    /// Creates a client with its own, empty session.
    pub fn new(auth: impl Into<AuthData>, config: ClientConfig) -> Self {
        Self {
            auth: auth.into(),
            config,
            login_cache: LoginCache::new(),
        }
    }

    /// Creates a client with [`ClientConfig::default`].
    pub fn with_defaults(auth: impl Into<AuthData>) -> Self {
        Self::new(auth, ClientConfig::default())
    }

    /// The credentials currently in effect.
    pub fn credentials(&self) -> Credentials {
        self.auth.current()
    }

    /// The session cache of this client.
    pub fn login_cache(&self) -> &LoginCache {
        &self.login_cache
    }

    /// Drops the cached token and cookies; the next call logs in again.
    pub fn invalidate_session(&self) {
        self.login_cache.invalidate();
    }

    /// `GET` returning the parsed JSON, or `None` for an empty response.
    pub async fn get(&self, path: &str) -> Result<Option<Value>> {
        self.request(RequestDescriptor::new(HttpVerb::Get, path)).await
    }

    /// `POST` with an optional JSON body.
    pub async fn post(&self, path: &str, body: Option<&str>) -> Result<Option<Value>> {
        self.request(RequestDescriptor::new(HttpVerb::Post, path).with_optional_body(body))
            .await
    }

    /// `PUT` with an optional JSON body.
    pub async fn put(&self, path: &str, body: Option<&str>) -> Result<Option<Value>> {
        self.request(RequestDescriptor::new(HttpVerb::Put, path).with_optional_body(body))
            .await
    }

    /// `DELETE`.
    pub async fn delete(&self, path: &str) -> Result<Option<Value>> {
        self.request(RequestDescriptor::new(HttpVerb::Delete, path)).await
    }

    /// `POST` with a `text/plain` body.
    pub async fn post_text(&self, path: &str, body: &str) -> Result<Option<Value>> {
        self.request(RequestDescriptor::new(HttpVerb::PostText, path).with_body(body))
            .await
    }

    /// `PUT` with a `text/plain` body.
    pub async fn put_text(&self, path: &str, body: &str) -> Result<Option<Value>> {
        self.request(RequestDescriptor::new(HttpVerb::PutText, path).with_body(body))
            .await
    }

    /// `GET` deserialized into `T`.
    pub async fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        into_typed(self.get(path).await?)
    }

    /// `POST` of a serializable body, deserializing the answer into `T`.
    pub async fn post_as<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_string(body)?;
        into_typed(self.post(path, Some(&body)).await?)
    }

    /// `PUT` of a serializable body, deserializing the answer into `T`.
    pub async fn put_as<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_string(body)?;
        into_typed(self.put(path, Some(&body)).await?)
    }

    /// Executes a request and classifies the response as JSON.
    pub async fn request(&self, request: RequestDescriptor) -> Result<Option<Value>> {
        let response = self.execute(&request).await?;
        classify_response(&response)
    }

    /// Executes a request and returns the raw response.
    ///
    /// 4xx and 5xx answers are returned as errors; the body is not
    /// interpreted otherwise.
    pub async fn raw_request(&self, request: RequestDescriptor) -> Result<RawResponse> {
        self.execute(&request).await?.error_for_status()
    }

    /// Runs a request, retrying once after `403` if a token was used.
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse> {
        let (response, used_token) = self.execute_once(request).await?;
        if response.status == StatusCode::FORBIDDEN && used_token {
            tracing::debug!(path = %request.path, "403 with auth token, session expired; logging in again");
            self.login_cache.invalidate();
            let (response, _) = self.execute_once(request).await?;
            return Ok(response);
        }
        Ok(response)
    }

    async fn execute_once(&self, request: &RequestDescriptor) -> Result<(RawResponse, bool)> {
        let credentials = self.auth.current();
        let http = self.build_http_client(self.login_cache.cookie_jar(&credentials))?;
        let token = self.resolve_auth_token(&http, &credentials).await?;

        let url = rest_url(&credentials, token.is_some(), &request.path);
        tracing::debug!(verb = %request.verb, url = %url, token = token.is_some(), "sending request");

        let mut builder = http
            .request(request.verb.method(), &url)
            .header(ACCEPT, "application/json");

        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, request.verb.content_type())
                .body(body.clone());
        }

        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| RestError::InvalidRequest(format!("header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| RestError::InvalidRequest(format!("header value for '{}': {}", name, e)))?;
            builder = builder.header(name, value);
        }

        builder = match (&token, &credentials.login, &credentials.password) {
            (Some(token), _, _) => builder.header(GERRIT_AUTH_HEADER, token),
            (None, Some(login), Some(password)) if credentials.has_login_and_password() => {
                builder.basic_auth(login, Some(password))
            }
            _ => builder,
        };

        let response = RawResponse::read(builder.send().await?).await?;
        Ok((response, token.is_some()))
    }

    /// Builds the transport for one logical request.
    pub(super) fn build_http_client(&self, cookie_jar: Arc<Jar>) -> Result<Client> {
        let redirect_policy = if self.config.follow_redirects {
            redirect::Policy::limited(MAX_REDIRECTS)
        } else {
            redirect::Policy::none()
        };

        Ok(Client::builder()
            .user_agent(user_agent(&self.config))
            .cookie_provider(cookie_jar)
            .redirect(redirect_policy)
            .connect_timeout(self.config.timeout())
            .timeout(self.config.timeout())
            .build()?)
    }
}

/// `gerrit-rest-java-client/<version> using <agent>`.
pub fn user_agent(config: &ClientConfig) -> String {
    format!(
        "{}/{} using {}",
        USER_AGENT_PRODUCT,
        crate::VERSION,
        config.user_agent.as_deref().unwrap_or(DEFAULT_AGENT)
    )
}

/// Joins host and path, adding the `/a` prefix when Basic credentials and
/// no token are used.
///
/// Sending Basic credentials together with a token, or the `/a` prefix with
/// a token, makes some Gerrit backends answer `403`.
pub fn rest_url(credentials: &Credentials, token_in_use: bool, path: &str) -> String {
    let separator = if path.starts_with('/') { "" } else { "/" };
    let prefix = if credentials.has_login_and_password() && !token_in_use {
        "/a"
    } else {
        ""
    };
    format!("{}{}{}{}", credentials.host, prefix, separator, path)
}

fn into_typed<T: DeserializeOwned>(value: Option<Value>) -> Result<T> {
    let value = value.ok_or(RestError::NoContent)?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_url_prefix() {
        let basic = Credentials::basic("https://review.example.org/", "jdoe", "pw");
        assert_eq!(
            rest_url(&basic, false, "/changes/"),
            "https://review.example.org/a/changes/"
        );
        assert_eq!(
            rest_url(&basic, true, "/changes/"),
            "https://review.example.org/changes/"
        );

        let anonymous = Credentials::anonymous("https://review.example.org");
        assert_eq!(
            rest_url(&anonymous, false, "changes/"),
            "https://review.example.org/changes/"
        );
    }

    #[test]
    fn test_user_agent() {
        let mut config = ClientConfig::default();
        assert_eq!(
            user_agent(&config),
            format!("gerrit-rest-java-client/{} using reqwest", crate::VERSION)
        );

        config.user_agent = Some("my-tool/2.0".to_string());
        assert!(user_agent(&config).ends_with(" using my-tool/2.0"));
    }

    #[test]
    fn test_into_typed() {
        let value: Vec<u32> = into_typed(Some(serde_json::json!([1, 2]))).unwrap();
        assert_eq!(value, vec![1, 2]);

        assert!(matches!(into_typed::<Vec<u32>>(None), Err(RestError::NoContent)));
        assert!(matches!(
            into_typed::<Vec<u32>>(Some(serde_json::json!({"a": 1}))),
            Err(RestError::Json(_))
        ));
    }
}
