//
//  gerrit-rest
//  api/login.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Login
//!
//! Gerrit servers authenticate in different ways (HTTP Basic, LDAP forms,
//! GitHub OAuth) and the client does not know which one it is talking to.
//! Before each request [`GerritRestClient::resolve_auth_token`] picks one of:
//!
//! - **anonymous**: no login and password configured
//! - **Basic only**: the host gave no token on an earlier login attempt,
//!   the password is an HTTP password token, or `/login/` redirects to
//!   GitHub OAuth
//! - **cached token**: the `GerritAccount` cookie is still in the jar and
//!   `GET /accounts/self` answers `200`
//! - **fresh login**: `GET /login/` with Basic credentials, then a form
//!   `POST /login/`, taking the token from the `XSRF_TOKEN` cookie or from
//!   `xGerritAuth="..."` in the page of servers that set `GerritAccount`
//!
//! HTTP password tokens never go to `/login/`: a secondary auth backend
//! counting them as failed interactive logins can lock the account.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::ACCEPT;
use reqwest::{Client, Response, StatusCode, Url};

use super::client::{GerritRestClient, GERRIT_AUTH_HEADER};
use super::error::{RestError, Result};
use crate::auth::Credentials;

/// Cookie carrying the XSRF token on newer servers.
pub const XSRF_TOKEN_COOKIE: &str = "XSRF_TOKEN";

/// Session cookie Gerrit sets after a successful login.
pub const GERRIT_ACCOUNT_COOKIE: &str = "GerritAccount";

/// Path GitHub's OAuth flow redirects `/login/` to.
const GITHUB_OAUTH_PATH: &str = "/login/oauth/authorize";

static GERRIT_AUTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"xGerritAuth="(.+?)""#).unwrap());

/// What a `/login/` probe left behind.
struct LoginProbe {
    final_url: Url,
    /// Cookies set by this probe, from the last response or any redirect.
    cookies: Vec<(String, String)>,
    /// `GerritAccount` is in the jar, whether set now or by an earlier login.
    has_account_cookie: bool,
    body: String,
}

impl LoginProbe {
    async fn read(response: Response, jar: &Jar, host_url: &Url, before: &[(String, String)]) -> Result<Self> {
        let final_url = response.url().clone();
        let mut cookies: Vec<(String, String)> = response
            .cookies()
            .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
            .collect();
        for (name, value) in jar_cookies(jar, host_url) {
            let is_new = !before.iter().any(|(n, v)| *n == name && *v == value);
            if is_new && !cookies.iter().any(|(n, _)| *n == name) {
                cookies.push((name, value));
            }
        }
        let has_account_cookie = cookies.iter().any(|(n, _)| n == GERRIT_ACCOUNT_COOKIE)
            || cookie_value(jar, host_url, GERRIT_ACCOUNT_COOKIE).is_some();
        let body = response.text().await?;
        Ok(Self {
            final_url,
            cookies,
            has_account_cookie,
            body,
        })
    }

    fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn is_github_oauth(&self) -> bool {
        self.final_url.path().contains(GITHUB_OAUTH_PATH)
    }

    /// The token from a newly set `XSRF_TOKEN`, or from the page when a
    /// `GerritAccount` session cookie is present.
    fn auth_token(&self) -> Option<String> {
        if let Some(token) = self.cookie(XSRF_TOKEN_COOKIE) {
            return Some(token.to_string());
        }
        if !self.has_account_cookie {
            return None;
        }
        extract_gerrit_auth(&self.body)
    }
}

impl GerritRestClient {
    /// Decides which auth token, if any, the next request carries.
    pub(super) async fn resolve_auth_token(
        &self,
        http: &Client,
        credentials: &Credentials,
    ) -> Result<Option<String>> {
        let (Some(login), Some(password)) = (&credentials.login, &credentials.password) else {
            tracing::debug!(host = %credentials.host, "no credentials, anonymous access");
            return Ok(None);
        };
        if !credentials.has_login_and_password() {
            return Ok(None);
        }

        let session = self.login_cache.snapshot(credentials);
        if !session.host_supports_token_login {
            tracing::debug!(host = %credentials.host, "host has no token login, using basic auth");
            return Ok(None);
        }
        if credentials.http_password {
            tracing::debug!(host = %credentials.host, "HTTP password token, using basic auth");
            return Ok(None);
        }
        if session.oauth_detected {
            tracing::debug!(host = %credentials.host, "GitHub OAuth host, using basic auth");
            return Ok(None);
        }

        let host_url = host_url(credentials)?;
        if let Some(token) = session.auth_token {
            let has_session_cookie =
                cookie_value(&session.cookie_jar, &host_url, GERRIT_ACCOUNT_COOKIE).is_some();
            if has_session_cookie && self.session_is_valid(http, credentials, &token).await? {
                tracing::debug!(host = %credentials.host, "reusing cached auth token");
                return Ok(Some(token));
            }
        }

        let token = self
            .login(http, credentials, login, password, &session.cookie_jar, &host_url)
            .await?;
        tracing::debug!(host = %credentials.host, obtained = token.is_some(), "token login finished");
        self.login_cache.set_auth_token(credentials, token.clone());
        Ok(token)
    }

    /// `GET /accounts/self` with the cached token.
    async fn session_is_valid(&self, http: &Client, credentials: &Credentials, token: &str) -> Result<bool> {
        let response = http
            .get(format!("{}/accounts/self", credentials.host))
            .header(ACCEPT, "application/json")
            .header(GERRIT_AUTH_HEADER, token)
            .send()
            .await?;
        Ok(response.status() == StatusCode::OK)
    }

    async fn login(
        &self,
        http: &Client,
        credentials: &Credentials,
        login: &str,
        password: &str,
        jar: &Arc<Jar>,
        host_url: &Url,
    ) -> Result<Option<String>> {
        let login_url = format!("{}/login/", credentials.host);

        let before = jar_cookies(jar, host_url);
        let response = http
            .get(&login_url)
            .basic_auth(login, Some(password))
            .send()
            .await?;
        let probe = LoginProbe::read(response, jar, host_url, &before).await?;

        if probe.is_github_oauth() {
            tracing::debug!(host = %credentials.host, "/login/ redirects to GitHub OAuth");
            self.login_cache.mark_oauth_detected(credentials);
            return Ok(None);
        }
        if let Some(token) = probe.auth_token() {
            return Ok(Some(token));
        }

        let before = jar_cookies(jar, host_url);
        let response = http
            .post(&login_url)
            .form(&[("username", login), ("password", password)])
            .send()
            .await?;
        let probe = LoginProbe::read(response, jar, host_url, &before).await?;
        Ok(probe.auth_token())
    }
}

/// Finds the first `xGerritAuth="..."` value in a login page.
pub fn extract_gerrit_auth(body: &str) -> Option<String> {
    GERRIT_AUTH_PATTERN
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str().to_string())
}

fn host_url(credentials: &Credentials) -> Result<Url> {
    Url::parse(&format!("{}/", credentials.host))
        .map_err(|e| RestError::InvalidRequest(format!("host '{}': {}", credentials.host, e)))
}

/// Name/value pairs of the unexpired cookies the jar sends to `url`.
fn jar_cookies(jar: &Jar, url: &Url) -> Vec<(String, String)> {
    let Some(header) = jar.cookies(url) else {
        return Vec::new();
    };
    let Ok(header) = header.to_str() else {
        return Vec::new();
    };
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn cookie_value(jar: &Jar, url: &Url, name: &str) -> Option<String> {
    jar_cookies(jar, url)
        .into_iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v)
}
