//
//  gerrit-rest
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request and response values exchanged with the executor.

use std::fmt;
use std::str::FromStr;

use reqwest::header::HeaderMap;
use reqwest::{Method, Response, StatusCode};

use super::error::{RestError, Result};

/// Content type of JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Content type of plain-text request bodies.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=UTF-8";

/// HTTP verbs the client implements.
///
/// `PostText` and `PutText` send their body as `text/plain`, which some
/// Gerrit endpoints (commit messages, file contents) expect.
///
/// ```rust
/// use gerrit_rest::api::HttpVerb;
///
/// assert_eq!("put".parse::<HttpVerb>().unwrap(), HttpVerb::Put);
/// assert!("PATCH".parse::<HttpVerb>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    PostText,
    PutText,
}

impl HttpVerb {
    /// The HTTP method sent on the wire.
    pub fn method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post | Self::PostText => Method::POST,
            Self::Put | Self::PutText => Method::PUT,
            Self::Delete => Method::DELETE,
        }
    }

    /// Content type used for the request body.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::PostText | Self::PutText => TEXT_CONTENT_TYPE,
            _ => JSON_CONTENT_TYPE,
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::PostText => "POST_TEXT",
            Self::PutText => "PUT_TEXT",
        };
        f.write_str(name)
    }
}

impl FromStr for HttpVerb {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "POST_TEXT" => Ok(Self::PostText),
            "PUT_TEXT" => Ok(Self::PutText),
            _ => Err(RestError::UnsupportedVerb(s.to_string())),
        }
    }
}

/// A REST call as built by a resource client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// Path below the host, e.g. `/changes/?q=status:open`.
    pub path: String,
    /// Request body, already serialized.
    pub body: Option<String>,
    /// HTTP verb.
    pub verb: HttpVerb,
    /// Additional headers as name/value pairs.
    pub headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// Creates a descriptor without body or extra headers.
    pub fn new(verb: HttpVerb, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            body: None,
            verb,
            headers: Vec::new(),
        }
    }

    /// Sets the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets an optional body.
    pub fn with_optional_body(mut self, body: Option<&str>) -> Self {
        self.body = body.map(str::to_string);
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    /// Reads the whole response body.
    pub async fn read(response: Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// The declared `Content-Type`, if present and readable.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    /// Fails with the status error for 4xx and 5xx responses.
    pub fn error_for_status(self) -> Result<Self> {
        match RestError::from_status(self.status, &self.body) {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}
