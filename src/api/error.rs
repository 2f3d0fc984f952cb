//
//  gerrit-rest
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Error type returned by every REST call.
//!
//! Variants keep the status code, reason phrase and response body, so
//! callers can tell "invalid credentials" (401), "forbidden" (403), "not
//! found" (404) and server failures (5xx) apart without parsing messages.

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias for REST calls.
pub type Result<T> = std::result::Result<T, RestError>;

/// Placeholder used in error messages when the server sent no body.
pub const EMPTY_BODY: &str = "<empty>";

/// Failure of a request against the Gerrit REST API.
#[derive(Debug, Error)]
pub enum RestError {
    /// The HTTP exchange itself failed (DNS, connect, TLS, timeout).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a 4xx status.
    #[error("Request not successful. Client error: {status} {reason}. Response: {body}")]
    ClientError {
        /// HTTP status code.
        status: u16,
        /// Reason phrase for the status code.
        reason: String,
        /// Trimmed response body, or `<empty>`.
        body: String,
    },

    /// The server answered with a 5xx status.
    #[error("Request not successful. Server error: {status} {reason}. Response: {body}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Reason phrase for the status code.
        reason: String,
        /// Trimmed response body, or `<empty>`.
        body: String,
    },

    /// The response declared a content type other than JSON.
    #[error("Expected JSON but got '{content_type}'. Response: {body}")]
    UnexpectedContentType {
        /// Declared `Content-Type`.
        content_type: String,
        /// Raw response body.
        body: String,
    },

    /// The response body is not valid JSON.
    #[error("Couldn't parse response: {body}")]
    MalformedResponse {
        /// Raw response body.
        body: String,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The response body is the JSON literal `null`.
    #[error("Unexpectedly empty response.")]
    EmptyResponse,

    /// A typed call expected an entity but the response had none.
    #[error("Expected a response body but the server returned none.")]
    NoContent,

    /// A request or response body could not be converted with serde.
    #[error("JSON conversion failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP verb is not one the client implements.
    #[error("Unsupported HTTP verb: {0}")]
    UnsupportedVerb(String),

    /// The request could not be built (bad host URL, bad header).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl RestError {
    /// Builds a status failure for 4xx and 5xx codes, `None` otherwise.
    pub fn from_status(status: StatusCode, body: &str) -> Option<Self> {
        let code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = match body.trim() {
            "" => EMPTY_BODY.to_string(),
            trimmed => trimmed.to_string(),
        };
        match code {
            400..=499 => Some(Self::ClientError {
                status: code,
                reason,
                body,
            }),
            500..=599 => Some(Self::ServerError {
                status: code,
                reason,
                body,
            }),
            _ => None,
        }
    }

    /// The HTTP status code for status failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ClientError { status, .. } | Self::ServerError { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// `true` for 401 and 403 answers.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// `true` for 404 answers.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classes() {
        let err = RestError::from_status(StatusCode::NOT_FOUND, "  Not found: 42\n").unwrap();
        match &err {
            RestError::ClientError {
                status,
                reason,
                body,
            } => {
                assert_eq!(*status, 404);
                assert_eq!(reason, "Not Found");
                assert_eq!(body, "Not found: 42");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(err.is_not_found());

        let err = RestError::from_status(StatusCode::BAD_GATEWAY, "").unwrap();
        assert!(matches!(err, RestError::ServerError { status: 502, ref body, .. } if body == EMPTY_BODY));

        assert!(RestError::from_status(StatusCode::OK, "").is_none());
        assert!(RestError::from_status(StatusCode::FOUND, "").is_none());
    }

    #[test]
    fn test_auth_failure() {
        let unauthorized = RestError::from_status(StatusCode::UNAUTHORIZED, "").unwrap();
        let forbidden = RestError::from_status(StatusCode::FORBIDDEN, "").unwrap();
        let conflict = RestError::from_status(StatusCode::CONFLICT, "").unwrap();
        assert!(unauthorized.is_auth_failure());
        assert!(forbidden.is_auth_failure());
        assert!(!conflict.is_auth_failure());
    }

    #[test]
    fn test_message_carries_status_and_body() {
        let err = RestError::from_status(StatusCode::CONFLICT, "change is closed").unwrap();
        let message = err.to_string();
        assert!(message.contains("409"));
        assert!(message.contains("Conflict"));
        assert!(message.contains("change is closed"));
    }
}
