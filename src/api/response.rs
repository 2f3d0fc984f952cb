//
//  gerrit-rest
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Classification
//!
//! Turns a status code, a declared content type and a body into either a
//! JSON value, "no content", or a [`RestError`]:
//!
//! | Response | Outcome |
//! |----------|---------|
//! | 4xx | [`RestError::ClientError`] |
//! | 5xx | [`RestError::ServerError`] |
//! | success, empty body | `Ok(None)` |
//! | success, non-JSON content type | [`RestError::UnexpectedContentType`] |
//! | success, unparsable body | [`RestError::MalformedResponse`] |
//! | success, body `null` | [`RestError::EmptyResponse`] |
//! | success, JSON | `Ok(Some(value))` |
//!
//! [`classify`] is a pure function of its inputs.

use reqwest::StatusCode;
use serde_json::Value;

use super::error::{RestError, Result};
use super::json::strip_xssi_prefix;
use super::request::RawResponse;

/// Classifies a response. `Ok(None)` means the response had no entity.
///
/// ```rust
/// use reqwest::StatusCode;
/// use gerrit_rest::api::{classify, RestError};
///
/// let value = classify(StatusCode::OK, Some("application/json"), ")]}'\n{\"a\":1}").unwrap();
/// assert_eq!(value.unwrap()["a"], 1);
///
/// assert!(classify(StatusCode::NO_CONTENT, None, "").unwrap().is_none());
/// assert!(matches!(
///     classify(StatusCode::OK, Some("application/json"), "null"),
///     Err(RestError::EmptyResponse)
/// ));
/// ```
pub fn classify(status: StatusCode, content_type: Option<&str>, body: &str) -> Result<Option<Value>> {
    if let Some(err) = RestError::from_status(status, body) {
        return Err(err);
    }

    if body.trim().is_empty() {
        return Ok(None);
    }

    if let Some(content_type) = content_type {
        if !content_type.contains("application/json") {
            return Err(RestError::UnexpectedContentType {
                content_type: content_type.to_string(),
                body: body.to_string(),
            });
        }
    }

    match serde_json::from_str::<Value>(strip_xssi_prefix(body)) {
        Ok(Value::Null) => Err(RestError::EmptyResponse),
        Ok(value) => Ok(Some(value)),
        Err(source) => Err(RestError::MalformedResponse {
            body: body.to_string(),
            source,
        }),
    }
}

/// Classifies a response read by the executor.
pub fn classify_response(response: &RawResponse) -> Result<Option<Value>> {
    classify(response.status, response.content_type(), &response.body)
}
