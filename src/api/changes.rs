//
//  gerrit-rest
//  api/changes.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Changes API
//!
//! ```text
//! GET  /changes/?q={query}&n={limit}
//! GET  /changes/{change-id}
//! POST /changes/{change-id}/abandon
//! POST /changes/{change-id}/restore
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use gerrit_rest::api::GerritRestClient;
//! use gerrit_rest::auth::Credentials;
//!
//! # async fn example() -> gerrit_rest::api::Result<()> {
//! let client = GerritRestClient::with_defaults(Credentials::anonymous("https://review.example.org"));
//! for change in client.changes().query("status:open project:tools", Some(10)).await? {
//!     println!("{} {}", change.number, change.subject);
//! }
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::accounts::AccountInfo;
use super::client::GerritRestClient;
use super::error::Result;
use super::json::gerrit_timestamp;
use super::{encode_query, encode_segment};

/// Summary of a change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeInfo {
    /// `project~branch~Change-Id` triplet.
    pub id: String,
    pub project: String,
    pub branch: String,
    pub change_id: String,
    pub subject: String,
    pub status: ChangeStatus,

    #[serde(with = "gerrit_timestamp")]
    pub created: DateTime<Utc>,

    #[serde(with = "gerrit_timestamp")]
    pub updated: DateTime<Utc>,

    #[serde(default, with = "gerrit_timestamp::option", skip_serializing_if = "Option::is_none")]
    pub submitted: Option<DateTime<Utc>>,

    /// Legacy numeric change id.
    #[serde(rename = "_number")]
    pub number: u64,

    #[serde(default)]
    pub owner: AccountInfo,

    #[serde(default)]
    pub insertions: u64,

    #[serde(default)]
    pub deletions: u64,
}

/// Lifecycle state of a change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeStatus {
    New,
    Merged,
    Abandoned,
    Draft,
}

#[derive(Serialize)]
struct MessageInput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

/// Change endpoints.
pub struct ChangesApi<'a> {
    client: &'a GerritRestClient,
}

impl<'a> ChangesApi<'a> {
    pub(super) fn new(client: &'a GerritRestClient) -> Self {
        Self { client }
    }

    /// Runs a change query, e.g. `status:open owner:self`.
    pub async fn query(&self, query: &str, limit: Option<u32>) -> Result<Vec<ChangeInfo>> {
        let mut path = format!("/changes/?q={}", encode_query(query));
        if let Some(limit) = limit {
            path.push_str(&format!("&n={}", limit));
        }
        self.client.get_as(&path).await
    }

    /// Fetches one change.
    pub async fn get(&self, id: &str) -> Result<ChangeInfo> {
        self.client
            .get_as(&format!("/changes/{}", encode_segment(id)))
            .await
    }

    /// Abandons a change with an optional message.
    pub async fn abandon(&self, id: &str, message: Option<&str>) -> Result<ChangeInfo> {
        self.client
            .post_as(
                &format!("/changes/{}/abandon", encode_segment(id)),
                &MessageInput { message },
            )
            .await
    }

    /// Restores an abandoned change with an optional message.
    pub async fn restore(&self, id: &str, message: Option<&str>) -> Result<ChangeInfo> {
        self.client
            .post_as(
                &format!("/changes/{}/restore", encode_segment(id)),
                &MessageInput { message },
            )
            .await
    }
}
