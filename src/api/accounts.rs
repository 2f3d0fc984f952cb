//
//  gerrit-rest
//  api/accounts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Accounts API
//!
//! ```text
//! GET /accounts/self
//! GET /accounts/{account-id}
//! ```

use serde::{Deserialize, Serialize};

use super::client::GerritRestClient;
use super::encode_segment;
use super::error::Result;

/// A Gerrit account as returned by the accounts and changes endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AccountInfo {
    /// Numeric account id.
    #[serde(rename = "_account_id", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl AccountInfo {
    /// Best human-readable name: display name, user name, email, or id.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.username.clone())
            .or_else(|| self.email.clone())
            .or_else(|| self.account_id.map(|id| id.to_string()))
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Account endpoints.
pub struct AccountsApi<'a> {
    client: &'a GerritRestClient,
}

impl<'a> AccountsApi<'a> {
    pub(super) fn new(client: &'a GerritRestClient) -> Self {
        Self { client }
    }

    /// The account the client is authenticated as.
    pub async fn self_account(&self) -> Result<AccountInfo> {
        self.get("self").await
    }

    /// Looks up an account by id, user name or email.
    pub async fn get(&self, id: &str) -> Result<AccountInfo> {
        self.client
            .get_as(&format!("/accounts/{}", encode_segment(id)))
            .await
    }
}
