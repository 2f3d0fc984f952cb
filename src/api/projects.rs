//
//  gerrit-rest
//  api/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Projects and Server API
//!
//! ```text
//! GET /projects/?d
//! GET /projects/{project-name}
//! GET /config/server/version
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::client::GerritRestClient;
use super::encode_segment;
use super::error::Result;

/// A project (repository) on the Gerrit server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProjectInfo {
    /// URL-encoded project name.
    pub id: String,

    /// Project name. Absent in list results, where it is the map key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `ACTIVE`, `READ_ONLY` or `HIDDEN`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Project endpoints.
pub struct ProjectsApi<'a> {
    client: &'a GerritRestClient,
}

impl<'a> ProjectsApi<'a> {
    pub(super) fn new(client: &'a GerritRestClient) -> Self {
        Self { client }
    }

    /// Lists visible projects with descriptions, keyed and sorted by name.
    pub async fn list(&self) -> Result<BTreeMap<String, ProjectInfo>> {
        let mut projects: BTreeMap<String, ProjectInfo> = self.client.get_as("/projects/?d").await?;
        for (name, project) in projects.iter_mut() {
            project.name.get_or_insert_with(|| name.clone());
        }
        Ok(projects)
    }

    /// Fetches one project.
    pub async fn get(&self, name: &str) -> Result<ProjectInfo> {
        self.client
            .get_as(&format!("/projects/{}", encode_segment(name)))
            .await
    }
}

/// Server endpoints.
pub struct ServerApi<'a> {
    client: &'a GerritRestClient,
}

impl<'a> ServerApi<'a> {
    pub(super) fn new(client: &'a GerritRestClient) -> Self {
        Self { client }
    }

    /// The Gerrit version string, e.g. `3.9.1`.
    pub async fn version(&self) -> Result<String> {
        self.client.get_as("/config/server/version").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_project_list() {
        let projects: BTreeMap<String, ProjectInfo> = serde_json::from_str(
            r#"{"All-Projects":{"id":"All-Projects","state":"ACTIVE"},"tools/gerrit":{"id":"tools%2Fgerrit","parent":"All-Projects"}}"#,
        )
        .unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects["tools/gerrit"].parent.as_deref(), Some("All-Projects"));
        assert_eq!(projects["All-Projects"].state.as_deref(), Some("ACTIVE"));
    }
}
