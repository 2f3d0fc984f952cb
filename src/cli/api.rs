//
//  gerrit-rest
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Sends one request through the authenticating client, so login, token
//! reuse and the `/a` prefix are handled exactly as for library callers.
//!
//! ## Examples
//!
//! ```bash
//! # Who am I?
//! gerrit-rest api /accounts/self
//!
//! # Abandon a change
//! gerrit-rest api -X POST /changes/12345/abandon -d '{"message":"obsolete"}'
//!
//! # Set a commit message as plain text
//! gerrit-rest api -X PUT_TEXT /changes/12345/edit:message -d 'New subject'
//! ```

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use crate::api::json::strip_xssi_prefix;
use crate::api::{HttpVerb, RawResponse, RequestDescriptor};

use super::{build_client, GlobalOptions};

/// Make direct API requests
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// API path, e.g. /changes/?q=status:open
    pub path: String,

    /// HTTP verb (GET, POST, PUT, DELETE, POST_TEXT, PUT_TEXT)
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Request body (- for stdin)
    #[arg(long, short = 'd')]
    pub data: Option<String>,

    /// Request headers as 'Name: value' (can be specified multiple times)
    #[arg(long, short = 'H', action = clap::ArgAction::Append)]
    pub header: Vec<String>,

    /// Include status line and response headers in output
    #[arg(long, short = 'i')]
    pub include: bool,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let verb: HttpVerb = self.method.parse()?;
        let mut request = RequestDescriptor::new(verb, self.path.clone());

        if let Some(body) = self.read_body()? {
            request = request.with_body(body);
        }
        for header in &self.header {
            let (name, value) = parse_header(header)?;
            request = request.with_header(name, value);
        }

        let client = build_client(global)?;
        let response = client.raw_request(request).await?;

        if self.include {
            print_head(&response);
        }
        println!("{}", render_body(&response.body));
        Ok(())
    }

    fn read_body(&self) -> Result<Option<String>> {
        match self.data.as_deref() {
            Some("-") => {
                let body = std::io::read_to_string(std::io::stdin())
                    .context("Failed to read request body from stdin")?;
                Ok(Some(body))
            }
            Some(body) => Ok(Some(body.to_string())),
            None => Ok(None),
        }
    }
}

fn print_head(response: &RawResponse) {
    println!("{}", style(response.status).bold());
    for (name, value) in &response.headers {
        println!(
            "{}: {}",
            style(name.as_str()).cyan(),
            value.to_str().unwrap_or("<binary>")
        );
    }
    println!();
}

/// Pretty-prints JSON bodies (without the anti-XSSI line), other bodies as is.
fn render_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(strip_xssi_prefix(body))
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| body.to_string())
}

fn parse_header(header: &str) -> Result<(String, String)> {
    let (name, value) = header
        .split_once(':')
        .with_context(|| format!("Invalid header '{}', expected 'Name: value'", header))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("X-Test:  1 ").unwrap(),
            ("X-Test".to_string(), "1".to_string())
        );
        assert!(parse_header("nonsense").is_err());
    }

    #[test]
    fn test_render_body() {
        assert_eq!(render_body(")]}'\n{\"a\":1}"), "{\n  \"a\": 1\n}");
        assert_eq!(render_body("plain text"), "plain text");
    }
}
