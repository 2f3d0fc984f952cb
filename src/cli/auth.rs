//
//  gerrit-rest
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! `login` checks the credentials against `/accounts/self`, then stores the
//! password in the keyring and the host in the config file.

use std::io::BufRead;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use console::style;
use dialoguer::{Input, Password};

use crate::api::GerritRestClient;
use crate::auth::{Credentials, KeyringStore};
use crate::config::{host_key, normalize_host, Config, HostConfig};

use super::GlobalOptions;

/// Authenticate with a Gerrit server.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in to a Gerrit server
    Login(LoginArgs),

    /// Log out of a Gerrit server
    Logout(LogoutArgs),

    /// View authentication status
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read the password from standard input
    #[arg(long)]
    pub with_password: bool,

    /// Make this the default host
    #[arg(long)]
    pub default: bool,
}

#[derive(Args, Debug)]
pub struct LogoutArgs {
    /// Log out of all hosts
    #[arg(long)]
    pub all: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout(args) => logout(args, global),
            AuthSubcommand::Status => status(global).await,
        }
    }
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let host = match &global.host {
        Some(host) => normalize_host(host),
        None => normalize_host(&Input::<String>::new().with_prompt("Gerrit URL").interact_text()?),
    };
    let login = match &global.user {
        Some(user) => user.clone(),
        None => Input::<String>::new().with_prompt("User name").interact_text()?,
    };
    let password = match (&global.password, args.with_password) {
        (Some(password), _) => password.clone(),
        (None, true) => read_password_from_stdin()?,
        (None, false) => Password::new()
            .with_prompt("Password or HTTP password")
            .interact()?,
    };
    if password.is_empty() {
        bail!("Password must not be empty");
    }

    let mut config = Config::load()?;
    let credentials = Credentials::new(
        host.clone(),
        Some(login.clone()),
        Some(password.clone()),
        global.http_password,
    );
    let client = GerritRestClient::new(credentials, config.client.clone());
    let account = client
        .accounts()
        .self_account()
        .await
        .with_context(|| format!("Could not log in to {}", host))?;

    KeyringStore::new().store(&host, &login, &password)?;
    config.insert_host(HostConfig {
        host: host.clone(),
        login: Some(login),
        http_password: global.http_password,
    });
    if args.default || config.default_host.is_none() {
        config.default_host = Some(host_key(&host));
    }
    config.save()?;

    println!(
        "{} Logged in to {} as {}",
        style("✓").green(),
        host,
        account.display_name()
    );
    Ok(())
}

fn logout(args: &LogoutArgs, global: &GlobalOptions) -> Result<()> {
    let keyring = KeyringStore::new();
    let mut config = Config::load()?;

    let hosts: Vec<HostConfig> = if args.all {
        config.hosts.values().cloned().collect()
    } else {
        let host = match &global.host {
            Some(host) => config.host_config(host),
            None => config.default_host_config(),
        };
        match host {
            Some(host) => vec![host.clone()],
            None => {
                println!("Not logged in");
                return Ok(());
            }
        }
    };

    for host in &hosts {
        if let Some(login) = &host.login {
            keyring.delete(&host.host, login)?;
        }
        config.remove_host(&host.host);
        println!("Logged out of {}", host.host);
    }
    config.save()?;
    Ok(())
}

async fn status(global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    if config.hosts.is_empty() {
        println!("Not logged in to any Gerrit hosts");
        println!();
        println!("Run 'gerrit-rest auth login --host <url>' to authenticate");
        return Ok(());
    }

    let mut hosts: Vec<&HostConfig> = config.hosts.values().collect();
    hosts.sort_by(|a, b| a.host.cmp(&b.host));

    for host in hosts {
        let options = host_options(global, host);
        let client = GerritRestClient::new(super::resolve_auth(&options, &config)?, config.client.clone());
        let is_default = config.default_host.as_deref() == Some(host_key(&host.host).as_str());

        println!(
            "{}{}",
            host.host,
            if is_default { " (default)" } else { "" }
        );
        match client.accounts().self_account().await {
            Ok(account) => println!(
                "  Status: {} as {}",
                style("Active").green(),
                account.display_name()
            ),
            Err(e) => println!("  Status: {} ({})", style("Invalid").red(), e),
        }
        if host.http_password {
            println!("  Password: HTTP password token");
        }
    }
    Ok(())
}

/// Options for checking one configured host.
///
/// `--user` and `--password` only apply to the host named by `--host`; the
/// other hosts use their stored login and keyring entry.
fn host_options(global: &GlobalOptions, host: &HostConfig) -> GlobalOptions {
    let targeted = global
        .host
        .as_deref()
        .is_some_and(|h| host_key(h) == host_key(&host.host));
    GlobalOptions {
        host: Some(host.host.clone()),
        user: global.user.clone().filter(|_| targeted),
        password: global.password.clone().filter(|_| targeted),
        ..global.clone()
    }
}

fn read_password_from_stdin() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(host: &str) -> HostConfig {
        HostConfig {
            host: host.to_string(),
            login: Some("jdoe".to_string()),
            http_password: false,
        }
    }

    #[test]
    fn test_explicit_password_only_for_named_host() {
        let global = GlobalOptions {
            host: Some("review.example.org".to_string()),
            user: Some("admin".to_string()),
            password: Some("pw".to_string()),
            ..Default::default()
        };

        let named = host_options(&global, &configured("https://review.example.org"));
        assert_eq!(named.password.as_deref(), Some("pw"));
        assert_eq!(named.user.as_deref(), Some("admin"));

        let other = host_options(&global, &configured("https://other.example.org"));
        assert_eq!(other.host.as_deref(), Some("https://other.example.org"));
        assert_eq!(other.password, None);
        assert_eq!(other.user, None);
    }

    #[test]
    fn test_password_without_host_is_not_applied() {
        let global = GlobalOptions {
            password: Some("pw".to_string()),
            ..Default::default()
        };
        let options = host_options(&global, &configured("https://review.example.org"));
        assert_eq!(options.password, None);
    }
}
