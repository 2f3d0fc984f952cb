//
//  gerrit-rest
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the user's config file and environment.
fn gerrit_rest(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gerrit-rest").unwrap();
    cmd.env("HOME", config_home.path())
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("GERRIT_HOST")
        .env_remove("GERRIT_USER")
        .env_remove("GERRIT_PASSWORD")
        .env_remove("GERRIT_REST_DEBUG");
    cmd
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    gerrit_rest(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "gerrit-rest version {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    gerrit_rest(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("api"))
        .stdout(predicate::str::contains("changes"))
        .stdout(predicate::str::contains("auth"));
}

#[test]
fn test_missing_host() {
    let home = TempDir::new().unwrap();
    gerrit_rest(&home)
        .args(["api", "/changes/"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No Gerrit host given"));
}

#[test]
fn test_unsupported_verb_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    gerrit_rest(&home)
        .args(["api", "--host", "http://127.0.0.1:9", "-X", "PATCH", "/changes/"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported HTTP verb: PATCH"));
}

#[test]
fn test_api_anonymous_request() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/config/server/version")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(")]}'\n\"3.9.1\"")
        .create();

    gerrit_rest(&home)
        .args(["api", "--host", &server.url(), "--anonymous", "/config/server/version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"3.9.1\""));

    mock.assert();
}

#[test]
fn test_api_not_found_exit_code() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/changes/42")
        .with_status(404)
        .with_body("Not found: 42")
        .create();

    gerrit_rest(&home)
        .args(["api", "--host", &server.url(), "/changes/42"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("Not found: 42"));

    mock.assert();
}

#[test]
fn test_api_with_password_uses_basic_auth() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/a/accounts/self")
        .match_header("authorization", "Basic amRvZTpzZWNyZXQ=")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(")]}'\n{\"username\":\"jdoe\"}")
        .create();

    gerrit_rest(&home)
        .args(["api", "--host", &server.url(), "-u", "jdoe", "--http-password", "/accounts/self"])
        .env("GERRIT_PASSWORD", "secret")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"username\": \"jdoe\""));

    mock.assert();
}
