//! Headless commands against a mock API server.
//!
//! The binary blocks the test thread, so the mock server needs a
//! multi-threaded runtime to keep answering.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "username": "alice", "password": "secret1" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sid=abc; Path=/")
                .set_body_json(json!({
                    "user": { "id": 1, "username": "alice", "name": "Alice" }
                })),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_feed_prints_posts() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/posts/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 10,
                "content": "hello plaza",
                "author": { "id": 2, "username": "bob", "name": "Bob" },
                "likes": [{ "userId": 1 }, { "user": { "id": 3 } }],
                "comments": []
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("plaza")
        .env("PLAZA_HOME", home.path())
        .env("PLAZA_PASSWORD", "secret1")
        .args(["--api-url", &server.uri(), "feed", "--username", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bob"))
        .stdout(predicate::str::contains("hello plaza"))
        .stdout(predicate::str::contains("2 likes"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_sign_in_reports_server_message() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("plaza")
        .env("PLAZA_HOME", home.path())
        .args(["--api-url", &server.uri(), "feed", "-u", "alice", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_post_sends_trimmed_content() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_json(json!({ "content": "first post" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 11 })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("plaza")
        .env("PLAZA_HOME", home.path())
        .env("PLAZA_PASSWORD", "secret1")
        .args([
            "--api-url",
            &server.uri(),
            "post",
            "--username",
            "alice",
            "--message",
            "  first post \n",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Posted."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blank_post_sends_no_request() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    cargo_bin_cmd!("plaza")
        .env("PLAZA_HOME", home.path())
        .env("PLAZA_PASSWORD", "secret1")
        .args([
            "--api-url",
            &server.uri(),
            "post",
            "--username",
            "alice",
            "--message",
            "   ",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Write something first"));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami_reuses_session_cookie() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("cookie", "sid=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "username": "alice",
            "name": "Alice"
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("plaza")
        .env("PLAZA_HOME", home.path())
        .env("PLAZA_PASSWORD", "secret1")
        .args(["--api-url", &server.uri(), "whoami", "--username", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice (@alice)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami_reports_rejected_session() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Not authenticated" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("plaza")
        .env("PLAZA_HOME", home.path())
        .env("PLAZA_PASSWORD", "secret1")
        .args(["--api-url", &server.uri(), "whoami", "--username", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}
