//! Drives the reducer against real handlers and a mock server.

use std::collections::VecDeque;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use plaza_core::api::ApiClient;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{Dispatch, dispatch};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::nav::Tab;
use crate::state::AppState;
use crate::update;

/// Runs effects to completion, one task at a time, feeding every result
/// back through the reducer.
async fn drive(app: &mut AppState, api: &ApiClient, effects: Vec<UiEffect>) {
    let mut queue: VecDeque<UiEffect> = effects.into();
    while let Some(effect) = queue.pop_front() {
        match dispatch(api, effect) {
            Dispatch::Quit => app.tui.should_quit = true,
            Dispatch::OpenBrowser(_) => {}
            Dispatch::Task { kind, id, job } => {
                let result = Box::new(job.await);
                queue.extend(update::update(app, UiEvent::TaskCompleted { kind, id, result }));
            }
        }
    }
}

async fn press(app: &mut AppState, api: &ApiClient, code: KeyCode) {
    let event = UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    let effects = update::update(app, event);
    drive(app, api, effects).await;
}

/// Mock server with alice signed in and an empty feed.
async fn signed_in_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "username": "alice" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    server
}

async fn start(server: &MockServer) -> (AppState, ApiClient) {
    let api = ApiClient::new(server.uri()).unwrap();
    let mut app = AppState::new(api.base_url());
    let effects = update::startup(&mut app);
    drive(&mut app, &api, effects).await;
    (app, api)
}

/// (method, path) of every request the server saw, in order.
async fn request_log(server: &MockServer) -> Vec<(String, String)> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|req| (req.method.to_string(), req.url.path().to_string()))
        .collect()
}

#[tokio::test]
async fn test_startup_with_cookie_lands_on_feed() {
    let server = signed_in_server().await;
    let (app, _) = start(&server).await;

    assert_eq!(app.tui.session.identity().unwrap().username, "alice");
    assert_eq!(app.tui.nav.active, Tab::Feed);
    assert!(app.tui.feed.loaded);
}

#[tokio::test]
async fn test_follow_then_refetch_users() {
    let server = signed_in_server().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "username": "alice" },
            { "id": 2, "username": "bob" }
        ])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/follows/2"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, api) = start(&server).await;
    press(&mut app, &api, KeyCode::Char('2')).await;
    assert_eq!(app.tui.users.users.len(), 1);

    press(&mut app, &api, KeyCode::Char('f')).await;

    let log = request_log(&server).await;
    let tail: Vec<_> = log[log.len() - 2..].to_vec();
    assert_eq!(
        tail,
        [
            ("POST".to_string(), "/follows/2".to_string()),
            ("GET".to_string(), "/users".to_string()),
        ]
    );
    assert!(app.overlay.is_some());
}

#[tokio::test]
async fn test_blank_post_makes_no_request() {
    let server = signed_in_server().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (mut app, api) = start(&server).await;
    press(&mut app, &api, KeyCode::Char('n')).await;
    press(&mut app, &api, KeyCode::Char(' ')).await;
    press(&mut app, &api, KeyCode::Enter).await;

    assert!(app.tui.feed.composing);
}

#[tokio::test]
async fn test_like_toggle_deletes_existing_like() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "username": "alice" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 5,
            "content": "hello",
            "likes": [{ "user": { "id": 1 } }]
        }])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/likes/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, api) = start(&server).await;
    press(&mut app, &api, KeyCode::Char('l')).await;

    let log = request_log(&server).await;
    assert_eq!(
        log.last(),
        Some(&("GET".to_string(), "/posts/feed".to_string()))
    );
    assert!(log.contains(&("DELETE".to_string(), "/likes/5".to_string())));
}

#[tokio::test]
async fn test_failed_sign_in_shows_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let (mut app, api) = start(&server).await;
    assert!(!app.tui.session.is_authenticated());

    for ch in "alice".chars() {
        press(&mut app, &api, KeyCode::Char(ch)).await;
    }
    press(&mut app, &api, KeyCode::Tab).await;
    for ch in "wrong".chars() {
        press(&mut app, &api, KeyCode::Char(ch)).await;
    }
    press(&mut app, &api, KeyCode::Enter).await;

    assert!(!app.tui.session.is_authenticated());
    assert_eq!(app.tui.auth.banner.as_deref(), Some("Invalid credentials"));
}
