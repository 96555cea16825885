// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Once;

use octogym_client::config::Config;
use octogym_client::Engine;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static LOG_INIT: Once = Once::new();

pub const TEST_TOKEN: &str = "test-token-123";
pub const TEST_EMAIL: &str = "octo@example.test";
pub const TEST_PASSWORD: &str = "hunter2";

/// An engine wired against a mock OctoGym server, with its session file in
/// a per-test temporary directory.
pub struct TestHarness {
    pub engine: Engine,
    pub server: MockServer,
    pub config: Config,
    _state_dir: tempfile::TempDir,
}

/// Create a mock server and an engine pointed at it.
#[allow(dead_code)]
pub async fn test_harness() -> TestHarness {
    LOG_INIT.call_once(|| octogym_client::logging::init_with_level("debug"));

    let server = MockServer::start().await;
    let state_dir = tempfile::tempdir().expect("create temp state dir");

    let config = Config {
        api_base_url: server.uri(),
        daily_goal_minutes: 30,
        session_file: state_dir.path().join("session.json"),
    };

    let engine = Engine::init(config.clone()).await;

    TestHarness {
        engine,
        server,
        config,
        _state_dir: state_dir,
    }
}

/// A workout record as the backend would serialize it.
#[allow(dead_code)]
pub fn workout_json(id: u64, workout_type: &str, minutes: u32, intensity: &str, date: &str) -> Value {
    json!({
        "id": id,
        "type": workout_type,
        "duration_minutes": minutes,
        "intensity": intensity,
        "date": date,
        "user_id": 1,
    })
}

/// Mount a successful login returning [`TEST_TOKEN`].
#[allow(dead_code)]
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login-json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TEST_TOKEN,
            "token_type": "bearer",
        })))
        .mount(server)
        .await;
}

/// Mount a GET /workouts returning the given records.
#[allow(dead_code)]
pub async fn mount_workouts(server: &MockServer, records: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/workouts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(records)))
        .mount(server)
        .await;
}

/// Mount login + workout listing, then sign in.
#[allow(dead_code)]
pub async fn sign_in_with(harness: &TestHarness, records: Vec<Value>) {
    mount_login(&harness.server).await;
    mount_workouts(&harness.server, records).await;

    harness
        .engine
        .sign_in(TEST_EMAIL, TEST_PASSWORD)
        .await
        .expect("sign-in against mock server should succeed");
}
