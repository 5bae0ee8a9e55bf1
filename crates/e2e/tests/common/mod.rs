//! Shared test support: logging, mock environments and the live client
#![allow(dead_code)]

use gamestore_common::ApiConfig;
use gamestore_e2e::{ApiClient, DualEnvironment, FixtureResolver, ResetScope};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

/// Version prefix mounted by the mock environments
pub const PREFIX: &str = "/api/v1";

pub const TOKEN: &str = "test-token";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Mock Release and Dev servers plus a client pointed at them
pub struct MockEnvironments {
    pub release: MockServer,
    pub dev: MockServer,
    pub client: ApiClient,
}

impl MockEnvironments {
    pub async fn start() -> Self {
        init_tracing();
        let release = MockServer::start().await;
        let dev = MockServer::start().await;

        let config = ApiConfig {
            credential: TOKEN.to_string(),
            ..ApiConfig::default()
        }
        .with_urls(
            format!("{}{PREFIX}", release.uri()),
            format!("{}{PREFIX}", dev.uri()),
        );
        let client = ApiClient::new(config).expect("client for mock environments");

        Self {
            release,
            dev,
            client,
        }
    }
}

/// Path below the mock version prefix
pub fn api_path(path: &str) -> String {
    format!("{PREFIX}{path}")
}

pub fn user_json(index: usize) -> Value {
    json!({
        "uuid": format!("00000000-0000-4000-8000-00000000000{index}"),
        "email": format!("user{index}@example.com"),
        "nickname": format!("nick{index}"),
        "name": format!("User {index}"),
        "avatar_url": format!("https://cdn.example.com/avatars/{index}.jpg"),
    })
}

pub fn game_json(index: usize) -> Value {
    json!({
        "uuid": format!("10000000-0000-4000-8000-00000000000{index}"),
        "title": format!("Game {index}"),
        "price": 1000 + index as i64 * 100,
        "category_uuids": ["20000000-0000-4000-8000-000000000000"],
    })
}

/// Client for the real environments, configured through `GAMESTORE_*`
pub fn live_client() -> ApiClient {
    init_tracing();
    ApiClient::from_env().expect("GAMESTORE_* configuration")
}

/// Everything a live scenario needs, sharing one client
#[derive(Clone)]
pub struct Live {
    pub client: ApiClient,
    pub fixtures: FixtureResolver,
    pub dual: DualEnvironment,
}

impl Live {
    pub fn connect() -> Self {
        let client = live_client();
        Self {
            fixtures: FixtureResolver::new(client.clone()),
            dual: DualEnvironment::new(client.clone()),
            client,
        }
    }

    pub fn reset_scope(&self) -> ResetScope {
        ResetScope::new(self.client.clone())
    }
}
