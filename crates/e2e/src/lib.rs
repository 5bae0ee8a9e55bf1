//! GameStore Release-vs-Dev Regression Harness
//!
//! This crate drives the third-party game-store HTTP API in two
//! environments and hands both outcomes to scenario code, which asserts the
//! known ways Dev diverges from Release:
//! - Builds authenticated requests (bearer credential, `X-Task-Id`, no-cache GETs, multipart uploads)
//! - Buffers and decodes responses into open JSON bodies or typed records
//! - Resolves existing users, games and categories from Release as fixtures
//! - Sends equivalent requests to both environments
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Scenario (cargo test)                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  FixtureResolver                                            │
//! │    ├── user(n) / game(n) / first_category()  (Release)      │
//! │  DualEnvironment                                            │
//! │    ├── compare(task, ApiRequest) -> EnvPair<ApiResponse>    │
//! │  ApiClient                                                  │
//! │    ├── build(env, &ApiRequest) -> reqwest::Request          │
//! │    └── send(env, ApiRequest) -> ApiResponse                 │
//! │  ApiResponse                                                │
//! │    ├── status()                                             │
//! │    ├── json() -> JsonBody                                   │
//! │    └── typed::<T>() -> T                                    │
//! │  ResetScope                                                 │
//! │    └── run(scenario)  (/setup before and after)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod client;
pub mod compare;
pub mod error;
pub mod fixtures;
pub mod response;
pub mod scenario;

pub use api::GameStore;
pub use client::{ApiClient, ApiRequest, RequestBody};
pub use compare::{DualEnvironment, EnvPair};
pub use error::{E2eError, E2eResult, ErrorKind};
pub use fixtures::{Fixture, FixtureResolver};
pub use response::ApiResponse;
pub use scenario::ResetScope;
