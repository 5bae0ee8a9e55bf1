//! Server-state resets around scenarios

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use common::{api_path, MockEnvironments};
use gamestore_common::Environment;
use gamestore_e2e::{E2eError, ErrorKind, ResetScope};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_setup(server: &MockServer, status: u16, times: u64) {
    Mock::given(method("POST"))
        .and(path(api_path("/setup")))
        .and(header("x-task-id", "setup"))
        .respond_with(ResponseTemplate::new(status))
        .expect(times)
        .mount(server)
        .await;
}

async fn setup_calls(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == api_path("/setup"))
        .count()
}

#[tokio::test]
async fn setup_runs_before_and_after_scenario() {
    let envs = MockEnvironments::start().await;
    mount_setup(&envs.release, 205, 2).await;
    mount_setup(&envs.dev, 205, 0).await;

    let scope = ResetScope::new(envs.client.clone());
    let value = scope.run(|| async { Ok(42) }).await.unwrap();

    assert_eq!(value, 42);
    assert_eq!(setup_calls(&envs.release).await, 2);
}

#[tokio::test]
async fn configured_environments_are_all_reset() {
    let envs = MockEnvironments::start().await;
    mount_setup(&envs.release, 205, 2).await;
    mount_setup(&envs.dev, 205, 2).await;

    ResetScope::new(envs.client.clone())
        .environments(&Environment::ALL)
        .run(|| async { Ok(()) })
        .await
        .unwrap();
}

#[tokio::test]
async fn failed_scenario_still_resets() {
    let envs = MockEnvironments::start().await;
    mount_setup(&envs.release, 205, 2).await;

    let err = ResetScope::new(envs.client.clone())
        .run(|| async { Err::<(), _>(E2eError::Assertion("cart not cleared".to_string())) })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Assertion);
    assert_eq!(setup_calls(&envs.release).await, 2);
}

#[tokio::test]
async fn panicking_scenario_still_resets() {
    let envs = MockEnvironments::start().await;
    mount_setup(&envs.release, 205, 2).await;

    let scope = ResetScope::new(envs.client.clone());
    let outcome = tokio::spawn(async move {
        scope
            .run(|| async {
                if true {
                    panic!("status mismatch in scenario");
                }
                Ok::<(), E2eError>(())
            })
            .await
    })
    .await;

    assert!(outcome.unwrap_err().is_panic());
    assert_eq!(setup_calls(&envs.release).await, 2);
}

#[tokio::test]
async fn failed_setup_is_precondition_and_skips_scenario() {
    let envs = MockEnvironments::start().await;
    mount_setup(&envs.release, 500, 1).await;

    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);
    let err = ResetScope::new(envs.client.clone())
        .run(move || async move {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert!(err.to_string().contains("500"));
    assert!(!ran.load(Ordering::SeqCst));
}
