//! Server-state resets around destructive scenarios
//!
//! Scenarios that delete users, clear carts or create conflicting data leave
//! the remote in a state later scenarios cannot use. A [`ResetScope`] calls
//! `/setup` on the configured environments before the scenario starts and
//! again after it finishes, whether it passed, failed or panicked.

use std::future::Future;

use gamestore_common::Environment;
use reqwest::StatusCode;
use tracing::{info, warn};

use crate::client::{ApiClient, ApiRequest};
use crate::error::{E2eError, E2eResult};

/// Task tag sent with `/setup`
pub const SETUP_TASK_ID: &str = "setup";

pub struct ResetScope {
    client: ApiClient,
    environments: Vec<Environment>,
}

impl ResetScope {
    /// Reset the environments listed in `ApiConfig::reset_environments`
    pub fn new(client: ApiClient) -> Self {
        let environments = client.config().reset_environments.clone();
        Self {
            client,
            environments,
        }
    }

    pub fn environments(mut self, environments: &[Environment]) -> Self {
        self.environments = environments.to_vec();
        self
    }

    /// Restore server state. Anything but `205 Reset Content` is a failed
    /// precondition.
    pub async fn reset(&self) -> E2eResult<()> {
        for &env in &self.environments {
            let response = self
                .client
                .send(env, ApiRequest::post("/setup").task(SETUP_TASK_ID))
                .await?;
            if response.status() != StatusCode::RESET_CONTENT {
                return Err(E2eError::Precondition(format!(
                    "setup on {env} returned {}",
                    response.status()
                )));
            }
            info!(env = %env, "Server state reset");
        }
        Ok(())
    }

    /// Run a scenario between two resets.
    ///
    /// The scenario runs on its own task so a panicking assertion still
    /// reaches the trailing reset; the panic is resumed afterwards.
    pub async fn run<F, Fut, T>(&self, scenario: F) -> E2eResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = E2eResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        self.reset().await?;

        let outcome = tokio::spawn(scenario()).await;
        let after = self.reset().await;

        match outcome {
            Ok(Ok(value)) => after.map(|()| value),
            Ok(Err(e)) => {
                if let Err(reset_err) = after {
                    warn!("Reset after failed scenario also failed: {}", reset_err);
                }
                Err(e)
            }
            Err(join_err) if join_err.is_panic() => {
                if let Err(reset_err) = after {
                    warn!("Reset after panicked scenario failed: {}", reset_err);
                }
                std::panic::resume_unwind(join_err.into_panic())
            }
            Err(join_err) => Err(E2eError::Precondition(format!(
                "scenario task did not complete: {join_err}"
            ))),
        }
    }
}
