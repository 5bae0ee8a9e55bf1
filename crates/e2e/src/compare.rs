//! Running one logical request against both environments
//!
//! The comparator only orchestrates. It neither judges nor normalises the
//! two outcomes; scenarios assert on the returned pair.

use gamestore_common::{Environment, JsonBody};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::client::{ApiClient, ApiRequest};
use crate::error::E2eResult;
use crate::response::ApiResponse;

/// One value per environment
#[derive(Debug, Clone, PartialEq)]
pub struct EnvPair<T> {
    pub release: T,
    pub dev: T,
}

impl<T> EnvPair<T> {
    pub fn new(release: T, dev: T) -> Self {
        Self { release, dev }
    }

    pub fn get(&self, env: Environment) -> &T {
        match env {
            Environment::Release => &self.release,
            Environment::Dev => &self.dev,
        }
    }

    pub fn as_ref(&self) -> EnvPair<&T> {
        EnvPair::new(&self.release, &self.dev)
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> EnvPair<U> {
        EnvPair::new(f(self.release), f(self.dev))
    }

    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<EnvPair<U>, E> {
        Ok(EnvPair::new(f(self.release)?, f(self.dev)?))
    }

    pub fn into_tuple(self) -> (T, T) {
        (self.release, self.dev)
    }
}

impl EnvPair<ApiResponse> {
    pub fn statuses(&self) -> EnvPair<StatusCode> {
        EnvPair::new(self.release.status(), self.dev.status())
    }

    pub fn json(self) -> E2eResult<EnvPair<JsonBody>> {
        self.try_map(ApiResponse::json)
    }

    pub fn typed<T: DeserializeOwned>(self) -> E2eResult<EnvPair<T>> {
        self.try_map(ApiResponse::typed::<T>)
    }
}

/// Sends equivalent requests to Release and then Dev
#[derive(Clone)]
pub struct DualEnvironment {
    client: ApiClient,
}

impl DualEnvironment {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Send the same request to both environments
    pub async fn compare(&self, task_id: &str, request: ApiRequest) -> E2eResult<EnvPair<ApiResponse>> {
        self.compare_with(task_id, |_| Ok(request.clone())).await
    }

    /// Build the request per environment, e.g. to send different bodies
    pub async fn compare_with<F>(&self, task_id: &str, build: F) -> E2eResult<EnvPair<ApiResponse>>
    where
        F: Fn(Environment) -> E2eResult<ApiRequest>,
    {
        let release = self
            .client
            .send(Environment::Release, build(Environment::Release)?.task(task_id))
            .await?;
        let dev = self
            .client
            .send(Environment::Dev, build(Environment::Dev)?.task(task_id))
            .await?;
        Ok(EnvPair::new(release, dev))
    }
}
