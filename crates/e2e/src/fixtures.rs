//! Fixture resolution against the reference environment
//!
//! Scenarios seed their inputs with entities that already exist in Release:
//! the Nth user, the Nth game, the first category. Every lookup re-fetches
//! the full list; nothing is cached.
//!
//! Indexing assumes Release lists entities in a stable order between calls
//! within a run. The remote never promises this, so a reordered list shows up
//! as a flaky scenario rather than a harness error.

use gamestore_common::{Category, Environment, Game, User};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::client::{ApiClient, ApiRequest};
use crate::error::{E2eError, E2eResult};

/// An entity kind that can be listed and indexed
pub trait Fixture: DeserializeOwned {
    /// Collection name: both the list path and the response field
    const COLLECTION: &'static str;

    /// Task tag sent with the list request
    const TASK_ID: &'static str;

    fn uuid(&self) -> &str;
}

impl Fixture for User {
    const COLLECTION: &'static str = "users";
    const TASK_ID: &'static str = "api-6";

    fn uuid(&self) -> &str {
        &self.uuid
    }
}

impl Fixture for Game {
    const COLLECTION: &'static str = "games";
    const TASK_ID: &'static str = "api-9";

    fn uuid(&self) -> &str {
        &self.uuid
    }
}

impl Fixture for Category {
    const COLLECTION: &'static str = "categories";
    const TASK_ID: &'static str = "api-10";

    fn uuid(&self) -> &str {
        &self.uuid
    }
}

/// Resolves existing entities from the reference environment
#[derive(Clone)]
pub struct FixtureResolver {
    client: ApiClient,
}

impl FixtureResolver {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn user(&self, index: usize) -> E2eResult<User> {
        self.nth(index).await
    }

    pub async fn game(&self, index: usize) -> E2eResult<Game> {
        self.nth(index).await
    }

    pub async fn first_category(&self) -> E2eResult<Category> {
        self.nth(0).await
    }

    /// The entity at `index` of the default listing
    pub async fn nth<F: Fixture>(&self, index: usize) -> E2eResult<F> {
        let items = self.list::<F>().await?;
        if items.is_empty() {
            return Err(E2eError::Precondition(format!(
                "no {} found in release",
                F::COLLECTION
            )));
        }
        let len = items.len();
        let item = items.into_iter().nth(index).ok_or_else(|| {
            E2eError::Precondition(format!(
                "{} index {index} out of range ({len} available)",
                F::COLLECTION
            ))
        })?;
        parse_fixture(item, index)
    }

    /// Every entity of the default listing, each checked for a UUID
    pub async fn all<F: Fixture>(&self) -> E2eResult<Vec<F>> {
        self.list::<F>()
            .await?
            .into_iter()
            .enumerate()
            .map(|(index, item)| parse_fixture(item, index))
            .collect()
    }

    async fn list<F: Fixture>(&self) -> E2eResult<Vec<Value>> {
        let request = ApiRequest::get(format!("/{}", F::COLLECTION)).task(F::TASK_ID);
        let response = self.client.send(Environment::Release, request).await?;
        let status = response.status();

        let body = response.json().map_err(|e| {
            E2eError::Precondition(format!(
                "{} list (status {status}) could not be decoded: {e}",
                F::COLLECTION
            ))
        })?;
        let items = body.array(F::COLLECTION).map_err(|e| {
            E2eError::Precondition(format!(
                "{} list (status {status}) is unusable: {e}",
                F::COLLECTION
            ))
        })?;

        debug!(collection = F::COLLECTION, count = items.len(), "Fetched fixture list");
        Ok(items.to_vec())
    }
}

fn parse_fixture<F: Fixture>(item: Value, index: usize) -> E2eResult<F> {
    let fixture: F = serde_json::from_value(item).map_err(|e| {
        E2eError::Precondition(format!("{} #{index} is malformed: {e}", F::COLLECTION))
    })?;
    if fixture.uuid().trim().is_empty() {
        return Err(E2eError::Precondition(format!(
            "{} #{index} has no uuid",
            F::COLLECTION
        )));
    }
    Ok(fixture)
}
