//! Harness configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::Environment;

/// Environment variable naming a TOML config file
pub const CONFIG_PATH_ENV: &str = "GAMESTORE_CONFIG";
pub const RELEASE_URL_ENV: &str = "GAMESTORE_RELEASE_URL";
pub const DEV_URL_ENV: &str = "GAMESTORE_DEV_URL";
pub const TOKEN_ENV: &str = "GAMESTORE_TOKEN";
pub const TIMEOUT_ENV: &str = "GAMESTORE_TIMEOUT_SECS";

/// Target environments and credential for the game-store API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the reference environment, including the version prefix
    pub release_url: String,

    /// Base URL of the candidate environment, including the version prefix
    pub dev_url: String,

    /// Bearer credential sent on every request (without the `Bearer ` prefix)
    pub credential: String,

    /// Per-request timeout. `None` leaves the HTTP client default in place.
    pub request_timeout_secs: Option<u64>,

    /// Environments reset through `/setup` around destructive scenarios
    pub reset_environments: Vec<Environment>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            release_url: "https://release-gs.qa-playground.com/api/v1".to_string(),
            dev_url: "https://dev-gs.qa-playground.com/api/v1".to_string(),
            credential: "qahack2024:tester@example.com".to_string(),
            request_timeout_secs: None,
            reset_environments: vec![Environment::Release],
        }
    }
}

impl ApiConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            debug!("No config at {}, using defaults", path.display());
            Self::default()
        };
        config.normalized().validated()
    }

    /// Load configuration from `GAMESTORE_CONFIG` (if set) and apply the
    /// individual `GAMESTORE_*` overrides on top
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.normalized().validated()
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Base URL for an environment
    pub fn base_url(&self, env: Environment) -> &str {
        match env {
            Environment::Release => &self.release_url,
            Environment::Dev => &self.dev_url,
        }
    }

    /// Value of the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.credential)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Point both environments somewhere else, e.g. at local mock servers
    pub fn with_urls(mut self, release_url: impl Into<String>, dev_url: impl Into<String>) -> Self {
        self.release_url = release_url.into();
        self.dev_url = dev_url.into();
        self.normalized()
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("release_url", &self.release_url), ("dev_url", &self.dev_url)] {
            if url.is_empty() {
                return Err(Error::InvalidConfig(format!("{name} must not be empty")));
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be an http(s) URL, got {url}"
                )));
            }
        }
        if self.credential.trim().is_empty() {
            return Err(Error::InvalidConfig("credential must not be empty".to_string()));
        }
        Ok(())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(RELEASE_URL_ENV) {
            self.release_url = url;
        }
        if let Some(url) = lookup(DEV_URL_ENV) {
            self.dev_url = url;
        }
        if let Some(token) = lookup(TOKEN_ENV) {
            self.credential = token;
        }
        if let Some(secs) = lookup(TIMEOUT_ENV) {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                Error::InvalidConfig(format!("{TIMEOUT_ENV} must be a number of seconds, got {secs}"))
            })?;
            self.request_timeout_secs = Some(secs);
        }
        Ok(())
    }

    fn normalized(mut self) -> Self {
        let trim = |s: &mut String| {
            while s.ends_with('/') {
                s.pop();
            }
        };
        trim(&mut self.release_url);
        trim(&mut self.dev_url);
        self
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}
