//! Authenticated request construction and dispatch
//!
//! Every request carries the configured bearer credential and an
//! `X-Task-Id` correlation tag. GET requests additionally disable caching and
//! never carry a body. File bodies are sent as a multipart form with a single
//! `avatar_file` field.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gamestore_common::{ApiConfig, Environment, Page};
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, EXPIRES, PRAGMA};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Request, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{E2eError, E2eResult};
use crate::response::ApiResponse;

/// Correlation header set on every call
pub const TASK_ID_HEADER: &str = "x-task-id";

/// Multipart field used for avatar uploads
pub const UPLOAD_FIELD: &str = "avatar_file";

/// Body of an outgoing request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Already-encoded JSON document
    Json(Value),
    /// File uploaded as multipart form data. A missing path is replaced by
    /// an empty scratch file.
    File(PathBuf),
}

/// A request template, independent of the environment it is sent to
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the environment's base URL, e.g. `/users/{uuid}/cart`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub task_id: String,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            task_id: String::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Set the `X-Task-Id` tag
    pub fn task(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = task_id.into();
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn page(self, page: Page) -> Self {
        self.query("offset", page.offset).query("limit", page.limit)
    }

    /// Attach a JSON body. Encoding happens here so an unserialisable body
    /// fails before anything is sent.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> E2eResult<Self> {
        let value = serde_json::to_value(body).map_err(E2eError::Encode)?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.body = RequestBody::File(path.into());
        self
    }
}

/// HTTP client bound to a pair of environments and a credential
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ApiConfig>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> E2eResult<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Build a client from `GAMESTORE_*` environment configuration
    pub fn from_env() -> E2eResult<Self> {
        Self::new(ApiConfig::from_env()?)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Absolute URL of `path` in `env`
    pub fn url(&self, env: Environment, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url(env),
            path.trim_start_matches('/')
        )
    }

    /// Render a request without sending it. File bodies are only rendered by
    /// [`ApiClient::send`], which owns the upload's lifetime.
    pub fn build(&self, env: Environment, request: &ApiRequest) -> E2eResult<Request> {
        let builder = self.builder(env, request)?;
        let builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => {
                let bytes = serde_json::to_vec(value).map_err(E2eError::Encode)?;
                builder.header(CONTENT_TYPE, "application/json").body(bytes)
            }
            RequestBody::File(_) => {
                return Err(E2eError::Construction(
                    "file bodies can only be rendered when sending".to_string(),
                ))
            }
        };
        builder.build().map_err(|e| E2eError::Construction(e.to_string()))
    }

    /// Send a request and buffer its response
    pub async fn send(&self, env: Environment, request: ApiRequest) -> E2eResult<ApiResponse> {
        debug!(
            env = %env,
            method = %request.method,
            path = %request.path,
            task = %request.task_id,
            "Sending request"
        );

        let response = match &request.body {
            RequestBody::File(path) => {
                let upload = Upload::open(path).await?;
                let rendered = self
                    .builder(env, &request)?
                    .multipart(upload.form()?)
                    .build()
                    .map_err(|e| E2eError::Construction(e.to_string()))?;
                let response = self.http.execute(rendered).await?;
                // The scratch file, if any, is removed when `upload` drops.
                ApiResponse::read(response).await?
            }
            _ => {
                let rendered = self.build(env, &request)?;
                ApiResponse::read(self.http.execute(rendered).await?).await?
            }
        };

        debug!(env = %env, status = %response.status(), task = %request.task_id, "Response received");
        Ok(response)
    }

    fn builder(&self, env: Environment, request: &ApiRequest) -> E2eResult<RequestBuilder> {
        if request.task_id.trim().is_empty() {
            return Err(E2eError::Construction(format!(
                "{} {} has no task id",
                request.method, request.path
            )));
        }
        if request.method == Method::GET && request.body != RequestBody::Empty {
            return Err(E2eError::Construction(format!(
                "GET {} must not carry a body",
                request.path
            )));
        }

        let mut builder = self
            .http
            .request(request.method.clone(), self.url(env, &request.path))
            .header(AUTHORIZATION, self.config.authorization())
            .header(TASK_ID_HEADER, request.task_id.as_str());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if request.method == Method::GET {
            builder = builder
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache")
                .header(EXPIRES, "0");
        }

        Ok(builder)
    }
}

/// File contents staged for a multipart upload
struct Upload {
    file_name: String,
    content: Vec<u8>,
    // Held until the request completes; dropping it deletes the file.
    _scratch: Option<NamedTempFile>,
}

impl Upload {
    async fn open(path: &Path) -> E2eResult<Self> {
        match tokio::fs::metadata(path).await {
            Ok(_) => {
                let content = tokio::fs::read(path).await?;
                Ok(Self {
                    file_name: file_name_of(path),
                    content,
                    _scratch: None,
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let scratch = tempfile::Builder::new()
                    .prefix("empty-avatar-")
                    .suffix(".jpg")
                    .tempfile()?;
                warn!(
                    "Upload source {} does not exist, sending empty {}",
                    path.display(),
                    scratch.path().display()
                );
                let content = tokio::fs::read(scratch.path()).await?;
                Ok(Self {
                    file_name: file_name_of(scratch.path()),
                    content,
                    _scratch: Some(scratch),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn form(&self) -> E2eResult<Form> {
        let part = Part::bytes(self.content.clone())
            .file_name(self.file_name.clone())
            .mime_str("application/octet-stream")
            .map_err(|e| E2eError::Construction(e.to_string()))?;
        Ok(Form::new().part(UPLOAD_FIELD, part))
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}
