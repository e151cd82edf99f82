//! HTTP client for the control plane's task listing endpoint
//!
//! `GET {endpoint}/api/attempts/{attempt_id}/tasks` answers with
//! `{"tasks": [...]}`; every decoded task is validated before it is returned.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;
use tracing::debug;

use taskscope_core::{Task, TaskCollection, TaskError, TaskSource};

use crate::config::ClientConfig;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("invalid header {name}")]
    InvalidHeader { name: String },

    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request { url: Url, source: reqwest::Error },

    #[error("control plane returned {status} for {url}: {body}")]
    Status {
        url: Url,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed task listing: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Malformed(#[from] TaskError),
}

pub struct HttpTaskSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTaskSource {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| ClientError::InvalidEndpoint {
            endpoint: config.endpoint.clone(),
            reason: e.to_string(),
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(ClientError::InvalidEndpoint {
                endpoint: config.endpoint.clone(),
                reason: "not a base url".to_string(),
            });
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let invalid = || ClientError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(header_name, header_value);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { client, endpoint })
    }

    pub fn tasks_url(&self, attempt_id: &str) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "attempts", attempt_id, "tasks"]);
        }
        url
    }

    pub async fn fetch_tasks(&self, attempt_id: &str) -> Result<Vec<Task>, ClientError> {
        let url = self.tasks_url(attempt_id);
        debug!(%url, "fetching tasks");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Request {
                url: url.clone(),
                source,
            })?;

        if !status.is_success() {
            return Err(ClientError::Status { url, status, body });
        }

        decode_tasks(&body)
    }
}

#[async_trait]
impl TaskSource for HttpTaskSource {
    async fn list_tasks(&self, attempt_id: &str) -> anyhow::Result<Vec<Task>> {
        Ok(self.fetch_tasks(attempt_id).await?)
    }
}

pub fn decode_tasks(body: &str) -> Result<Vec<Task>, ClientError> {
    let collection: TaskCollection = serde_json::from_str(body)?;
    for task in &collection.tasks {
        task.validate()?;
    }
    debug!(tasks = collection.tasks.len(), "decoded task listing");
    Ok(collection.tasks)
}
