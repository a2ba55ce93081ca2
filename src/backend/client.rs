use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{Payload, Record, Resource};

/// Errors that can occur while talking to the REST backend.
#[derive(Debug)]
pub enum BackendError {
    /// Backend misconfigured (bad base URL, client could not be built).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Server answered with a non-success status.
    Api { status: u16, message: String },
    /// The response body did not decode into the expected records.
    Parse(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Config(msg) => write!(f, "config error: {msg}"),
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Human-readable location of the backend, shown in the title bar.
    fn name(&self) -> &str;

    /// Fetches every record of a resource.
    async fn list(&self, resource: Resource) -> Result<Vec<Record>, BackendError>;

    /// Creates a new record from the payload.
    async fn create(&self, payload: &Payload) -> Result<(), BackendError>;

    /// Replaces the record with the given id.
    async fn update(&self, id: i64, payload: &Payload) -> Result<(), BackendError>;

    /// Deletes the record with the given id.
    async fn delete(&self, resource: Resource, id: i64) -> Result<(), BackendError>;
}

/// JSON-over-HTTP backend with Django REST style routes:
/// collections at `{base}/{Endpoint}/`, members at `{base}/{Endpoint}/{id}/`.
pub struct RestBackend {
    base_url: String,
    client: reqwest::Client,
}

impl RestBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(BackendError::Config(format!(
                "base URL must start with http:// or https:// (got '{base_url}')"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;

        info!("REST backend at {} (timeout {:?})", base_url, timeout);
        Ok(Self { base_url, client })
    }

    fn collection_url(&self, resource: Resource) -> String {
        format!("{}/{}/", self.base_url, resource.endpoint())
    }

    fn member_url(&self, resource: Resource, id: i64) -> String {
        format!("{}/{}/{}/", self.base_url, resource.endpoint(), id)
    }

    /// Sends a request and maps transport failures and non-2xx statuses to errors.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        debug!("Backend response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend API error: {} - {}", status, err_body);
            return Err(BackendError::Api {
                status,
                message: err_body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl Backend for RestBackend {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn list(&self, resource: Resource) -> Result<Vec<Record>, BackendError> {
        let url = self.collection_url(resource);
        debug!("GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let records = Record::parse_list(resource, &body).map_err(|e| {
            warn!("Could not decode {} list: {}", resource, e);
            BackendError::Parse(e.to_string())
        })?;
        info!("Fetched {} {}", records.len(), resource.plural());
        Ok(records)
    }

    async fn create(&self, payload: &Payload) -> Result<(), BackendError> {
        let url = self.collection_url(payload.resource());
        debug!("POST {}", url);
        self.send(self.client.post(&url).json(payload)).await?;
        info!("Created {}", payload.resource().singular());
        Ok(())
    }

    async fn update(&self, id: i64, payload: &Payload) -> Result<(), BackendError> {
        let url = self.member_url(payload.resource(), id);
        debug!("PUT {}", url);
        self.send(self.client.put(&url).json(payload)).await?;
        info!("Updated {} {}", payload.resource().singular(), id);
        Ok(())
    }

    async fn delete(&self, resource: Resource, id: i64) -> Result<(), BackendError> {
        let url = self.member_url(resource, id);
        debug!("DELETE {}", url);
        self.send(self.client.delete(&url)).await?;
        info!("Deleted {} {}", resource.singular(), id);
        Ok(())
    }
}
