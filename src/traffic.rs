//! Client for the Raide traffic API.
//!
//! The traffic endpoint accepts queue batches recorded by the Raide logger.
//! It shares the ticketing client's pipeline; only the endpoint and the
//! single operation differ.

use serde_json::Value;

use crate::client::dispatch;
use crate::config::{Config, DEFAULT_TRAFFIC_BASE_URL};
use crate::credentials::Credentials;
use crate::error::RaideError;
use crate::executor::Executor;
use crate::models::Requester;
use crate::params;

/// Client for submitting traffic queues.
#[derive(Clone)]
pub struct TrafficClient {
    executor: Executor,
}

impl TrafficClient {
    /// Creates a client for the default traffic endpoint.
    ///
    /// # Errors
    ///
    /// Returns `RaideError::Validation` if the key or password cannot be sent
    /// in a header, and `RaideError::HttpClient` if the HTTP client fails to
    /// initialize.
    pub fn new(
        account_id: u64,
        api_key: impl Into<String>,
        api_password: impl Into<String>,
    ) -> Result<Self, RaideError> {
        let credentials = Credentials::new(account_id, api_key, api_password);
        Ok(Self {
            executor: Executor::new(DEFAULT_TRAFFIC_BASE_URL, credentials, true)?,
        })
    }

    /// Creates a client from configuration, using its traffic endpoint.
    pub fn from_config(config: &Config) -> Result<Self, RaideError> {
        Ok(Self {
            executor: Executor::new(
                &config.traffic_base_url,
                config.credentials.clone(),
                config.verify_certificates,
            )?,
        })
    }

    /// The endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        self.executor.base_url()
    }

    /// Submits a queue.
    ///
    /// `queue` is the base64-encoded batch produced by the Raide logger and
    /// is sent as-is.
    pub async fn submit(&self, requester: &Requester, queue: &str) -> Result<Value, RaideError> {
        dispatch(&self.executor, params::submit_queue(requester, queue)).await
    }
}
