//! Client for the Raide ticketing API.
//!
//! Every operation follows the same pipeline: build the call from its
//! recipe in [`crate::params`], send it with the [`Executor`], and classify
//! the response with [`interpret`]. Failures are returned unchanged; nothing
//! is retried.

use serde_json::Value;

use crate::config::{Config, DEFAULT_BASE_URL};
use crate::credentials::Credentials;
use crate::error::RaideError;
use crate::executor::Executor;
use crate::interpreter::interpret;
use crate::models::{DataType, NewTicket, SearchParams, TicketId, TicketRef, TicketStatus};
use crate::params::{self, Call};

/// Sends a call and classifies the response.
pub(crate) async fn dispatch(executor: &Executor, call: Call) -> Result<Value, RaideError> {
    let raw = executor
        .execute(call.method, &call.path, call.params.as_ref())
        .await?;
    interpret(raw)
}

/// Client for ticket operations.
///
/// # Example
///
/// ```ignore
/// let client = RaideClient::new(7, "api-key", "api-secret")?;
///
/// let ticket = client.get(&TicketRef::Internal(42), DataType::Json).await?;
/// client.comment(42, "Fixed in 1.4.2").await?;
/// client.update(42, TicketStatus::Solved).await?;
/// ```
#[derive(Clone, Debug)]
pub struct RaideClient {
    executor: Executor,
}

impl RaideClient {
    /// Creates a client for the default ticketing endpoint.
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
            executor: Executor::new(DEFAULT_BASE_URL, credentials, true)?,
        })
    }

    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `RaideError::Config` for an invalid endpoint,
    /// `RaideError::Validation` for credentials unusable in a header and
    /// `RaideError::HttpClient` if the HTTP client fails to initialize.
    pub fn from_config(config: &Config) -> Result<Self, RaideError> {
        Ok(Self {
            executor: Executor::new(
                &config.base_url,
                config.credentials.clone(),
                config.verify_certificates,
            )?,
        })
    }

    /// The endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        self.executor.base_url()
    }

    /// Values that must never appear in user-facing output.
    pub(crate) fn secrets(&self) -> [&str; 2] {
        self.executor.credentials().secrets()
    }

    /// Tests connectivity and credentials with a one-result search.
    ///
    /// # Errors
    ///
    /// Returns `RaideError::ConnectionTest` describing the likely cause.
    pub async fn test_connection(&self) -> Result<(), RaideError> {
        tracing::debug!("Testing connection to Raide API");

        match self.search(&SearchParams::new().with_limit(1)).await {
            Ok(_) => {
                tracing::info!("Connection test successful");
                Ok(())
            }
            Err(RaideError::Unauthorized) | Err(RaideError::Forbidden) => {
                Err(RaideError::connection_test(
                    "Authentication failed - verify RAIDE_ACCOUNT_ID, RAIDE_API_KEY and RAIDE_API_SECRET",
                ))
            }
            Err(RaideError::Transport(e)) => {
                let message = RaideError::sanitize_message(&e.to_string(), &self.secrets());
                Err(RaideError::connection_test(format!(
                    "HTTP error: {} - verify RAIDE_BASE_URL is correct and the server is reachable",
                    message
                )))
            }
            Err(e) => Err(RaideError::connection_test(
                e.sanitized_display(&self.secrets()),
            )),
        }
    }

    /// Retrieves a ticket.
    ///
    /// # Errors
    ///
    /// Returns `RaideError::Validation` for an unusable external id, otherwise
    /// whatever the service reports.
    pub async fn get(&self, ticket: &TicketRef, datatype: DataType) -> Result<Value, RaideError> {
        dispatch(&self.executor, params::get(ticket, datatype)?).await
    }

    /// Searches tickets. Only allow-listed filters are sent.
    pub async fn search(&self, filters: &SearchParams) -> Result<Value, RaideError> {
        dispatch(&self.executor, params::search(filters)).await
    }

    /// Submits a new ticket.
    pub async fn submit(&self, ticket: &NewTicket) -> Result<Value, RaideError> {
        dispatch(&self.executor, params::submit(ticket)).await
    }

    /// Sets the status of a ticket, addressed by its service-assigned id.
    pub async fn update(&self, id: TicketId, status: TicketStatus) -> Result<Value, RaideError> {
        dispatch(&self.executor, params::update(id, status)).await
    }

    /// Deletes a ticket.
    ///
    /// # Errors
    ///
    /// Returns `RaideError::Validation` for an unusable external id, otherwise
    /// whatever the service reports.
    pub async fn delete(&self, ticket: &TicketRef) -> Result<Value, RaideError> {
        dispatch(&self.executor, params::delete(ticket)?).await
    }

    /// Posts a comment on a ticket, addressed by its service-assigned id.
    pub async fn comment(&self, id: TicketId, comment: &str) -> Result<Value, RaideError> {
        dispatch(&self.executor, params::comment(id, comment)).await
    }
}
