//! Configuration management for the Raide clients.
//!
//! This module handles loading configuration from environment variables,
//! with validation to ensure all required values are present.

use std::env;

use crate::credentials::Credentials;
use crate::error::RaideError;
use crate::executor::normalize_base_url;

/// Default endpoint of the ticketing API.
pub const DEFAULT_BASE_URL: &str = "http://api.raide.io/1.0/";

/// Default endpoint of the traffic API.
pub const DEFAULT_TRAFFIC_BASE_URL: &str = "http://api-traffic.raide.io/1.0/";

/// Configuration for connecting to Raide.
///
/// The API secret is stored but never logged or exposed in error messages.
#[derive(Clone, Debug)]
pub struct Config {
    /// Account id, API key and API secret.
    pub credentials: Credentials,

    /// Ticketing endpoint.
    pub base_url: String,

    /// Traffic endpoint.
    pub traffic_base_url: String,

    /// Whether TLS certificates are verified (default: true).
    pub verify_certificates: bool,
}

impl Config {
    /// Creates a configuration with the default endpoints and certificate
    /// verification enabled.
    pub fn new(account_id: u64, api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(account_id, api_key, api_secret),
            base_url: DEFAULT_BASE_URL.to_string(),
            traffic_base_url: DEFAULT_TRAFFIC_BASE_URL.to_string(),
            verify_certificates: true,
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `RAIDE_ACCOUNT_ID`: Numeric account id
    /// - `RAIDE_API_KEY`: API key
    /// - `RAIDE_API_SECRET`: API secret (password)
    ///
    /// # Optional Environment Variables
    ///
    /// - `RAIDE_BASE_URL`: Ticketing endpoint (default [`DEFAULT_BASE_URL`])
    /// - `RAIDE_TRAFFIC_BASE_URL`: Traffic endpoint (default [`DEFAULT_TRAFFIC_BASE_URL`])
    /// - `RAIDE_VERIFY_CERTIFICATES`: `true`/`false` (default `true`)
    ///
    /// # Errors
    ///
    /// Returns `RaideError::Config` if any required variable is missing
    /// or if values fail validation.
    ///
    /// # Example
    ///
    /// ```ignore
    /// dotenvy::dotenv().ok();
    /// let config = Config::from_env()?;
    /// ```
    pub fn from_env() -> Result<Self, RaideError> {
        let account_id = Self::parse_account_id(&Self::get_required_env("RAIDE_ACCOUNT_ID")?)?;
        let api_key = Self::get_required_env("RAIDE_API_KEY")?;
        let api_secret = Self::get_required_env("RAIDE_API_SECRET")?;

        Self::validate_credential("RAIDE_API_KEY", &api_key)?;
        Self::validate_credential("RAIDE_API_SECRET", &api_secret)?;

        let base_url = Self::validate_base_url(
            "RAIDE_BASE_URL",
            Self::get_optional_env("RAIDE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        )?;
        let traffic_base_url = Self::validate_base_url(
            "RAIDE_TRAFFIC_BASE_URL",
            Self::get_optional_env("RAIDE_TRAFFIC_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TRAFFIC_BASE_URL.to_string()),
        )?;
        let verify_certificates = match Self::get_optional_env("RAIDE_VERIFY_CERTIFICATES") {
            Some(value) => Self::parse_bool("RAIDE_VERIFY_CERTIFICATES", &value)?,
            None => true,
        };

        Ok(Config {
            credentials: Credentials::new(account_id, api_key, api_secret),
            base_url,
            traffic_base_url,
            verify_certificates,
        })
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, RaideError> {
        Self::get_optional_env(name).ok_or_else(|| RaideError::missing_env(name))
    }

    /// Gets an optional environment variable, treating blank values as unset.
    fn get_optional_env(name: &str) -> Option<String> {
        env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn parse_account_id(value: &str) -> Result<u64, RaideError> {
        value
            .parse::<u64>()
            .map_err(|_| RaideError::invalid_config("RAIDE_ACCOUNT_ID must be a non-negative integer"))
    }

    fn parse_bool(name: &str, value: &str) -> Result<bool, RaideError> {
        match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(RaideError::invalid_config(format!(
                "{} must be true or false",
                name
            ))),
        }
    }

    /// Validates and normalizes an endpoint URL.
    fn validate_base_url(name: &str, url: String) -> Result<String, RaideError> {
        normalize_base_url(&url).map_err(|_| {
            RaideError::invalid_config(format!("{} must start with http:// or https://", name))
        })
    }

    /// Validates a key or secret is usable in the `Authentication` header and
    /// is not a placeholder value.
    fn validate_credential(name: &str, value: &str) -> Result<(), RaideError> {
        if value.contains(';') || value.contains('=') {
            return Err(RaideError::invalid_config(format!(
                "{} must not contain ';' or '='",
                name
            )));
        }

        let value_lower = value.to_lowercase();
        let placeholder_values = ["placeholder", "changeme", "change_me", "secret", "api_key"];
        let placeholder_prefixes = ["your_", "your-", "<"];

        let is_placeholder = placeholder_values.contains(&value_lower.as_str())
            || placeholder_prefixes
                .iter()
                .any(|prefix| value_lower.starts_with(prefix))
            || value_lower.chars().all(|c| c == 'x');

        if is_placeholder {
            return Err(RaideError::invalid_config(format!(
                "{} appears to be a placeholder value",
                name
            )));
        }

        Ok(())
    }
}
