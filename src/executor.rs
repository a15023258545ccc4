//! Authenticated HTTP dispatch.
//!
//! The executor turns a method, a relative path and optional parameters into
//! one HTTP exchange and hands back the raw status and body. It does not
//! judge the response; see [`crate::interpreter`] for that.
//!
//! # Security
//!
//! The credentials are never logged.

use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use url::Url;

use crate::credentials::{Credentials, AUTHENTICATION_HEADER};
use crate::error::RaideError;
use crate::form::FormParams;

/// User agent sent with every request.
const RAIDE_USER_AGENT: &str = "Raide/1.0 (Rust)";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Status and body of one HTTP exchange, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// Creates a raw response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends authenticated requests to one Raide endpoint.
#[derive(Clone, Debug)]
pub struct Executor {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Endpoint every path is appended to; always ends with `/`.
    base_url: String,

    credentials: Credentials,

    /// Pre-validated `Authentication` header, marked sensitive.
    auth_header: HeaderValue,
}

impl Executor {
    /// Creates an executor for `base_url`.
    ///
    /// With `verify_certificates == false` any TLS certificate is accepted.
    ///
    /// # Errors
    ///
    /// Returns `RaideError::Config` for a base URL that is not http(s),
    /// `RaideError::Validation` for credentials that cannot form a header
    /// value, and `RaideError::HttpClient` if the HTTP client fails to
    /// initialize.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        verify_certificates: bool,
    ) -> Result<Self, RaideError> {
        let base_url = normalize_base_url(base_url)?;

        let mut auth_header =
            HeaderValue::from_str(&credentials.header_value()).map_err(|_| {
                RaideError::validation(
                    "API key and secret must be visible ASCII without control characters",
                )
            })?;
        auth_header.set_sensitive(true);

        if !verify_certificates {
            tracing::warn!(base_url = %base_url, "TLS certificate verification is disabled");
        }

        let http = Client::builder()
            .danger_accept_invalid_certs(!verify_certificates)
            .build()
            .map_err(RaideError::HttpClient)?;

        Ok(Self {
            http,
            base_url,
            credentials,
            auth_header,
        })
    }

    /// The endpoint this executor talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The credentials attached to every request.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Builds the full URL for a request.
    ///
    /// For `GET` with non-empty parameters, they become the query string.
    /// Otherwise the URL carries no query at all.
    pub fn build_url(
        &self,
        method: &Method,
        path: &str,
        params: Option<&FormParams>,
    ) -> Result<Url, RaideError> {
        let joined = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&joined)
            .map_err(|e| RaideError::validation(format!("invalid request URL {:?}: {}", path, e)))?;

        if *method == Method::GET {
            if let Some(params) = params.filter(|p| !p.is_empty()) {
                url.query_pairs_mut().extend_pairs(params.iter());
            }
        }

        Ok(url)
    }

    /// Performs one request and returns the raw status and body.
    ///
    /// Non-2xx statuses are returned like any other; only a failure to get
    /// a response at all is an error. Once a status has arrived it is kept:
    /// a body that cannot be read is returned empty.
    ///
    /// # Errors
    ///
    /// Returns `RaideError::Transport` if the request could not be sent.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        params: Option<&FormParams>,
    ) -> Result<RawResponse, RaideError> {
        let url = self.build_url(&method, path, params)?;

        tracing::debug!(
            method = %method,
            path = %path,
            "Making Raide API request"
        );

        let mut req = self
            .http
            .request(method.clone(), url)
            .header(AUTHENTICATION_HEADER, self.auth_header.clone())
            .header(USER_AGENT, RAIDE_USER_AGENT);

        if method != Method::GET {
            if let Some(params) = params {
                req = req
                    .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                    .body(params.encode());
            }
        }

        let response = req.send().await.map_err(|e| {
            tracing::debug!(method = %method, path = %path, error = %e, "Raide API request failed");
            RaideError::Transport(e)
        })?;
        let status = response.status().as_u16();

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(
                    status = status,
                    error = %e,
                    "Failed to read Raide API response body"
                );
                String::new()
            }
        };

        tracing::trace!(status = status, body = %body, "Raide API response");

        Ok(RawResponse { status, body })
    }
}

/// Validates the endpoint URL and makes it end with exactly one `/`.
pub(crate) fn normalize_base_url(url: &str) -> Result<String, RaideError> {
    let url = url.trim();

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(RaideError::invalid_config(format!(
            "base URL must start with http:// or https://, got {:?}",
            url
        )));
    }

    Ok(format!("{}/", url.trim_end_matches('/')))
}
