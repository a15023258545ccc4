//! The JSON envelope wrapping every HTTP 200 response.

use serde::Deserialize;

use crate::error::RaideError;

/// `{error, errorDescription, result}` as returned by the Raide API.
///
/// `error == 0` means `result` is the payload and the description is
/// ignored. Any other value means the description is the failure message
/// and `result` is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Zero on success.
    pub error: i64,

    /// Failure message (present when `error != 0`).
    #[serde(rename = "errorDescription", default)]
    pub error_description: Option<String>,

    /// The payload (present when `error == 0`).
    #[serde(default)]
    pub result: serde_json::Value,
}

impl Envelope {
    /// Returns true if the envelope reports success.
    pub fn is_success(&self) -> bool {
        self.error == 0
    }

    /// Converts the envelope into the payload or the failure it reports.
    ///
    /// A failure without a description becomes `RaideError::Unknown`.
    pub fn into_result(self) -> Result<serde_json::Value, RaideError> {
        if self.is_success() {
            return Ok(self.result);
        }
        match self.error_description {
            Some(message) => Err(RaideError::service(self.error, message)),
            None => Err(RaideError::Unknown { status: 200 }),
        }
    }
}
