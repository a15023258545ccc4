//! Classification of raw responses.
//!
//! The checks below form a priority chain and run in this order:
//!
//! 1. HTTP 200: the body is an [`Envelope`]; `error == 0` yields `result`,
//!    anything else yields `errorDescription`. A body that is not an
//!    envelope is an unknown error.
//! 2. HTTP 401: unauthorized.
//! 3. HTTP 403: forbidden.
//! 4. Anything else: unknown error.

use serde_json::Value;

use crate::error::RaideError;
use crate::executor::RawResponse;
use crate::models::Envelope;

/// Turns a raw response into the payload or a classified failure.
pub fn interpret(raw: RawResponse) -> Result<Value, RaideError> {
    match raw.status {
        200 => {
            let envelope: Envelope = serde_json::from_str(&raw.body).map_err(|e| {
                tracing::warn!(error = %e, "Raide API returned a malformed envelope");
                RaideError::Unknown { status: 200 }
            })?;
            envelope.into_result().inspect_err(|e| {
                tracing::debug!(error = %e, "Raide API reported an error");
            })
        }
        401 => Err(RaideError::Unauthorized),
        403 => Err(RaideError::Forbidden),
        status => {
            tracing::debug!(status = status, "Unexpected HTTP status from Raide API");
            Err(RaideError::Unknown { status })
        }
    }
}
