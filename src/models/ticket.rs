//! Ticket models for the Raide API.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Requester, ServerContext};
use crate::error::RaideError;

/// Numeric ticket id assigned by the service.
pub type TicketId = u64;

/// Addresses a ticket either by its service-assigned id or by the id the
/// caller attached when submitting it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TicketRef {
    /// The service's numeric id.
    Internal(TicketId),
    /// A caller-chosen id (the `external_id` given at submit time).
    External(String),
}

impl TicketRef {
    /// Creates a reference by external id.
    pub fn external(id: impl Into<String>) -> Self {
        TicketRef::External(id.into())
    }

    /// Returns true for [`TicketRef::External`].
    pub fn is_external(&self) -> bool {
        matches!(self, TicketRef::External(_))
    }

    /// Renders the path suffix for this reference: `/external/<id>` or `/<id>`.
    ///
    /// External ids are percent-encoded so they always occupy a single path
    /// segment.
    ///
    /// # Errors
    ///
    /// Returns `RaideError::Validation` for an empty external id, or one that
    /// is exactly `.` or `..`.
    pub fn path_suffix(&self) -> Result<String, RaideError> {
        match self {
            TicketRef::Internal(id) => Ok(format!("/{}", id)),
            TicketRef::External(id) => {
                if id.is_empty() {
                    return Err(RaideError::validation("external ticket id must not be empty"));
                }
                // Dot segments would be collapsed by URL normalization
                if id == "." || id == ".." {
                    return Err(RaideError::validation(format!(
                        "external ticket id {:?} is not a valid path segment",
                        id
                    )));
                }
                Ok(format!("/external/{}", urlencoding::encode(id)))
            }
        }
    }
}

impl From<TicketId> for TicketRef {
    fn from(id: TicketId) -> Self {
        TicketRef::Internal(id)
    }
}

impl fmt::Display for TicketRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketRef::Internal(id) => write!(f, "#{}", id),
            TicketRef::External(id) => write!(f, "external:{}", id),
        }
    }
}

/// Representation the service renders a fetched ticket in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Structured JSON (default).
    #[default]
    Json,
    /// Plain text.
    Text,
}

impl DataType {
    /// Path segment for this data type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Json => "json",
            DataType::Text => "text",
        }
    }
}

/// Ticket status as understood by the `update` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Awaiting triage.
    Pending,
    /// Being worked on.
    Open,
    /// Resolved.
    Solved,
}

impl TicketStatus {
    /// Wire code: 1 = Pending, 2 = Open, 3 = Solved.
    pub fn code(&self) -> u8 {
        match self {
            TicketStatus::Pending => 1,
            TicketStatus::Open => 2,
            TicketStatus::Solved => 3,
        }
    }
}

/// A ticket to submit.
///
/// `summary` is the pre-encoded (base64) page summary produced by the
/// browser-side Raide script; it is sent untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    /// Base64-encoded summary.
    pub summary: String,
    /// Short subject line.
    pub subject: String,
    /// Longer description of the problem.
    pub description: String,
    /// Who reported it.
    pub requester: Requester,
    /// Optional id linking the ticket to another system.
    pub external_id: Option<String>,
    /// Request/environment context captured by the caller.
    pub server: ServerContext,
}

impl NewTicket {
    /// Creates a ticket with no external id and an empty server context.
    pub fn new(
        summary: impl Into<String>,
        subject: impl Into<String>,
        description: impl Into<String>,
        requester: Requester,
    ) -> Self {
        Self {
            summary: summary.into(),
            subject: subject.into(),
            description: description.into(),
            requester,
            external_id: None,
            server: ServerContext::new(),
        }
    }

    /// Sets the external id.
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Sets the server context.
    pub fn with_server(mut self, server: ServerContext) -> Self {
        self.server = server;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_path_suffix() {
        assert_eq!(TicketRef::Internal(42).path_suffix().unwrap(), "/42");
    }

    #[test]
    fn test_external_path_suffix() {
        assert_eq!(
            TicketRef::external("ext-1").path_suffix().unwrap(),
            "/external/ext-1"
        );
    }

    #[test]
    fn test_external_path_suffix_encodes_separators() {
        assert_eq!(
            TicketRef::external("../a b/c").path_suffix().unwrap(),
            "/external/..%2Fa%20b%2Fc"
        );
    }

    #[test]
    fn test_empty_external_id_rejected() {
        let err = TicketRef::external("").path_suffix().unwrap_err();
        assert!(matches!(err, RaideError::Validation(_)));
    }

    #[test]
    fn test_dot_segment_external_id_rejected() {
        assert!(TicketRef::external("..").path_suffix().is_err());
        assert!(TicketRef::external(".").path_suffix().is_err());
        assert!(TicketRef::external("v1.2").path_suffix().is_ok());
    }

    #[test]
    fn test_ticket_ref_display() {
        assert_eq!(TicketRef::from(9).to_string(), "#9");
        assert_eq!(TicketRef::external("crm-7").to_string(), "external:crm-7");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(TicketStatus::Pending.code(), 1);
        assert_eq!(TicketStatus::Open.code(), 2);
        assert_eq!(TicketStatus::Solved.code(), 3);
    }

    #[test]
    fn test_data_type_default_is_json() {
        assert_eq!(DataType::default().as_str(), "json");
        assert_eq!(DataType::Text.as_str(), "text");
    }

    #[test]
    fn test_new_ticket_builder() {
        let ticket = NewTicket::new("c3VtbWFyeQ==", "Broken", "It broke", Requester::email("a@b.c"))
            .with_external_id("crm-1");
        assert_eq!(ticket.external_id.as_deref(), Some("crm-1"));
        assert!(ticket.server.is_empty());
    }
}
