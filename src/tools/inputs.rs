//! Tool input parameter structs for MCP tools.
//!
//! This module defines the input types for each MCP tool, with
//! JSON Schema derivation for MCP tool discovery.
//!
//! # Input Sanitization
//!
//! All input structs implement `sanitize()` which trims whitespace
//! from string fields. This should be called before processing input.

use std::collections::BTreeMap;

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;

use crate::models::{
    DataType, NewTicket, Requester, SearchParams, ServerContext, SortOrder, TicketRef,
    TicketStatus,
};

/// Helper function to trim an optional string.
fn trim_option(s: &Option<String>) -> Option<String> {
    s.as_ref().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Resolves exactly one of a numeric id and an external id.
fn resolve_ticket_ref(
    ticket_id: Option<u64>,
    external_id: &Option<String>,
) -> Result<TicketRef, String> {
    match (ticket_id, external_id) {
        (Some(id), None) => Ok(TicketRef::Internal(id)),
        (None, Some(external)) => Ok(TicketRef::external(external.clone())),
        (Some(_), Some(_)) => Err("Provide either ticket_id or external_id, not both.".to_string()),
        (None, None) => Err("Either ticket_id or external_id is required.".to_string()),
    }
}

/// Input parameters for the get_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTicketInput {
    /// Numeric ticket ID assigned by Raide.
    #[serde(default)]
    pub ticket_id: Option<u64>,

    /// External ID given when the ticket was submitted (use instead of ticket_id).
    #[serde(default)]
    pub external_id: Option<String>,

    /// Response format: 'json' (default) or 'text'.
    #[serde(default)]
    pub format: Option<String>,
}

impl GetTicketInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            ticket_id: self.ticket_id,
            external_id: trim_option(&self.external_id),
            format: trim_option(&self.format),
        }
    }

    /// The ticket this input addresses.
    pub fn ticket_ref(&self) -> Result<TicketRef, String> {
        resolve_ticket_ref(self.ticket_id, &self.external_id)
    }

    /// The requested data type.
    pub fn data_type(&self) -> Result<DataType, String> {
        match self.format.as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("json") => Ok(DataType::Json),
            Some("text") => Ok(DataType::Text),
            Some(other) => Err(format!("Unknown format '{}': use 'json' or 'text'.", other)),
        }
    }
}

/// Input parameters for the search_tickets tool.
///
/// All fields are optional - use them to filter the results.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchTicketsInput {
    /// Free-text search query.
    #[serde(default)]
    pub search: Option<String>,

    /// Filter by status code (1 = Pending, 2 = Open, 3 = Solved).
    #[serde(default)]
    pub status: Option<String>,

    /// Only tickets created after this time.
    #[serde(default)]
    pub start_time: Option<String>,

    /// Only tickets created before this time.
    #[serde(default)]
    pub end_time: Option<String>,

    /// Field to sort by.
    #[serde(default)]
    pub sort_by: Option<String>,

    /// Sort order: 'asc' or 'desc'.
    #[serde(default)]
    pub sort_order: Option<String>,

    /// Maximum number of tickets per page (default: 20, max: 100).
    #[serde(default)]
    pub limit: Option<u32>,

    /// Page number, starting at 1.
    #[serde(default)]
    pub page: Option<u32>,
}

impl SearchTicketsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            search: trim_option(&self.search),
            status: trim_option(&self.status),
            start_time: trim_option(&self.start_time),
            end_time: trim_option(&self.end_time),
            sort_by: trim_option(&self.sort_by),
            sort_order: trim_option(&self.sort_order),
            limit: self.limit,
            page: self.page,
        }
    }

    /// Converts to search parameters, applying the default and maximum limit.
    pub fn to_search_params(&self) -> Result<SearchParams, String> {
        let mut params = SearchParams::new().with_limit(self.limit.unwrap_or(20).min(100));

        if let Some(ref search) = self.search {
            params = params.with_search(search.as_str());
        }
        if let Some(ref status) = self.status {
            params = params.with_status(status.as_str());
        }
        if let Some(ref start_time) = self.start_time {
            params = params.with_start_time(start_time.as_str());
        }
        if let Some(ref end_time) = self.end_time {
            params = params.with_end_time(end_time.as_str());
        }
        if let Some(ref sort_by) = self.sort_by {
            params = params.with_sort_by(sort_by.as_str());
        }
        if let Some(ref sort_order) = self.sort_order {
            let order = match sort_order.to_ascii_lowercase().as_str() {
                "asc" => SortOrder::Asc,
                "desc" => SortOrder::Desc,
                other => {
                    return Err(format!(
                        "Unknown sort_order '{}': use 'asc' or 'desc'.",
                        other
                    ))
                }
            };
            params = params.with_sort_order(order);
        }
        if let Some(page) = self.page {
            params = params.with_page(page);
        }

        Ok(params)
    }
}

/// Input parameters for the submit_ticket tool.
///
/// Subject, description and a requester e-mail are required.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SubmitTicketInput {
    /// Short subject describing the problem.
    pub subject: String,

    /// Detailed description of the problem.
    pub description: String,

    /// E-mail address of the person reporting the problem.
    pub requester_email: String,

    /// Name of the person reporting the problem.
    #[serde(default)]
    pub requester_name: Option<String>,

    /// ID of the person reporting the problem in your own system.
    #[serde(default)]
    pub requester_id: Option<String>,

    /// Base64-encoded page summary captured by the Raide browser script.
    #[serde(default)]
    pub summary: Option<String>,

    /// Optional ID linking this ticket to a record in another system.
    #[serde(default)]
    pub external_id: Option<String>,

    /// Request context (for example HTTP headers) to attach to the ticket.
    #[serde(default)]
    pub server: Option<BTreeMap<String, String>>,
}

impl SubmitTicketInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            subject: self.subject.trim().to_string(),
            description: self.description.trim().to_string(),
            requester_email: self.requester_email.trim().to_string(),
            requester_name: trim_option(&self.requester_name),
            requester_id: trim_option(&self.requester_id),
            summary: trim_option(&self.summary),
            external_id: trim_option(&self.external_id),
            server: self.server,
        }
    }

    /// The requester: a plain e-mail unless a name or id was given.
    pub fn requester(&self) -> Requester {
        if self.requester_name.is_none() && self.requester_id.is_none() {
            return Requester::email(self.requester_email.as_str());
        }
        Requester::Profile {
            id: self.requester_id.clone(),
            email: Some(self.requester_email.clone()),
            name: self.requester_name.clone(),
        }
    }

    /// Converts to the ticket to submit.
    pub fn to_new_ticket(&self) -> NewTicket {
        let mut ticket = NewTicket::new(
            self.summary.clone().unwrap_or_default(),
            self.subject.as_str(),
            self.description.as_str(),
            self.requester(),
        )
        .with_server(self.server.clone().unwrap_or_else(ServerContext::new));
        ticket.external_id = self.external_id.clone();
        ticket
    }
}

/// Input parameters for the update_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTicketInput {
    /// Numeric ticket ID assigned by Raide.
    pub ticket_id: u64,

    /// New status: 'pending', 'open' or 'solved' (or 1, 2, 3).
    pub status: String,
}

impl UpdateTicketInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            ticket_id: self.ticket_id,
            status: self.status.trim().to_string(),
        }
    }

    /// Parses the requested status.
    pub fn ticket_status(&self) -> Result<TicketStatus, String> {
        match self.status.to_ascii_lowercase().as_str() {
            "1" | "pending" => Ok(TicketStatus::Pending),
            "2" | "open" => Ok(TicketStatus::Open),
            "3" | "solved" => Ok(TicketStatus::Solved),
            other => Err(format!(
                "Unknown status '{}': use 'pending', 'open' or 'solved'.",
                other
            )),
        }
    }
}

/// Input parameters for the delete_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteTicketInput {
    /// Numeric ticket ID assigned by Raide.
    #[serde(default)]
    pub ticket_id: Option<u64>,

    /// External ID given when the ticket was submitted (use instead of ticket_id).
    #[serde(default)]
    pub external_id: Option<String>,
}

impl DeleteTicketInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            ticket_id: self.ticket_id,
            external_id: trim_option(&self.external_id),
        }
    }

    /// The ticket this input addresses.
    pub fn ticket_ref(&self) -> Result<TicketRef, String> {
        resolve_ticket_ref(self.ticket_id, &self.external_id)
    }
}

/// Input parameters for the comment_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CommentTicketInput {
    /// Numeric ticket ID assigned by Raide.
    pub ticket_id: u64,

    /// The comment text.
    pub comment: String,
}

impl CommentTicketInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            ticket_id: self.ticket_id,
            comment: self.comment.trim().to_string(),
        }
    }
}

/// Input parameters for the submit_traffic tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SubmitTrafficInput {
    /// E-mail address the queue is submitted for.
    pub requester_email: String,

    /// Base64-encoded queue produced by the Raide logger.
    pub queue: String,
}

impl SubmitTrafficInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            requester_email: self.requester_email.trim().to_string(),
            queue: self.queue.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trim_option() {
        assert_eq!(trim_option(&Some("  x ".to_string())), Some("x".to_string()));
        assert_eq!(trim_option(&Some("   ".to_string())), None);
        assert_eq!(trim_option(&None), None);
    }

    #[test]
    fn test_get_input_ticket_ref() {
        let input: GetTicketInput = serde_json::from_str(r#"{"ticket_id": 42}"#).unwrap();
        assert_eq!(input.ticket_ref().unwrap(), TicketRef::Internal(42));

        let input: GetTicketInput =
            serde_json::from_str(r#"{"external_id": "  crm-1 "}"#).unwrap();
        assert_eq!(
            input.sanitize().ticket_ref().unwrap(),
            TicketRef::external("crm-1")
        );
    }

    #[test]
    fn test_get_input_requires_exactly_one_id() {
        let input: GetTicketInput = serde_json::from_str("{}").unwrap();
        assert!(input.ticket_ref().is_err());

        let input: GetTicketInput =
            serde_json::from_str(r#"{"ticket_id": 1, "external_id": "a"}"#).unwrap();
        assert!(input.ticket_ref().is_err());
    }

    #[test]
    fn test_blank_external_id_counts_as_missing() {
        let input: DeleteTicketInput = serde_json::from_str(r#"{"external_id": "  "}"#).unwrap();
        assert!(input.sanitize().ticket_ref().is_err());
    }

    #[test]
    fn test_get_input_format() {
        let input: GetTicketInput =
            serde_json::from_str(r#"{"ticket_id": 1, "format": "TEXT"}"#).unwrap();
        assert_eq!(input.data_type().unwrap(), DataType::Text);

        let input: GetTicketInput =
            serde_json::from_str(r#"{"ticket_id": 1, "format": "xml"}"#).unwrap();
        assert!(input.data_type().is_err());
    }

    #[test]
    fn test_search_input_defaults_and_caps_limit() {
        let params = SearchTicketsInput::default().to_search_params().unwrap();
        assert_eq!(params.get("limit"), Some("20"));

        let input = SearchTicketsInput {
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(input.to_search_params().unwrap().get("limit"), Some("100"));
    }

    #[test]
    fn test_search_input_maps_fields() {
        let input = SearchTicketsInput {
            search: Some(" printer ".to_string()),
            start_time: Some("2024-01-01".to_string()),
            sort_order: Some("DESC".to_string()),
            page: Some(3),
            ..Default::default()
        }
        .sanitize();
        let params = input.to_search_params().unwrap();
        assert_eq!(
            params.to_form().encode(),
            "limit=20&page=3&search=printer&sort_order=desc&startTime=2024-01-01"
        );
    }

    #[test]
    fn test_search_input_rejects_bad_sort_order() {
        let input = SearchTicketsInput {
            sort_order: Some("sideways".to_string()),
            ..Default::default()
        };
        assert!(input.to_search_params().is_err());
    }

    #[test]
    fn test_submit_input_email_requester() {
        let input: SubmitTicketInput = serde_json::from_str(
            r#"{"subject": " Broken ", "description": "d", "requester_email": "a@b.c"}"#,
        )
        .unwrap();
        let ticket = input.sanitize().to_new_ticket();
        assert_eq!(ticket.subject, "Broken");
        assert_eq!(ticket.requester, Requester::email("a@b.c"));
        assert_eq!(ticket.summary, "");
        assert!(ticket.server.is_empty());
    }

    #[test]
    fn test_submit_input_profile_requester() {
        let input: SubmitTicketInput = serde_json::from_str(
            r#"{"subject": "s", "description": "d", "requester_email": "a@b.c",
                "requester_name": "Ann", "external_id": "crm-2",
                "server": {"HTTP_HOST": "example.com"}}"#,
        )
        .unwrap();
        let ticket = input.sanitize().to_new_ticket();
        assert_eq!(
            ticket.requester,
            Requester::Profile {
                id: None,
                email: Some("a@b.c".to_string()),
                name: Some("Ann".to_string()),
            }
        );
        assert_eq!(ticket.external_id.as_deref(), Some("crm-2"));
        assert_eq!(
            ticket.server.get("HTTP_HOST").map(String::as_str),
            Some("example.com")
        );
    }

    #[test]
    fn test_update_input_status() {
        let input = UpdateTicketInput {
            ticket_id: 1,
            status: " Solved ".to_string(),
        }
        .sanitize();
        assert_eq!(input.ticket_status().unwrap(), TicketStatus::Solved);

        let input = UpdateTicketInput {
            ticket_id: 1,
            status: "2".to_string(),
        };
        assert_eq!(input.ticket_status().unwrap(), TicketStatus::Open);

        let input = UpdateTicketInput {
            ticket_id: 1,
            status: "closed".to_string(),
        };
        assert!(input.ticket_status().is_err());
    }
}
