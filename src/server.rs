//! MCP server implementation for Raide.
//!
//! This module defines the `RaideServer` struct that implements the MCP
//! `ServerHandler` trait, exposing Raide ticket and traffic operations as tools.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use serde_json::Value;

use crate::client::RaideClient;
use crate::error::RaideError;
use crate::models::{Requester, TicketRef};
use crate::tools::{
    CommentTicketInput, DeleteTicketInput, GetTicketInput, SearchTicketsInput, SubmitTicketInput,
    SubmitTrafficInput, UpdateTicketInput,
};
use crate::traffic::TrafficClient;

/// The Raide MCP server.
#[derive(Clone)]
pub struct RaideServer {
    /// Ticketing API client.
    client: RaideClient,
    /// Traffic API client.
    traffic: TrafficClient,
    /// Tool router for MCP tool dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl RaideServer {
    /// Creates a new Raide server instance.
    pub fn new(client: RaideClient, traffic: TrafficClient) -> Self {
        Self {
            client,
            traffic,
            tool_router: Self::tool_router(),
        }
    }

    /// A simple ping tool to verify the server is running.
    #[tool(description = "Test connectivity to the Raide MCP server. Returns 'pong' if the server is running correctly.")]
    fn ping(&self) -> String {
        tracing::debug!("ping tool called");
        "pong".to_string()
    }

    /// Get a single ticket by numeric ID or external ID.
    #[tool(description = "Get a Raide ticket by its numeric ticket_id or by the external_id given at submission. Optional format: 'json' (default) or 'text'.")]
    async fn get_ticket(
        &self,
        Parameters(input): Parameters<GetTicketInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "get_ticket tool called");

        let ticket = input.ticket_ref()?;
        let datatype = input.data_type()?;

        let result = self
            .client
            .get(&ticket, datatype)
            .await
            .map_err(|e| self.report("get ticket", &ticket, &e))?;

        Ok(format_payload(&format!("Ticket {}", ticket), &result))
    }

    /// Search tickets.
    #[tool(description = "Search Raide tickets. Optional filters: search text, status (1=Pending, 2=Open, 3=Solved), start_time, end_time, sort_by, sort_order (asc/desc), limit and page.")]
    async fn search_tickets(
        &self,
        Parameters(input): Parameters<SearchTicketsInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "search_tickets tool called");

        let params = input.to_search_params()?;

        let result = self.client.search(&params).await.map_err(|e| {
            let sanitized = self.sanitize_error(&e);
            tracing::error!(error = %sanitized, "Failed to search tickets");
            format!("Failed to search tickets: {}", sanitized)
        })?;

        Ok(format_payload("Search results", &result))
    }

    /// Submit a new ticket.
    #[tool(description = "Submit a new Raide ticket. Subject, description and requester_email are required. Optionally attach an external_id, a base64 page summary and request context (server).")]
    async fn submit_ticket(
        &self,
        Parameters(input): Parameters<SubmitTicketInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(subject = %input.subject, "submit_ticket tool called");

        if input.subject.is_empty() {
            return Err("Subject is required and cannot be empty.".to_string());
        }
        if input.description.is_empty() {
            return Err("Description is required and cannot be empty.".to_string());
        }
        if input.requester_email.is_empty() {
            return Err("Requester e-mail is required and cannot be empty.".to_string());
        }

        let result = self
            .client
            .submit(&input.to_new_ticket())
            .await
            .map_err(|e| {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, "Failed to submit ticket");
                format!("Failed to submit ticket: {}", sanitized)
            })?;

        Ok(format_payload("Successfully submitted ticket", &result))
    }

    /// Update the status of a ticket.
    #[tool(description = "Update the status of a Raide ticket. ticket_id (numeric) and status ('pending', 'open' or 'solved') are required.")]
    async fn update_ticket(
        &self,
        Parameters(input): Parameters<UpdateTicketInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(ticket_id = input.ticket_id, "update_ticket tool called");

        let status = input.ticket_status()?;
        let ticket = TicketRef::Internal(input.ticket_id);

        let result = self
            .client
            .update(input.ticket_id, status)
            .await
            .map_err(|e| self.report("update ticket", &ticket, &e))?;

        Ok(format_payload(
            &format!("Successfully updated ticket {}", ticket),
            &result,
        ))
    }

    /// Delete a ticket.
    #[tool(description = "Delete a Raide ticket by its numeric ticket_id or by external_id.")]
    async fn delete_ticket(
        &self,
        Parameters(input): Parameters<DeleteTicketInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "delete_ticket tool called");

        let ticket = input.ticket_ref()?;

        let result = self
            .client
            .delete(&ticket)
            .await
            .map_err(|e| self.report("delete ticket", &ticket, &e))?;

        Ok(format_payload(
            &format!("Successfully deleted ticket {}", ticket),
            &result,
        ))
    }

    /// Comment on a ticket.
    #[tool(description = "Post a comment on a Raide ticket. ticket_id (numeric) and comment are required.")]
    async fn comment_ticket(
        &self,
        Parameters(input): Parameters<CommentTicketInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(ticket_id = input.ticket_id, "comment_ticket tool called");

        if input.comment.is_empty() {
            return Err("Comment is required and cannot be empty.".to_string());
        }

        let ticket = TicketRef::Internal(input.ticket_id);
        let result = self
            .client
            .comment(input.ticket_id, &input.comment)
            .await
            .map_err(|e| self.report("comment on ticket", &ticket, &e))?;

        Ok(format_payload(
            &format!("Successfully commented on ticket {}", ticket),
            &result,
        ))
    }

    /// Submit a traffic queue.
    #[tool(description = "Submit a base64-encoded traffic queue recorded by the Raide logger. requester_email and queue are required.")]
    async fn submit_traffic(
        &self,
        Parameters(input): Parameters<SubmitTrafficInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(queue_len = input.queue.len(), "submit_traffic tool called");

        if input.queue.is_empty() {
            return Err("Queue is required and cannot be empty.".to_string());
        }
        if input.requester_email.is_empty() {
            return Err("Requester e-mail is required and cannot be empty.".to_string());
        }

        let requester = Requester::email(input.requester_email.as_str());
        let result = self
            .traffic
            .submit(&requester, &input.queue)
            .await
            .map_err(|e| {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, "Failed to submit traffic queue");
                format!("Failed to submit traffic queue: {}", sanitized)
            })?;

        Ok(format_payload("Successfully submitted traffic queue", &result))
    }

    /// Logs a failed ticket operation and renders the tool error.
    fn report(&self, operation: &str, ticket: &TicketRef, error: &RaideError) -> String {
        let sanitized = self.sanitize_error(error);
        tracing::error!(error = %sanitized, ticket = %ticket, "Failed to {}", operation);
        format!("Failed to {} {}: {}", operation, ticket, sanitized)
    }

    /// Sanitizes an error message to remove the API key and secret.
    fn sanitize_error(&self, error: &RaideError) -> String {
        error.sanitized_display(&self.client.secrets())
    }
}

#[tool_handler]
impl ServerHandler for RaideServer {
    /// Returns server information for the MCP initialize handshake.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Raide provides access to bug-report tickets. \
                 Use search_tickets to find tickets and get_ticket for details. \
                 Submit tickets with submit_ticket, change status with update_ticket, \
                 comment with comment_ticket and remove with delete_ticket. \
                 Traffic queues are sent with submit_traffic. \
                 Start with 'ping' to verify connectivity."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Response formatting helpers
// ============================================================================

/// Maximum length of a rendered payload before truncation.
const MAX_PAYLOAD_LENGTH: usize = 20_000;

/// Truncates a string if it exceeds the maximum length.
///
/// If truncated, appends "... [truncated]" to indicate the content was cut.
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.len() <= max_length {
        return text.to_string();
    }
    let mut end = max_length - 15; // Leave room for "... [truncated]"
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated]", &text[..end])
}

/// Renders a heading followed by the payload.
///
/// String payloads (such as tickets fetched as text) are shown as-is;
/// everything else is pretty-printed JSON.
fn format_payload(heading: &str, payload: &Value) -> String {
    let body = match payload {
        Value::Null => return format!("{}.", heading),
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    };
    format!("{}:\n\n{}", heading, truncate_text(&body, MAX_PAYLOAD_LENGTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn test_server() -> RaideServer {
        let config = Config::new(7, "test_key_12345", "test_secret_67890");
        RaideServer::new(
            RaideClient::from_config(&config).expect("Failed to create test client"),
            TrafficClient::from_config(&config).expect("Failed to create traffic client"),
        )
    }

    #[test]
    fn test_truncate_text_short_text() {
        assert_eq!(truncate_text("Short text", 100), "Short text");
    }

    #[test]
    fn test_truncate_text_long_text() {
        let text = "word ".repeat(500);
        let result = truncate_text(&text, 100);
        assert!(result.len() <= 100);
        assert!(result.ends_with("... [truncated]"));
    }

    #[test]
    fn test_truncate_text_respects_char_boundaries() {
        let text = "ø".repeat(100);
        let result = truncate_text(&text, 50);
        assert!(result.ends_with("... [truncated]"));
    }

    #[test]
    fn test_format_payload_json() {
        let result = format_payload("Ticket #1", &json!({"id": 1}));
        assert_eq!(result, "Ticket #1:\n\n{\n  \"id\": 1\n}");
    }

    #[test]
    fn test_format_payload_text_and_null() {
        assert_eq!(
            format_payload("Ticket #1", &json!("Subject: Broken")),
            "Ticket #1:\n\nSubject: Broken"
        );
        assert_eq!(
            format_payload("Successfully deleted ticket #1", &Value::Null),
            "Successfully deleted ticket #1."
        );
    }

    #[test]
    fn test_server_info_has_tools_capability() {
        let info = test_server().get_info();
        assert!(info.instructions.is_some());
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_ping_tool_returns_pong() {
        assert_eq!(test_server().ping(), "pong");
    }

    #[test]
    fn test_sanitize_error_redacts_credentials() {
        let server = test_server();
        let err = RaideError::service(9, "bad secret test_secret_67890 for test_key_12345");
        assert_eq!(
            server.sanitize_error(&err),
            "bad secret [REDACTED] for [REDACTED]"
        );
    }

    #[test]
    fn test_report_mentions_ticket() {
        let server = test_server();
        let message = server.report(
            "delete ticket",
            &TicketRef::external("crm-1"),
            &RaideError::Forbidden,
        );
        assert_eq!(
            message,
            "Failed to delete ticket external:crm-1: You are Forbidden."
        );
    }
}
