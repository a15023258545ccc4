//! Operation recipes.
//!
//! Each public operation is a fixed translation of its inputs into an HTTP
//! method, a path relative to the endpoint, and the wire parameters. Nothing
//! here talks to the network.

use reqwest::Method;

use crate::error::RaideError;
use crate::form::FormParams;
use crate::models::{DataType, NewTicket, Requester, SearchParams, TicketId, TicketRef, TicketStatus};

/// A fully-resolved request, ready for the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the endpoint, without a leading slash.
    pub path: String,
    /// Wire parameters; `None` sends neither a query string nor a body.
    pub params: Option<FormParams>,
}

impl Call {
    fn new(method: Method, path: impl Into<String>, params: Option<FormParams>) -> Self {
        Self {
            method,
            path: path.into(),
            params,
        }
    }
}

/// `GET get[/external]/<id>/<datatype>`
pub fn get(ticket: &TicketRef, datatype: DataType) -> Result<Call, RaideError> {
    let path = format!("get{}/{}", ticket.path_suffix()?, datatype.as_str());
    Ok(Call::new(Method::GET, path, None))
}

/// `GET search` with the allow-listed filters.
pub fn search(params: &SearchParams) -> Call {
    Call::new(Method::GET, "search", Some(params.to_form()))
}

/// `POST submit` with the ticket fields.
pub fn submit(ticket: &NewTicket) -> Call {
    let mut form = FormParams::new()
        .with("description", ticket.description.as_str())
        .with("external_id", ticket.external_id.as_deref().unwrap_or_default());
    ticket.requester.write_to(&mut form, "requester");
    form.push_nested("server", &ticket.server);
    form.push("subject", ticket.subject.as_str());
    form.push("summary", ticket.summary.as_str());

    Call::new(Method::POST, "submit", Some(form))
}

/// `PUT update/<id>` with the new status.
///
/// Only service-assigned ids are accepted here; the endpoint has no
/// external-id form.
pub fn update(id: TicketId, status: TicketStatus) -> Call {
    let form = FormParams::new().with("status", status.code().to_string());
    Call::new(Method::PUT, format!("update/{}", id), Some(form))
}

/// `DELETE delete[/external]/<id>` with no body.
pub fn delete(ticket: &TicketRef) -> Result<Call, RaideError> {
    let path = format!("delete{}", ticket.path_suffix()?);
    Ok(Call::new(Method::DELETE, path, None))
}

/// `POST comment/<id>` with the comment text.
///
/// Only service-assigned ids are accepted here; the endpoint has no
/// external-id form.
pub fn comment(id: TicketId, comment: &str) -> Call {
    let form = FormParams::new().with("comment", comment);
    Call::new(Method::POST, format!("comment/{}", id), Some(form))
}

/// Traffic endpoint: `POST submit` with the queue and its requester.
pub fn submit_queue(requester: &Requester, queue: &str) -> Call {
    let mut form = FormParams::new().with("queue", queue);
    requester.write_to(&mut form, "requester");
    Call::new(Method::POST, "submit", Some(form))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ServerContext, SortOrder};
    use pretty_assertions::assert_eq;

    fn keys(call: &Call) -> Vec<String> {
        call.params
            .as_ref()
            .map(|p| p.iter().map(|(k, _)| k.to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_get_internal() {
        let call = get(&TicketRef::Internal(42), DataType::Json).unwrap();
        assert_eq!(call.method, Method::GET);
        assert_eq!(call.path, "get/42/json");
        assert_eq!(call.params, None);
    }

    #[test]
    fn test_get_external() {
        let call = get(&TicketRef::external("ext-1"), DataType::Json).unwrap();
        assert_eq!(call.path, "get/external/ext-1/json");
    }

    #[test]
    fn test_get_text() {
        let call = get(&TicketRef::Internal(5), DataType::Text).unwrap();
        assert_eq!(call.path, "get/5/text");
    }

    #[test]
    fn test_get_empty_external_rejected() {
        assert!(get(&TicketRef::external(""), DataType::Json).is_err());
    }

    #[test]
    fn test_search() {
        let params = SearchParams::new()
            .with_limit(25)
            .with_sort_order(SortOrder::Asc);
        let call = search(&params);
        assert_eq!(call.method, Method::GET);
        assert_eq!(call.path, "search");
        assert_eq!(keys(&call), vec!["limit", "sort_order"]);
    }

    #[test]
    fn test_submit_field_order() {
        let mut server = ServerContext::new();
        server.insert("HTTP_USER_AGENT".to_string(), "Mozilla/5.0".to_string());
        server.insert("HTTP_HOST".to_string(), "shop.example.com".to_string());
        let ticket = NewTicket::new("U1VN", "Cart empty", "Items vanish", Requester::email("a@b.c"))
            .with_server(server);

        let call = submit(&ticket);
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.path, "submit");
        assert_eq!(
            keys(&call),
            vec![
                "description",
                "external_id",
                "requester",
                "server[HTTP_HOST]",
                "server[HTTP_USER_AGENT]",
                "subject",
                "summary",
            ]
        );
        let params = call.params.unwrap();
        assert_eq!(params.get("external_id"), Some(""));
        assert_eq!(params.get("summary"), Some("U1VN"));
    }

    #[test]
    fn test_submit_empty_server_omitted() {
        let ticket = NewTicket::new("U1VN", "s", "d", Requester::email("a@b.c"))
            .with_external_id("crm-9");
        let call = submit(&ticket);
        assert_eq!(
            keys(&call),
            vec!["description", "external_id", "requester", "subject", "summary"]
        );
        assert_eq!(call.params.unwrap().get("external_id"), Some("crm-9"));
    }

    #[test]
    fn test_update() {
        let call = update(42, TicketStatus::Solved);
        assert_eq!(call.method, Method::PUT);
        assert_eq!(call.path, "update/42");
        assert_eq!(call.params.unwrap().encode(), "status=3");
    }

    #[test]
    fn test_delete_has_no_params() {
        let call = delete(&TicketRef::Internal(8)).unwrap();
        assert_eq!(call.method, Method::DELETE);
        assert_eq!(call.path, "delete/8");
        assert_eq!(call.params, None);

        let call = delete(&TicketRef::external("x")).unwrap();
        assert_eq!(call.path, "delete/external/x");
    }

    #[test]
    fn test_comment() {
        let call = comment(3, "Looking into it");
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.path, "comment/3");
        assert_eq!(call.params.unwrap().encode(), "comment=Looking+into+it");
    }

    #[test]
    fn test_submit_queue() {
        let requester = Requester::Profile {
            id: Some("5".to_string()),
            email: None,
            name: Some("Ops".to_string()),
        };
        let call = submit_queue(&requester, "cXVldWU=");
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.path, "submit");
        assert_eq!(keys(&call), vec!["queue", "requester[id]", "requester[name]"]);
    }
}
