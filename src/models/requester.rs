//! Requester and server-context models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::form::FormParams;

/// The person a ticket or queue is submitted on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requester {
    /// Just an e-mail address.
    Email(String),
    /// A profile with any of id, e-mail and name.
    Profile {
        /// Id of the user in the caller's system.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        /// E-mail address.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        /// Display name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl Requester {
    /// Creates an e-mail requester.
    pub fn email(email: impl Into<String>) -> Self {
        Requester::Email(email.into())
    }

    /// Writes this requester under `key`.
    ///
    /// An e-mail becomes `key=<email>`; a profile becomes `key[id]`,
    /// `key[email]` and `key[name]`, skipping absent fields.
    pub(crate) fn write_to(&self, params: &mut FormParams, key: &str) {
        match self {
            Requester::Email(email) => params.push(key, email.as_str()),
            Requester::Profile { id, email, name } => {
                let fields = [("id", id), ("email", email), ("name", name)];
                params.push_nested(
                    key,
                    fields
                        .into_iter()
                        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v))),
                );
            }
        }
    }
}

/// Opaque request/environment context forwarded with a submitted ticket.
///
/// Typically the request headers or server variables of the page the
/// problem was reported from. Keys are kept sorted.
pub type ServerContext = BTreeMap<String, String>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_email_requester_is_flat() {
        let mut params = FormParams::new();
        Requester::email("jane@example.com").write_to(&mut params, "requester");
        assert_eq!(params.encode(), "requester=jane%40example.com");
    }

    #[test]
    fn test_profile_requester_is_nested() {
        let mut params = FormParams::new();
        Requester::Profile {
            id: Some("17".to_string()),
            email: Some("jane@example.com".to_string()),
            name: None,
        }
        .write_to(&mut params, "requester");

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("requester[id]", "17"),
                ("requester[email]", "jane@example.com"),
            ]
        );
    }

    #[test]
    fn test_requester_deserializes_either_shape() {
        let email: Requester = serde_json::from_str(r#""a@b.c""#).unwrap();
        assert_eq!(email, Requester::email("a@b.c"));

        let profile: Requester = serde_json::from_str(r#"{"name":"Jane"}"#).unwrap();
        assert_eq!(
            profile,
            Requester::Profile {
                id: None,
                email: None,
                name: Some("Jane".to_string()),
            }
        );
    }
}
