//! Search filters for the `search` endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::form::FormParams;

/// The only keys the `search` endpoint accepts, in wire order.
pub const SEARCH_KEYS: [&str; 8] = [
    "endTime",
    "limit",
    "page",
    "search",
    "sort_by",
    "sort_order",
    "startTime",
    "status",
];

/// Sort direction for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Filters for a ticket search.
///
/// Only keys in [`SEARCH_KEYS`] can be set; anything else is dropped
/// silently by [`from_pairs`](Self::from_pairs) and never reaches the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    values: BTreeMap<&'static str, String>,
}

impl SearchParams {
    /// Creates empty search parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds parameters from arbitrary key/value pairs, keeping only the
    /// allow-listed keys.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.set(key.as_ref(), value);
        }
        params
    }

    /// Sets `key` if it is allow-listed. Returns whether it was kept.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match SEARCH_KEYS.iter().copied().find(|k| *k == key) {
            Some(known) => {
                self.values.insert(known, value.into());
                true
            }
            None => {
                tracing::trace!(key = %key, "Dropping unsupported search parameter");
                false
            }
        }
    }

    /// Looks up the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns true if no filter is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Upper bound of the creation-time window.
    pub fn with_end_time(mut self, end_time: impl Into<String>) -> Self {
        self.set("endTime", end_time);
        self
    }

    /// Maximum number of results per page.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.set("limit", limit.to_string());
        self
    }

    /// Page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.set("page", page.to_string());
        self
    }

    /// Free-text query.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.set("search", search);
        self
    }

    /// Field to sort by.
    pub fn with_sort_by(mut self, field: impl Into<String>) -> Self {
        self.set("sort_by", field);
        self
    }

    /// Sort direction.
    pub fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.set("sort_order", order.as_str());
        self
    }

    /// Lower bound of the creation-time window.
    pub fn with_start_time(mut self, start_time: impl Into<String>) -> Self {
        self.set("startTime", start_time);
        self
    }

    /// Status filter.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.set("status", status);
        self
    }

    /// Wire parameters, in [`SEARCH_KEYS`] order.
    pub fn to_form(&self) -> FormParams {
        let mut form = FormParams::new();
        for key in SEARCH_KEYS {
            if let Some(value) = self.values.get(key) {
                form.push(key, value.as_str());
            }
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unknown_keys_dropped() {
        let params = SearchParams::from_pairs([
            ("limit", "10"),
            ("drop_table", "tickets"),
            ("status", "2"),
            ("Limit", "99"),
        ]);
        let keys: Vec<_> = params.to_form().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["limit", "status"]);
    }

    #[test]
    fn test_every_allow_listed_key_kept() {
        let params = SearchParams::from_pairs(SEARCH_KEYS.iter().map(|k| (*k, "v")));
        assert_eq!(params.to_form().len(), SEARCH_KEYS.len());
    }

    #[test]
    fn test_form_follows_allow_list_order() {
        let params = SearchParams::new()
            .with_status("3")
            .with_sort_order(SortOrder::Desc)
            .with_end_time("2024-02-01")
            .with_page(2);
        assert_eq!(
            params.to_form().encode(),
            "endTime=2024-02-01&page=2&sort_order=desc&status=3"
        );
    }

    #[test]
    fn test_set_reports_whether_kept() {
        let mut params = SearchParams::new();
        assert!(params.set("search", "printer"));
        assert!(!params.set("owner", "me"));
        assert_eq!(params.get("search"), Some("printer"));
        assert_eq!(params.get("owner"), None);
    }

    #[test]
    fn test_empty() {
        assert!(SearchParams::new().is_empty());
        assert!(SearchParams::new().to_form().is_empty());
    }
}
