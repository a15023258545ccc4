//! Wire parameters for a single API call.
//!
//! The Raide API takes flat `key=value` pairs. Values that are themselves
//! maps (the `server` context, a requester profile) are flattened into
//! bracketed keys such as `server[HTTP_HOST]=example.com`.

use url::form_urlencoded;

/// Ordered list of wire parameters.
///
/// Insertion order is preserved; it is the order the pairs go on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormParams {
    pairs: Vec<(String, String)>,
}

impl FormParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plain `key=value` pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends each `(field, value)` as `key[field]=value`.
    ///
    /// An empty iterator appends nothing.
    pub fn push_nested<I, K, V>(&mut self, key: &str, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (field, value) in fields {
            self.pairs
                .push((format!("{}[{}]", key, field.as_ref()), value.into()));
        }
    }

    /// Returns true if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Looks up the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over the pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encodes as `application/x-www-form-urlencoded`.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_empty() {
        assert_eq!(FormParams::new().encode(), "");
    }

    #[test]
    fn test_encode_preserves_order_and_escapes() {
        let params = FormParams::new()
            .with("subject", "Login & logout broken")
            .with("status", "2");
        assert_eq!(params.encode(), "subject=Login+%26+logout+broken&status=2");
    }

    #[test]
    fn test_push_nested_brackets() {
        let mut params = FormParams::new();
        params.push_nested("server", [("HTTP_HOST", "example.com"), ("REQUEST_URI", "/a?b=c")]);
        assert_eq!(params.get("server[HTTP_HOST]"), Some("example.com"));
        assert_eq!(
            params.encode(),
            "server%5BHTTP_HOST%5D=example.com&server%5BREQUEST_URI%5D=%2Fa%3Fb%3Dc"
        );
    }

    #[test]
    fn test_push_nested_empty_adds_nothing() {
        let mut params = FormParams::new();
        params.push_nested("server", Vec::<(String, String)>::new());
        assert!(params.is_empty());
    }
}
