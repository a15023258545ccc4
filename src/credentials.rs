//! Account credentials sent with every Raide API request.

use std::fmt;

/// Name of the header carrying the credentials.
pub const AUTHENTICATION_HEADER: &str = "Authentication";

/// Account identifier, API key and API secret for one Raide account.
///
/// Values are inserted into the `Authentication` header verbatim. They must
/// not contain `;` or `=`, or the header becomes ambiguous. `Config` checks
/// this when loading from the environment. Characters that cannot appear in
/// a header are rejected when an executor is built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    account_id: u64,
    api_key: String,
    /// SECURITY: Never log this value!
    api_secret: String,
}

impl Credentials {
    /// Creates credentials from the account id, API key and API secret.
    pub fn new(account_id: u64, api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            account_id,
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// The numeric account id.
    pub fn account_id(&self) -> u64 {
        self.account_id
    }

    /// The API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Renders the `Authentication` header value:
    /// `id=<account_id>;key=<api_key>;password=<api_secret>`.
    pub fn header_value(&self) -> String {
        format!(
            "id={};key={};password={}",
            self.account_id, self.api_key, self.api_secret
        )
    }

    /// Values that must be redacted from anything shown to a user.
    pub(crate) fn secrets(&self) -> [&str; 2] {
        [self.api_secret.as_str(), self.api_key.as_str()]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
