//! API credentials for HTTP basic authentication.

use serde::{Deserialize, Serialize};

/// Login identifier and secret sent as HTTP basic auth on every request.
///
/// Held immutably by a client for its whole lifetime. The secret never
/// appears in `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    login: String,
    secret: String,
}

impl Credentials {
    /// Creates credentials from an API login and secret.
    #[must_use]
    pub fn new(login: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            secret: secret.into(),
        }
    }

    /// Returns the API login.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Returns the API secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("secret", &"<redacted>")
            .finish()
    }
}
