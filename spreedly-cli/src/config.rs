//! CLI configuration.
//!
//! Loads settings from a TOML file with support for environment variable
//! expansion in string values. Variables use `$VAR` or `${VAR}` syntax.
//! Command-line flags (each of which also reads an environment variable)
//! override the file.
//!
//! # Example Configuration
//!
//! ```toml
//! base_url = "https://spreedlycore.com/v1/"
//! login = "$SPREEDLY_LOGIN"
//! secret = "${SPREEDLY_SECRET}"
//! gateway_token = "HBwH9D7x7ZZAFCkwDuP8hAxLDA4"
//! timeout_secs = 30
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use spreedly::Credentials;
use spreedly::request::DEFAULT_BASE_URL;
use spreedly_http::ClientConfig;

use crate::error::ConfigError;

/// Settings read from the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// API root (default: `https://spreedlycore.com/v1/`).
    #[serde(default)]
    pub base_url: Option<String>,

    /// API login.
    #[serde(default)]
    pub login: Option<String>,

    /// API secret.
    #[serde(default)]
    pub secret: Option<String>,

    /// Gateway token used by `purchase`.
    #[serde(default)]
    pub gateway_token: Option<String>,

    /// Per-request timeout in seconds. Unset waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl CliConfig {
    /// Loads configuration from a file path.
    ///
    /// A missing file yields the defaults, so credentials may come from the
    /// environment alone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content, |name| std::env::var(name).ok())
    }

    /// Parses TOML after expanding `$VAR` references with `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the expanded text is not valid config.
    pub fn from_toml(
        content: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let expanded = expand_env_vars(content, lookup);
        Ok(toml::from_str(&expanded)?)
    }

    /// Overrides file values with any that were given on the command line.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            base_url: overrides.base_url.or(self.base_url),
            login: overrides.login.or(self.login),
            secret: overrides.secret.or(self.secret),
            gateway_token: overrides.gateway_token.or(self.gateway_token),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
        }
    }

    /// Builds the client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSetting`] if the login or secret is
    /// absent, empty, or still an unresolved `$VAR` reference.
    pub fn into_client_config(self) -> Result<ClientConfig, ConfigError> {
        let login = require(self.login, "login")?;
        let secret = require(self.secret, "secret")?;

        let mut config = ClientConfig::new(Credentials::new(login, secret))
            .with_base_url(self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()));
        if let Some(token) = self.gateway_token.filter(|t| !t.is_empty()) {
            config = config.with_gateway_token(token);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

fn require(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.is_empty() && !is_unresolved_reference(v))
        .ok_or(ConfigError::MissingSetting(name))
}

/// Whether `value` is exactly a `$VAR` or `${VAR}` reference left behind by
/// [`expand_env_vars`].
fn is_unresolved_reference(value: &str) -> bool {
    let Some(rest) = value.strip_prefix('$') else {
        return false;
    };
    let name = rest
        .strip_prefix('{')
        .and_then(|braced| braced.strip_suffix('}'))
        .unwrap_or(rest);
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Expands `$VAR` and `${VAR}` patterns in a string using `lookup`.
///
/// Unresolved variables are left as-is.
fn expand_env_vars(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }

        let mut var_name = String::new();
        let mut closed = false;
        while let Some(&c) = chars.peek() {
            if braced {
                if c == '}' {
                    chars.next();
                    closed = true;
                    break;
                }
            } else if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            var_name.push(c);
            chars.next();
        }

        match lookup(&var_name) {
            Some(value) if !var_name.is_empty() && closed == braced => result.push_str(&value),
            _ => {
                result.push('$');
                if braced {
                    result.push('{');
                }
                result.push_str(&var_name);
                if closed {
                    result.push('}');
                }
            }
        }
    }

    result
}
