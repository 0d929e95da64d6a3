//! Error types for the command-line client.

/// Configuration could not be loaded or is incomplete.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this tool.
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// A required setting is absent or unresolved.
    #[error("missing required setting `{0}` (set it in the config file or via flag/environment)")]
    MissingSetting(&'static str),
}

/// Any failure that ends a CLI run with a non-zero exit code.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Gateway call failed without producing a result.
    #[error(transparent)]
    Client(#[from] spreedly_http::ClientError),

    /// The result could not be written as JSON.
    #[error("failed to encode result: {0}")]
    Output(#[from] serde_json::Error),
}
