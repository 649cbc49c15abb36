use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The host binary requires this environment variable to be defined. Check the
    /// `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but its value cannot be used.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvVar { name: String, value: String },

    /// Bot id is empty or was never provided.
    #[error("botId may not be empty!")]
    EmptyBotId,

    /// A site name or its token is empty.
    #[error("Empty site and/or token is not allowed!")]
    EmptySiteOrToken,

    /// No site tokens are configured, so there is nothing to post to.
    #[error("Empty Map for authTokens is not allowed!")]
    NoAuthTokens,

    /// Update interval is below the allowed minimum.
    #[error("updateInterval can't be less than {min} (got {interval})")]
    IntervalTooSmall { interval: u32, min: u32 },

    /// Shard required to derive the bot id is not available.
    ///
    /// Multi-shard sources take the bot id from shard 0.
    #[error("Shard {0} is not available to provide the bot id")]
    ShardUnavailable(u32),
}
