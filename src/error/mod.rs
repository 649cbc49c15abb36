//! Error types for reporting and querying bot statistics.
//!
//! `ReportError` is the top-level error returned by every public operation. Its
//! variants separate configuration mistakes, which the caller has to fix before
//! trying again, from remote failures, which may succeed on a later attempt.
//! Nothing in this crate retries on its own; the scheduler only logs.

pub mod config;

use thiserror::Error;

use crate::error::config::ConfigError;

/// Top-level error type for the reporting client.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Invalid or missing input.
    ///
    /// Covers empty bot ids, an empty token map, an interval below the minimum and
    /// sources that cannot provide an id. Never worth retrying without changing input.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Network-level failure or a non-2xx status other than 429.
    ///
    /// # Fields
    /// - `code` - HTTP status code when a response was received
    /// - `message` - Description of the failure
    #[error("{message}")]
    TransportFailure { code: Option<u16>, message: String },

    /// The aggregator answered with HTTP 429.
    ///
    /// Carries the raw response body, which holds the aggregator's rate limit
    /// message. Callers are expected to back off.
    #[error("Rate limited by the BotBlock API: {0}")]
    RateLimited(String),

    /// Empty or undecodable body on an otherwise successful response.
    #[error("Malformed response from the BotBlock API: {0}")]
    MalformedResponse(String),

    /// One or more destination sites rejected the posted stats.
    ///
    /// The request reached the aggregator; the message aggregates every per-site
    /// failure it reported.
    #[error("One or multiple requests failed! Response(s): {0}")]
    PartialPostFailure(String),

    /// A queried site is not part of the bot's listing data.
    #[error("No listing data for site '{0}'")]
    NotFound(String),

    /// Cron scheduler error while starting or stopping automatic posting.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size. Only produced by the host binary.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),
}

/// Manual conversion from serenity::Error to ReportError.
///
/// Boxes the error to keep `ReportError` small.
impl From<serenity::Error> for ReportError {
    fn from(err: serenity::Error) -> Self {
        ReportError::DiscordErr(Box::new(err))
    }
}

/// Transport errors from reqwest.
///
/// Connection failures and timeouts carry no status code. Status errors keep
/// theirs so callers can still inspect it.
impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        ReportError::TransportFailure {
            code: err.status().map(|status| status.as_u16()),
            message: err.to_string(),
        }
    }
}

impl ReportError {
    /// Whether this error is caused by the caller's input rather than the remote side.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::ConfigErr(_))
    }

    /// HTTP status code associated with the failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::TransportFailure { code, .. } => *code,
            Self::RateLimited(_) => Some(429),
            _ => None,
        }
    }
}
