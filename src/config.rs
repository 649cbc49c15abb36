//! Reporting configuration.
//!
//! `ReportConfig` is the immutable value consumed by the client: the site → token
//! map and the posting interval. It is assembled with `ReportConfigBuilder` and
//! then shared read-only (usually behind an `Arc`) by every send and scheduler tick.
//! `Config` holds the host binary's settings loaded from the environment.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::{config::ConfigError, ReportError};

/// Smallest accepted update interval in minutes.
pub const MIN_UPDATE_INTERVAL: u32 = 1;

/// Update interval used when the builder is not given one.
pub const DEFAULT_UPDATE_INTERVAL: u32 = 30;

/// Request timeout used by the host binary when none is configured.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Destination credentials and posting cadence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    auth_tokens: BTreeMap<String, String>,
    update_interval: u32,
}

impl ReportConfig {
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::new()
    }

    /// Site name → API token for every configured destination.
    pub fn auth_tokens(&self) -> &BTreeMap<String, String> {
        &self.auth_tokens
    }

    /// Posting interval in minutes.
    pub fn update_interval(&self) -> u32 {
        self.update_interval
    }

    /// Posting interval as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.update_interval) * 60)
    }
}

/// Builder for `ReportConfig`.
///
/// Validates each input as it is added so mistakes surface at the call that made them.
#[derive(Debug, Clone)]
pub struct ReportConfigBuilder {
    auth_tokens: BTreeMap<String, String>,
    update_interval: u32,
}

impl ReportConfigBuilder {
    pub fn new() -> Self {
        Self {
            auth_tokens: BTreeMap::new(),
            update_interval: DEFAULT_UPDATE_INTERVAL,
        }
    }

    /// Adds the token for one site. A later token for the same site replaces the earlier one.
    ///
    /// # Arguments
    /// - `site` - Site name as known by the BotBlock API (e.g. `discordbots.org`)
    /// - `token` - API token issued by that site
    ///
    /// # Returns
    /// - `Ok(Self)` - Builder for method chaining
    /// - `Err(ConfigError::EmptySiteOrToken)` - Site or token is empty
    pub fn add_auth_token(
        mut self,
        site: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let site = site.into();
        let token = token.into();

        if site.is_empty() || token.is_empty() {
            return Err(ConfigError::EmptySiteOrToken);
        }

        self.auth_tokens.insert(site, token);
        Ok(self)
    }

    /// Replaces all configured tokens with the provided map.
    ///
    /// # Returns
    /// - `Ok(Self)` - Builder for method chaining
    /// - `Err(ConfigError::NoAuthTokens)` - Map is empty
    /// - `Err(ConfigError::EmptySiteOrToken)` - Map contains an empty site or token
    pub fn auth_tokens<I, K, V>(mut self, tokens: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let tokens: BTreeMap<String, String> = tokens
            .into_iter()
            .map(|(site, token)| (site.into(), token.into()))
            .collect();

        if tokens.is_empty() {
            return Err(ConfigError::NoAuthTokens);
        }
        if tokens
            .iter()
            .any(|(site, token)| site.is_empty() || token.is_empty())
        {
            return Err(ConfigError::EmptySiteOrToken);
        }

        self.auth_tokens = tokens;
        Ok(self)
    }

    /// Sets the posting interval in minutes.
    ///
    /// # Returns
    /// - `Ok(Self)` - Builder for method chaining
    /// - `Err(ConfigError::IntervalTooSmall)` - Interval is below `MIN_UPDATE_INTERVAL`
    pub fn update_interval(mut self, minutes: u32) -> Result<Self, ConfigError> {
        if minutes < MIN_UPDATE_INTERVAL {
            return Err(ConfigError::IntervalTooSmall {
                interval: minutes,
                min: MIN_UPDATE_INTERVAL,
            });
        }

        self.update_interval = minutes;
        Ok(self)
    }

    /// Builds the configuration.
    ///
    /// # Returns
    /// - `Ok(ReportConfig)` - At least one site token is configured
    /// - `Err(ConfigError::NoAuthTokens)` - No token was added
    pub fn build(self) -> Result<ReportConfig, ConfigError> {
        if self.auth_tokens.is_empty() {
            return Err(ConfigError::NoAuthTokens);
        }

        Ok(ReportConfig {
            auth_tokens: self.auth_tokens,
            update_interval: self.update_interval,
        })
    }
}

impl Default for ReportConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings of the host binary, read from the environment.
pub struct Config {
    pub discord_bot_token: String,
    pub report: ReportConfig,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ReportError> {
        let discord_bot_token = std::env::var("DISCORD_BOT_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?;
        let auth_tokens = std::env::var("BOTBLOCK_AUTH_TOKENS")
            .map_err(|_| ConfigError::MissingEnvVar("BOTBLOCK_AUTH_TOKENS".to_string()))?;

        let mut builder = ReportConfig::builder().auth_tokens(parse_auth_tokens(&auth_tokens)?)?;

        if let Some(interval) = optional_number::<u32>("BOTBLOCK_UPDATE_INTERVAL")? {
            builder = builder.update_interval(interval)?;
        }

        let request_timeout = optional_number::<u64>("BOTBLOCK_REQUEST_TIMEOUT")?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Self {
            discord_bot_token,
            report: builder.build()?,
            request_timeout: Duration::from_secs(request_timeout),
        })
    }
}

/// Parses `site=token` pairs separated by commas.
///
/// Whitespace around pairs, sites and tokens is ignored, as are empty pairs left
/// by a trailing comma.
///
/// # Returns
/// - `Ok(Vec<(String, String)>)` - Parsed pairs in input order
/// - `Err(ConfigError::InvalidEnvVar)` - A pair has no `=` or an empty side
pub fn parse_auth_tokens(value: &str) -> Result<Vec<(String, String)>, ConfigError> {
    let invalid = || ConfigError::InvalidEnvVar {
        name: "BOTBLOCK_AUTH_TOKENS".to_string(),
        value: value.to_string(),
    };

    value
        .split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (site, token) = pair.split_once('=').ok_or_else(invalid)?;
            let (site, token) = (site.trim(), token.trim());
            if site.is_empty() || token.is_empty() {
                return Err(invalid());
            }
            Ok((site.to_string(), token.to_string()))
        })
        .collect()
}

fn optional_number<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}
