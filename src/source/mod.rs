//! Sources of bot statistics.
//!
//! The reporting client never talks to a bot runtime directly. Hosts expose their
//! counters through `BotStatsSource`, and one adapter exists per host shape:
//!
//! - `StaticStats` - a raw bot id and guild count supplied by the caller
//! - `ShardGroup` - several shard sources managed together, reported with a breakdown
//! - `CacheStats` - a Serenity cache, either whole or restricted to one shard

pub mod cache;

use std::sync::Arc;

use crate::{
    error::{config::ConfigError, ReportError},
    model::ShardInfo,
};

pub use cache::CacheStats;

/// Capability a host must expose so its stats can be reported.
pub trait BotStatsSource: Send + Sync {
    /// Discord id of the bot user.
    fn bot_id(&self) -> Result<String, ConfigError>;

    /// Total number of guilds covered by this source.
    fn guild_count(&self) -> u64;

    /// Guild count of every shard, indexed by shard id.
    fn shard_guild_counts(&self) -> Option<Vec<u64>> {
        None
    }

    /// Position of this source inside a shard group.
    fn shard_info(&self) -> Option<ShardInfo> {
        None
    }
}

/// Fixed id and guild count provided by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticStats {
    bot_id: String,
    guild_count: u64,
}

impl StaticStats {
    pub fn new(bot_id: impl Into<String>, guild_count: u64) -> Self {
        Self {
            bot_id: bot_id.into(),
            guild_count,
        }
    }

    pub fn from_id(bot_id: u64, guild_count: u64) -> Self {
        Self::new(bot_id.to_string(), guild_count)
    }
}

impl BotStatsSource for StaticStats {
    fn bot_id(&self) -> Result<String, ConfigError> {
        if self.bot_id.is_empty() {
            return Err(ConfigError::EmptyBotId);
        }
        Ok(self.bot_id.clone())
    }

    fn guild_count(&self) -> u64 {
        self.guild_count
    }
}

/// Shards of one bot reported together.
///
/// The bot id comes from shard 0, the guild count is the sum over all shards and
/// the breakdown lists each shard's count in shard order.
#[derive(Clone)]
pub struct ShardGroup {
    shards: Vec<Arc<dyn BotStatsSource>>,
}

impl ShardGroup {
    /// Creates a group from sources ordered by shard id.
    pub fn new(shards: Vec<Arc<dyn BotStatsSource>>) -> Self {
        Self { shards }
    }

    /// Creates a group from sources of a single type ordered by shard id.
    pub fn from_shards<S>(shards: impl IntoIterator<Item = S>) -> Self
    where
        S: BotStatsSource + 'static,
    {
        Self::new(
            shards
                .into_iter()
                .map(|shard| Arc::new(shard) as Arc<dyn BotStatsSource>)
                .collect(),
        )
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }
}

impl BotStatsSource for ShardGroup {
    fn bot_id(&self) -> Result<String, ConfigError> {
        self.shards
            .first()
            .ok_or(ConfigError::ShardUnavailable(0))?
            .bot_id()
    }

    fn guild_count(&self) -> u64 {
        self.shards.iter().map(|shard| shard.guild_count()).sum()
    }

    fn shard_guild_counts(&self) -> Option<Vec<u64>> {
        Some(self.shards.iter().map(|shard| shard.guild_count()).collect())
    }
}

/// Bot to query: an id given directly or one derived from a stats source.
#[derive(Clone)]
pub enum BotRef<'a> {
    Id(String),
    Source(&'a dyn BotStatsSource),
}

impl BotRef<'_> {
    /// Resolves the bot id.
    ///
    /// # Returns
    /// - `Ok(String)` - Non-empty bot id
    /// - `Err(ReportError::ConfigErr)` - Id is empty or the source cannot provide one
    pub fn resolve(&self) -> Result<String, ReportError> {
        let id = match self {
            Self::Id(id) => id.clone(),
            Self::Source(source) => source.bot_id()?,
        };

        if id.is_empty() {
            return Err(ConfigError::EmptyBotId.into());
        }

        Ok(id)
    }
}

impl From<&str> for BotRef<'_> {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for BotRef<'_> {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<u64> for BotRef<'_> {
    fn from(id: u64) -> Self {
        Self::Id(id.to_string())
    }
}

impl<'a> From<&'a dyn BotStatsSource> for BotRef<'a> {
    fn from(source: &'a dyn BotStatsSource) -> Self {
        Self::Source(source)
    }
}

impl<'a, S: BotStatsSource> From<&'a S> for BotRef<'a> {
    fn from(source: &'a S) -> Self {
        Self::Source(source)
    }
}
