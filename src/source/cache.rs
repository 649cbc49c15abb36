//! Serenity cache adapter.
//!
//! Guilds are assigned to shards with Discord's sharding formula
//! `(guild_id >> 22) % shard_count`, so the per-shard breakdown can be derived
//! from the cached guild ids alone.

use std::sync::Arc;

use serenity::cache::Cache;
use serenity::model::id::GuildId;

use crate::{error::config::ConfigError, model::ShardInfo, source::BotStatsSource};

/// Stats read from a Serenity cache.
///
/// Whole-cache mode reports every guild the bot is in (loaded or still
/// unavailable) and, when the cache knows about
/// more than one shard, a per-shard breakdown. Per-shard mode only counts the
/// guilds of one shard and reports that shard's position instead.
#[derive(Clone)]
pub struct CacheStats {
    cache: Arc<Cache>,
    shard: Option<ShardInfo>,
}

impl CacheStats {
    pub fn new(cache: Arc<Cache>) -> Self {
        Self { cache, shard: None }
    }

    pub fn for_shard(cache: Arc<Cache>, shard: ShardInfo) -> Self {
        Self {
            cache,
            shard: Some(shard),
        }
    }
}

impl BotStatsSource for CacheStats {
    fn bot_id(&self) -> Result<String, ConfigError> {
        Ok(self.cache.current_user().id.to_string())
    }

    fn guild_count(&self) -> u64 {
        match self.shard {
            Some(shard) => guilds_on_shard(&self.cache.guilds(), shard),
            // `guilds()` also lists guilds that have not loaded yet, unlike `guild_count()`
            None => self.cache.guilds().len() as u64,
        }
    }

    fn shard_guild_counts(&self) -> Option<Vec<u64>> {
        if self.shard.is_some() {
            return None;
        }

        let shard_count = self.cache.shard_count();
        if shard_count <= 1 {
            return None;
        }

        Some(guilds_per_shard(&self.cache.guilds(), shard_count))
    }

    fn shard_info(&self) -> Option<ShardInfo> {
        self.shard
    }
}

/// Shard a guild is served by.
pub fn shard_for_guild(guild_id: GuildId, shard_count: u32) -> u32 {
    let shard_count = u64::from(shard_count.max(1));
    ((guild_id.get() >> 22) % shard_count) as u32
}

/// Number of guilds per shard, indexed by shard id.
pub fn guilds_per_shard(guild_ids: &[GuildId], shard_count: u32) -> Vec<u64> {
    let mut counts = vec![0u64; shard_count.max(1) as usize];
    for guild_id in guild_ids {
        counts[shard_for_guild(*guild_id, shard_count) as usize] += 1;
    }
    counts
}

/// Number of guilds served by one shard.
pub fn guilds_on_shard(guild_ids: &[GuildId], shard: ShardInfo) -> u64 {
    guild_ids
        .iter()
        .filter(|guild_id| shard_for_guild(**guild_id, shard.shard_count) == shard.shard_id)
        .count() as u64
}
