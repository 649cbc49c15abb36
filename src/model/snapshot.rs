//! Point-in-time runtime counters of a bot.

use chrono::{DateTime, Utc};

use crate::{
    error::{config::ConfigError, ReportError},
    source::BotStatsSource,
};

/// Position of one process inside a shard group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardInfo {
    /// Index of this shard, starting at 0.
    pub shard_id: u32,
    /// Total number of shards in the group.
    pub shard_count: u32,
}

/// Counters read from a `BotStatsSource` at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    /// Discord id of the bot user. Never empty.
    pub bot_id: String,
    /// Total number of guilds the bot (or this shard) is in.
    pub total_guilds: u64,
    /// Guild count per shard, indexed by shard id.
    pub shard_breakdown: Option<Vec<u64>>,
    /// Shard position, only kept when the group has more than one shard.
    pub shard_info: Option<ShardInfo>,
    /// When the counters were read.
    pub captured_at: DateTime<Utc>,
}

impl StatsSnapshot {
    /// Reads the current counters of a source.
    ///
    /// # Returns
    /// - `Ok(StatsSnapshot)` - Counters of the source at this instant
    /// - `Err(ReportError::ConfigErr)` - The source could not provide a non-empty bot id
    pub fn capture(source: &dyn BotStatsSource) -> Result<Self, ReportError> {
        let bot_id = source.bot_id()?;
        if bot_id.is_empty() {
            return Err(ConfigError::EmptyBotId.into());
        }

        Ok(Self {
            bot_id,
            total_guilds: source.guild_count(),
            shard_breakdown: source.shard_guild_counts(),
            shard_info: source.shard_info().filter(|info| info.shard_count > 1),
            captured_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ShardGroup, StaticStats};

    struct SingleShard;

    impl BotStatsSource for SingleShard {
        fn bot_id(&self) -> Result<String, ConfigError> {
            Ok("123".to_string())
        }

        fn guild_count(&self) -> u64 {
            7
        }

        fn shard_info(&self) -> Option<ShardInfo> {
            Some(ShardInfo {
                shard_id: 0,
                shard_count: 1,
            })
        }
    }

    /// Tests that shard info of a one-shard group is dropped.
    ///
    /// Expected: Ok with shard_info None
    #[test]
    fn drops_shard_info_for_single_shard() {
        let snapshot = StatsSnapshot::capture(&SingleShard).unwrap();

        assert_eq!(snapshot.total_guilds, 7);
        assert_eq!(snapshot.shard_info, None);
    }

    /// Tests that an empty bot id is a configuration error.
    ///
    /// Expected: Err(ConfigErr(EmptyBotId))
    #[test]
    fn rejects_empty_bot_id() {
        let result = StatsSnapshot::capture(&StaticStats::new("", 10));

        assert!(matches!(
            result,
            Err(ReportError::ConfigErr(ConfigError::EmptyBotId))
        ));
    }

    /// Tests capturing a shard group.
    ///
    /// Expected: Ok with summed guilds and breakdown in shard order
    #[test]
    fn captures_shard_group() {
        let group = ShardGroup::from_shards(vec![
            StaticStats::new("42", 3),
            StaticStats::new("42", 5),
        ]);

        let snapshot = StatsSnapshot::capture(&group).unwrap();

        assert_eq!(snapshot.bot_id, "42");
        assert_eq!(snapshot.total_guilds, 8);
        assert_eq!(snapshot.shard_breakdown, Some(vec![3, 5]));
    }
}
