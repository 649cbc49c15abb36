//! Test factory for Serenity caches filled through gateway events.
//!
//! The cache is populated the way a live shard would populate it: a `READY`
//! event announcing the bot user, the shard and every guild as unavailable,
//! followed by a `GUILD_CREATE` event per guild that finished loading.

use std::sync::Arc;

use serde_json::json;
use serenity::cache::Cache;
use serenity::model::event::ReadyEvent;

use super::guild::create_test_guild_create_event;

/// Creates the `READY` gateway event for a bot.
///
/// # Arguments
/// - `bot_id` - Id of the bot user
/// - `shard` - `(shard_id, shard_count)` the session was identified with, if any
/// - `guild_ids` - Guilds the bot is in, all announced as unavailable
///
/// # Panics
/// - If the JSON cannot be deserialized into a ReadyEvent (indicates invalid test data)
pub fn create_test_ready_event(
    bot_id: u64,
    shard: Option<(u32, u32)>,
    guild_ids: &[u64],
) -> ReadyEvent {
    let guilds: Vec<_> = guild_ids
        .iter()
        .map(|id| json!({ "id": id.to_string(), "unavailable": true }))
        .collect();

    serde_json::from_value(json!({
        "v": 10,
        "user": {
            "id": bot_id.to_string(),
            "username": "Stats Bot",
            "avatar": null,
            "bot": true,
        },
        "guilds": guilds,
        "session_id": "test-session",
        "resume_gateway_url": "wss://gateway.discord.gg",
        "shard": shard.map(|(id, total)| json!([id, total])),
        "application": { "id": bot_id.to_string(), "flags": 0 },
    }))
    .expect("Failed to create test ready event - invalid JSON structure")
}

/// Creates a cache that has seen `READY` and the `GUILD_CREATE` of some guilds.
///
/// # Arguments
/// - `bot_id` - Id of the bot user
/// - `shard` - `(shard_id, shard_count)` of the session, `None` for an unsharded bot
/// - `available` - Guilds that finished loading
/// - `unavailable` - Guilds the bot is in that have not loaded yet
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::cache::create_test_cache;
///
/// // Shard 0 of 2 with two loaded guilds and one still unavailable
/// let cache = create_test_cache(1234, Some((0, 2)), &[10 << 22, 11 << 22], &[12 << 22]);
/// assert_eq!(cache.guild_count(), 2);
/// assert_eq!(cache.guilds().len(), 3);
/// ```
pub fn create_test_cache(
    bot_id: u64,
    shard: Option<(u32, u32)>,
    available: &[u64],
    unavailable: &[u64],
) -> Arc<Cache> {
    let cache = Cache::new();

    let all: Vec<u64> = available.iter().chain(unavailable).copied().collect();
    cache.update(&mut create_test_ready_event(bot_id, shard, &all));

    for (index, guild_id) in available.iter().enumerate() {
        let name = format!("Guild {}", index + 1);
        cache.update(&mut create_test_guild_create_event(*guild_id, &name));
    }

    Arc::new(cache)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that the cache reflects the ready event and loaded guilds.
    ///
    /// Expected: bot user, shard total and available/unavailable split as given
    #[test]
    fn fills_cache_from_events() {
        let cache = create_test_cache(1234, Some((1, 3)), &[10 << 22, 11 << 22], &[12 << 22]);

        assert_eq!(cache.current_user().id.get(), 1234);
        assert_eq!(cache.shard_count(), 3);
        assert_eq!(cache.guild_count(), 2);
        assert_eq!(cache.guilds().len(), 3);
    }

    /// Tests a session identified without shard information.
    ///
    /// Expected: cache reports a single shard
    #[test]
    fn unsharded_ready_means_one_shard() {
        let cache = create_test_cache(1234, None, &[10 << 22], &[]);

        assert_eq!(cache.shard_count(), 1);
    }
}
