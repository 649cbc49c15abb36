//! Test factory for creating Serenity Guild objects.
//!
//! Guilds are created by deserializing JSON, simulating what Discord's API would
//! return. Guild ids can be chosen so that Discord's sharding formula
//! `(guild_id >> 22) % shard_count` routes them to a specific shard.

use serenity::all::Guild;
use serenity::model::event::GuildCreateEvent;
use serde_json::Value;

/// Builds a guild id that Discord routes to `shard_id` when `shard_count` shards run.
///
/// The id's timestamp bits are `sequence * shard_count + shard_id`, so different
/// sequence numbers give distinct ids on the same shard.
///
/// # Arguments
/// - `sequence` - Distinguishes ids on the same shard, must be at least 1
/// - `shard_id` - Target shard, below `shard_count`
/// - `shard_count` - Total number of shards
///
/// # Returns
/// - `u64` - Guild id (snowflake) served by the target shard
pub fn guild_id_on_shard(sequence: u64, shard_id: u64, shard_count: u64) -> u64 {
    ((sequence * shard_count + shard_id) << 22) | 1
}

/// Creates a test Serenity Guild with customizable fields.
///
/// Creates a Guild object by deserializing JSON with the provided values.
/// The icon hash is automatically padded to 32 characters (Discord's icon hash format)
/// if it's shorter. All other fields are set to reasonable defaults.
///
/// # Arguments
/// - `guild_id` - Discord guild ID (snowflake)
/// - `name` - Guild name
/// - `icon_hash` - Optional icon hash (will be padded to 32 characters if shorter)
///
/// # Returns
/// - `Guild` - A valid Serenity Guild struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a Guild (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::guild::create_test_guild;
///
/// // Create guild without icon
/// let guild = create_test_guild(123456789, "Test Guild", None);
///
/// // Create guild with icon (automatically padded to 32 chars)
/// let guild = create_test_guild(123456789, "Test Guild", Some("abc123"));
/// assert_eq!(guild.icon_hash.unwrap().to_string(), "abc12300000000000000000000000000");
///
/// // Create guild with animated icon (34 chars: "a_" + 32 hex chars)
/// let guild = create_test_guild(123456789, "Test Guild", Some("a_abcdef1234567890abcdef1234567890"));
/// ```
pub fn create_test_guild(guild_id: u64, name: &str, icon_hash: Option<&str>) -> Guild {
    serde_json::from_value(guild_json(guild_id, name, icon_hash))
        .expect("Failed to create test guild - invalid JSON structure")
}

/// Creates the `GUILD_CREATE` gateway event Discord sends when a guild becomes available.
///
/// Carries the same guild `create_test_guild` builds. Feed it to `Cache::update` to
/// make the guild available in a cache.
///
/// # Arguments
/// - `guild_id` - Discord guild ID (snowflake)
/// - `name` - Guild name
pub fn create_test_guild_create_event(guild_id: u64, name: &str) -> GuildCreateEvent {
    serde_json::from_value(guild_json(guild_id, name, None))
        .expect("Failed to create test guild create event - invalid JSON structure")
}

fn guild_json(guild_id: u64, name: &str, icon_hash: Option<&str>) -> Value {
    // Pad icon hash to be 32 characters if provided (Discord icon hash format)
    // Note: Animated icons should be 34 characters ("a_" prefix + 32 hex chars)
    let formatted_icon = icon_hash.map(|hash| {
        if hash.starts_with("a_") {
            if hash.len() < 34 {
                format!("{:0<34}", hash)
            } else {
                hash.to_string()
            }
        } else if hash.len() < 32 {
            format!("{:0<32}", hash)
        } else {
            hash.to_string()
        }
    });

    serde_json::json!({
        "id": guild_id.to_string(),
        "name": name,
        "icon": formatted_icon,
        "icon_hash": formatted_icon,
        "owner_id": "100000000000000000",
        "afk_timeout": 300,
        "verification_level": 0,
        "default_message_notifications": 0,
        "explicit_content_filter": 0,
        "roles": [],
        "emojis": [],
        "stickers": [],
        "features": [],
        "mfa_level": 0,
        "system_channel_flags": 0,
        "premium_tier": 0,
        "premium_subscription_count": 0,
        "premium_progress_bar_enabled": false,
        "preferred_locale": "en-US",
        "nsfw_level": 0,
        "joined_at": "2020-01-01T00:00:00.000000+00:00",
        "large": false,
        "member_count": 100,
        "voice_states": [],
        "channels": [],
        "threads": [],
        "presences": [],
        "max_presences": 25000,
        "max_members": 100000,
        "unavailable": false,
        "members": [],
        "stage_instances": [],
        "guild_scheduled_events": [],
    })
}
