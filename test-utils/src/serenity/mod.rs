//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity objects by deserializing JSON, simulating
//! what Discord's API would return, so adapter code can be tested without a gateway
//! connection.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::guild::{create_test_guild, guild_id_on_shard};
//!
//! // Guild that Discord would route to shard 2 of 4
//! let guild = create_test_guild(guild_id_on_shard(1, 2, 4), "Test Guild", None);
//! ```
//!
//! # Available Factories
//!
//! - `guild::create_test_guild` - Create Serenity Guild objects
//! - `guild::guild_id_on_shard` - Create guild ids routed to a given shard
//! - `guild::create_test_guild_create_event` - Create `GUILD_CREATE` gateway events
//! - `cache::create_test_cache` - Create a Serenity cache filled through gateway events

pub mod cache;
pub mod guild;

pub use cache::{create_test_cache, create_test_ready_event};
pub use guild::{create_test_guild, create_test_guild_create_event, guild_id_on_shard};
