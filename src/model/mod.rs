//! Domain models for stats reporting.
//!
//! Snapshots are captured from a `BotStatsSource`, turned into a `StatusDocument`
//! for the aggregator, and `BotRecord` is what the aggregator returns on read-back.

pub mod bot_record;
pub mod document;
pub mod snapshot;

pub use bot_record::{BotRecord, Listing};
pub use document::StatusDocument;
pub use snapshot::{ShardInfo, StatsSnapshot};
