//! Reports a Discord bot's guild counts to the BotBlock API and reads the
//! aggregated listing data back.
//!
//! # Architecture
//!
//! - **Source** (`source/`) - `BotStatsSource`, the capability hosts implement, with adapters
//!   for raw counts, shard groups and the Serenity cache
//! - **Model** (`model/`) - Snapshots, the posted status document and the bot record
//! - **Service** (`service/`) - Payload construction, the HTTP client and read-back queries
//! - **Scheduler** (`scheduler/`) - Posting on a fixed interval in the background
//! - **Error** (`error/`) - `ReportError` and `ConfigError`
//! - **Configuration** (`config`) - `ReportConfig` and the host binary's environment settings
//!
//! # Flow
//!
//! 1. A `StatsSnapshot` is captured from a `BotStatsSource`
//! 2. `build_status_document` turns it and the `ReportConfig` into a `StatusDocument`
//! 3. `StatsClient::post_stats` sends it and classifies the response
//! 4. The scheduler repeats 1-3 every interval and logs failures instead of returning them
//!
//! # Feature Gates
//!
//! The `bot` feature (default) adds the Serenity host used by the binary and log output setup.

#[cfg(feature = "bot")]
pub mod bot;
pub mod config;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod source;
pub mod startup;

pub use config::{ReportConfig, ReportConfigBuilder};
pub use error::{config::ConfigError, ReportError};
pub use model::{BotRecord, Listing, ShardInfo, StatsSnapshot, StatusDocument};
pub use scheduler::{start_auto_posting, ScheduleHandle};
pub use service::{payload::build_status_document, BotQueryService, StatsClient, StatsReportService};
pub use source::{BotRef, BotStatsSource, CacheStats, ShardGroup, StaticStats};
