//! Background jobs.
//!
//! - **stats_post**: posts bot stats to the BotBlock API on a fixed interval

pub mod stats_post;

pub use stats_post::{start_auto_posting, ScheduleHandle};
