//! Service layer for building, posting and reading back bot stats.
//!
//! - **payload**: pure construction of the status document
//! - **transport**: `StatsClient`, the HTTP client and response classification
//! - **report**: one complete report (snapshot, document, post)
//! - **query**: read-back operations on the aggregated bot record

pub mod payload;
pub mod query;
pub mod report;
pub mod transport;

pub use query::BotQueryService;
pub use report::StatsReportService;
pub use transport::StatsClient;

#[cfg(test)]
mod test;
