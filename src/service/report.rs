use crate::{
    config::ReportConfig,
    error::ReportError,
    model::StatsSnapshot,
    service::{payload::build_status_document, transport::StatsClient},
    source::BotStatsSource,
};

/// Reports the current stats of a source to every configured site.
pub struct StatsReportService<'a> {
    client: &'a StatsClient,
}

impl<'a> StatsReportService<'a> {
    pub fn new(client: &'a StatsClient) -> Self {
        Self { client }
    }

    /// Captures a snapshot of the source, builds a document and posts it once.
    ///
    /// # Arguments
    /// - `source` - Bot whose counters are reported
    /// - `config` - Site tokens to post with
    ///
    /// # Returns
    /// - `Ok(())` - Every site accepted the stats
    /// - `Err(ReportError)` - Configuration or remote failure, never retried
    pub async fn post_guilds(
        &self,
        source: &dyn BotStatsSource,
        config: &ReportConfig,
    ) -> Result<(), ReportError> {
        let snapshot = StatsSnapshot::capture(source)?;
        let document = build_status_document(&snapshot, config)?;

        tracing::debug!(
            "Posting {} guilds for bot {} captured at {}",
            snapshot.total_guilds,
            snapshot.bot_id,
            snapshot.captured_at
        );

        self.client.post_stats(&document, &snapshot.bot_id).await
    }
}
