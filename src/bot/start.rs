use std::sync::Arc;

use serenity::all::{Client, Context, EventHandler, GatewayIntents, Ready};
use serenity::async_trait;
use tokio::sync::OnceCell;

use crate::{
    config::{Config, ReportConfig},
    error::ReportError,
    scheduler::{start_auto_posting, ScheduleHandle},
    service::StatsClient,
    source::{BotStatsSource, CacheStats},
};

/// Discord bot event handler
struct Handler {
    client: StatsClient,
    report: Arc<ReportConfig>,
    schedule: Arc<OnceCell<ScheduleHandle>>,
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when a shard is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(
            "{} is connected to Discord on shard {:?}",
            ready.user.name,
            ready.shard.map(|shard| shard.id)
        );

        let result = self
            .schedule
            .get_or_try_init(|| async {
                let source: Arc<dyn BotStatsSource> = Arc::new(CacheStats::new(ctx.cache.clone()));
                start_auto_posting(self.client.clone(), source, self.report.clone()).await
            })
            .await;

        if let Err(e) = result {
            tracing::error!("Failed to start stats auto posting: {}", e);
        }
    }
}

/// Runs the Discord bot until it shuts down, posting its stats meanwhile.
///
/// # Arguments
/// - `config` - Host configuration with the bot token and report settings
/// - `client` - Client used for every post
///
/// # Returns
/// - `Ok(())` if the bot ran and shut down cleanly
/// - `Err(ReportError)` if the bot could not connect or posting could not be stopped
pub async fn start_bot(config: &Config, client: StatsClient) -> Result<(), ReportError> {
    let intents = GatewayIntents::GUILDS;

    let schedule = Arc::new(OnceCell::new());
    let handler = Handler {
        client,
        report: Arc::new(config.report.clone()),
        schedule: schedule.clone(),
    };

    let mut client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    tracing::info!("Starting Discord bot...");

    let result = client.start_autosharded().await;

    if let Some(handle) = schedule.get() {
        handle.stop().await?;
    }

    result?;

    Ok(())
}
