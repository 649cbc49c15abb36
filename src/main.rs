use botblock_reporter::{bot, config::Config, startup, ReportError, StatsClient};

#[tokio::main]
async fn main() -> Result<(), ReportError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let http_client = startup::setup_reqwest_client(config.request_timeout)?;
    let stats_client = StatsClient::new(http_client);

    tracing::info!(
        "Posting stats to {} sites every {} minutes",
        config.report.auth_tokens().len(),
        config.report.update_interval()
    );

    bot::start::start_bot(&config, stats_client).await
}
