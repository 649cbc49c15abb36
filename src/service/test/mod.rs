use crate::{
    config::ReportConfig,
    error::{config::ConfigError, ReportError},
    model::StatsSnapshot,
    service::{
        payload::build_status_document, BotQueryService, StatsClient, StatsReportService,
    },
    source::{ShardGroup, StaticStats},
};
use serde_json::json;
use test_utils::{aggregator::MockAggregator, fixture};
use wiremock::ResponseTemplate;

mod post_stats;

const BOT_ID: &str = "123456789012345678";

fn client_for(aggregator: &MockAggregator) -> StatsClient {
    StatsClient::with_base_url(reqwest::Client::new(), &aggregator.base_url())
}

fn report_config() -> ReportConfig {
    ReportConfig::builder()
        .add_auth_token("lbots.org", "lbots-token")
        .unwrap()
        .add_auth_token("discord.bots.gg", "dbgg-token")
        .unwrap()
        .build()
        .unwrap()
}
