//! Status document construction.

use serde_json::{json, Map, Value};

use crate::{
    config::ReportConfig,
    error::{config::ConfigError, ReportError},
    model::{
        document::{BOT_ID, SERVER_COUNT, SHARDS, SHARD_COUNT, SHARD_ID},
        StatsSnapshot, StatusDocument,
    },
};

/// Builds the document posted to the aggregator's count endpoint.
///
/// Shard fields depend on the snapshot:
/// - With a per-shard breakdown: `shard_count` and `shards`
/// - With shard info for a group of more than one shard: `shard_id` and `shard_count`
/// - Otherwise: no shard fields
///
/// One field per configured site is added last. A site named like a reserved key
/// replaces that key's value.
///
/// # Arguments
/// - `snapshot` - Counters to report
/// - `config` - Site tokens to attach
///
/// # Returns
/// - `Ok(StatusDocument)` - Freshly built document
/// - `Err(ReportError::ConfigErr)` - Bot id empty or no site tokens configured
pub fn build_status_document(
    snapshot: &StatsSnapshot,
    config: &ReportConfig,
) -> Result<StatusDocument, ReportError> {
    if snapshot.bot_id.is_empty() {
        return Err(ConfigError::EmptyBotId.into());
    }
    if config.auth_tokens().is_empty() {
        return Err(ConfigError::NoAuthTokens.into());
    }

    let mut fields = Map::new();
    fields.insert(SERVER_COUNT.to_string(), json!(snapshot.total_guilds));
    fields.insert(BOT_ID.to_string(), json!(snapshot.bot_id));

    if let Some(shards) = &snapshot.shard_breakdown {
        fields.insert(SHARD_COUNT.to_string(), json!(shards.len()));
        fields.insert(SHARDS.to_string(), json!(shards));
    } else if let Some(shard) = snapshot.shard_info.filter(|shard| shard.shard_count > 1) {
        fields.insert(SHARD_ID.to_string(), json!(shard.shard_id));
        fields.insert(SHARD_COUNT.to_string(), json!(shard.shard_count));
    }

    for (site, token) in config.auth_tokens() {
        fields.insert(site.clone(), Value::String(token.clone()));
    }

    Ok(StatusDocument::from_fields(fields))
}
