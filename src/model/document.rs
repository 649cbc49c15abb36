//! Canonical payload posted to the aggregator's count endpoint.

use serde::Serialize;
use serde_json::{Map, Value};

/// Reserved field holding the total guild count.
pub const SERVER_COUNT: &str = "server_count";
/// Reserved field holding the bot id.
pub const BOT_ID: &str = "bot_id";
/// Reserved field holding the number of shards.
pub const SHARD_COUNT: &str = "shard_count";
/// Reserved field holding the shard index of a single process.
pub const SHARD_ID: &str = "shard_id";
/// Reserved field holding the per-shard guild counts.
pub const SHARDS: &str = "shards";

/// Keys the payload builder sets before site tokens are added.
pub const RESERVED_KEYS: [&str; 5] = [SERVER_COUNT, BOT_ID, SHARD_COUNT, SHARD_ID, SHARDS];

/// Immutable JSON object built fresh for every post.
///
/// Serializes as the bare object. Only the payload builder creates documents, so a
/// document never outlives the send it was built for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatusDocument(Map<String, Value>);

impl StatusDocument {
    pub(crate) fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn server_count(&self) -> Option<u64> {
        self.0.get(SERVER_COUNT).and_then(Value::as_u64)
    }

    pub fn bot_id(&self) -> Option<&str> {
        self.0.get(BOT_ID).and_then(Value::as_str)
    }

    pub fn shard_count(&self) -> Option<u64> {
        self.0.get(SHARD_COUNT).and_then(Value::as_u64)
    }

    pub fn shard_id(&self) -> Option<u64> {
        self.0.get(SHARD_ID).and_then(Value::as_u64)
    }

    /// Per-shard guild counts in shard order.
    pub fn shards(&self) -> Option<Vec<u64>> {
        self.0
            .get(SHARDS)
            .and_then(Value::as_array)
            .map(|shards| shards.iter().filter_map(Value::as_u64).collect())
    }

    /// Any field by key, including site token entries.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
