//! Bot information returned by the aggregator's `bots/{id}` endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Public record of a bot as aggregated across all listing sites.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BotRecord {
    pub id: String,
    pub username: String,
    pub discriminator: String,
    /// Discord ids of the bot owners.
    #[serde(default)]
    pub owners: Vec<String>,
    pub server_count: u64,
    /// OAuth invite URL, when any site knows it.
    #[serde(default)]
    pub invite: Option<String>,
    /// Site name → raw listing data and the HTTP status that site answered with.
    #[serde(default)]
    pub list_data: BTreeMap<String, Listing>,
}

/// One site's entry in `list_data`.
///
/// On the wire this is a two element array `[data, status]`. The data is kept
/// opaque since every site returns its own shape. An entry that is not such a
/// pair is kept whole in `data` with no status, so one odd site never fails the
/// decoding of the record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "Value", into = "Value")]
pub struct Listing {
    pub data: Value,
    pub status: Option<u16>,
}

impl Listing {
    /// Whether the site answered with a 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_some_and(|status| (200..300).contains(&status))
    }
}

impl From<Value> for Listing {
    fn from(entry: Value) -> Self {
        if let Value::Array(pair) = &entry {
            if let [data, status] = pair.as_slice() {
                if let Some(status) = status.as_u64().and_then(|s| u16::try_from(s).ok()) {
                    return Self {
                        data: data.clone(),
                        status: Some(status),
                    };
                }
            }
        }

        Self {
            data: entry,
            status: None,
        }
    }
}

impl From<Listing> for Value {
    fn from(listing: Listing) -> Self {
        match listing.status {
            Some(status) => Value::Array(vec![listing.data, Value::from(status)]),
            None => listing.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Tests decoding a full record including listing pairs.
    ///
    /// Expected: Ok with owners, invite and listing status decoded
    #[test]
    fn decodes_bot_record() {
        let record: BotRecord = serde_json::from_value(json!({
            "id": "123456789012345678",
            "username": "Stats Bot",
            "discriminator": "0001",
            "owners": ["111", "222"],
            "server_count": 50,
            "invite": "https://discord.com/oauth2/authorize?client_id=123456789012345678",
            "prefix": "!",
            "list_data": {
                "lbots.org": [{"id": "123456789012345678", "guild_count": 50}, 200],
                "discord.bots.gg": [{"message": "Unknown bot"}, 404]
            }
        }))
        .unwrap();

        assert_eq!(record.owners, vec!["111", "222"]);
        assert_eq!(record.server_count, 50);
        assert!(record.invite.is_some());

        let lbots = &record.list_data["lbots.org"];
        assert_eq!(lbots.status, Some(200));
        assert!(lbots.is_success());
        assert_eq!(lbots.data["guild_count"], 50);
        assert!(!record.list_data["discord.bots.gg"].is_success());
    }

    /// Tests that optional fields may be missing or null.
    ///
    /// Expected: Ok with empty owners, no invite and empty list_data
    #[test]
    fn tolerates_missing_optional_fields() {
        let record: BotRecord = serde_json::from_value(json!({
            "id": "1",
            "username": "Bot",
            "discriminator": "0000",
            "server_count": 0,
            "invite": null
        }))
        .unwrap();

        assert!(record.owners.is_empty());
        assert_eq!(record.invite, None);
        assert!(record.list_data.is_empty());
    }

    /// Tests that a listing of an unexpected shape does not fail the record.
    ///
    /// Expected: Ok with the raw entry kept as data and no status
    #[test]
    fn keeps_malformed_listing_raw() {
        let record: BotRecord = serde_json::from_value(json!({
            "id": "1",
            "username": "Bot",
            "discriminator": "0000",
            "owners": ["111"],
            "server_count": 4,
            "list_data": {
                "lbots.org": [{"guild_count": 4}, 200],
                "weird.site": {"error": "gone"},
                "short.site": [{"guild_count": 4}],
                "text.site": [{}, "200"]
            }
        }))
        .unwrap();

        assert_eq!(record.owners, vec!["111"]);
        assert_eq!(record.list_data["lbots.org"].status, Some(200));

        let weird = &record.list_data["weird.site"];
        assert_eq!(weird.status, None);
        assert_eq!(weird.data, json!({"error": "gone"}));
        assert!(!weird.is_success());

        assert_eq!(record.list_data["short.site"].data, json!([{"guild_count": 4}]));
        assert_eq!(record.list_data["text.site"].status, None);
    }

    /// Tests that listings encode back to the shape they were read from.
    ///
    /// Expected: pairs for well-formed entries, raw value otherwise
    #[test]
    fn encodes_listing_as_received() {
        let pair = Listing::from(json!([{"id": "1"}, 404]));
        let raw = Listing::from(json!("offline"));

        assert_eq!(serde_json::to_value(&pair).unwrap(), json!([{"id": "1"}, 404]));
        assert_eq!(serde_json::to_value(&raw).unwrap(), json!("offline"));
    }
}
